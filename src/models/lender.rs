// Lender records and the self-service lender profile

use serde::{Deserialize, Serialize};

use super::raw::RawNum;

/// A lender as stored by the backend. Coverage fields (`lending_states`,
/// `property_types`) are comma-separated text and must be parsed into lists
/// before display.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Lender {
    pub id: i64,

    pub lender_name: Option<String>,
    #[serde(default)]
    pub loan_min: RawNum,
    #[serde(default)]
    pub loan_max: RawNum,
    pub fico_min: Option<i64>,
    pub lending_states: Option<String>,
    pub property_types: Option<String>,
    #[serde(default)]
    pub max_ltv: RawNum,

    pub company_name: Option<String>,
    pub contact_name: Option<String>,
    pub contact_phone: Option<String>,
    pub contact_email: Option<String>,
    pub notes: Option<String>,
}

/// The authenticated lender's own profile, as served by `/lenders/profile`.
/// Unlike `Lender`, coverage arrives already parsed into lists.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LenderProfile {
    pub id: i64,
    pub lender_name: Option<String>,
    pub contact_email: Option<String>,
    #[serde(default)]
    pub lending_states: Vec<String>,
    #[serde(default)]
    pub property_types: Vec<String>,
    pub loan_min: Option<f64>,
    pub loan_max: Option<f64>,
    pub max_ltv: Option<f64>,
    pub company_name: Option<String>,
    pub contact_name: Option<String>,
    pub contact_phone: Option<String>,
}

/// Partial update for `PATCH /lenders/profile`; absent fields are untouched.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LenderProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lender_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lending_states: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property_types: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loan_min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loan_max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_ltv: Option<f64>,
}
