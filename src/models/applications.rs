// Loan-application records as returned by the external API
//
// One struct per loan type. Fields mirror the backend column names; the
// client_* fields are form-level aliases for the bare applicant fields and
// take priority during normalization (see format::alias).

use serde::{Deserialize, Serialize};

use super::raw::RawNum;

/// The six loan-application types served by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoanType {
    CommercialAcquisition,
    CommercialConstruction,
    CommercialRefinance,
    ResidentialAcquisition,
    ResidentialConstruction,
    ResidentialRefinance,
}

impl LoanType {
    pub const ALL: [LoanType; 6] = [
        LoanType::CommercialAcquisition,
        LoanType::CommercialConstruction,
        LoanType::CommercialRefinance,
        LoanType::ResidentialAcquisition,
        LoanType::ResidentialConstruction,
        LoanType::ResidentialRefinance,
    ];

    /// API path segment: `{API_URL}/applications/{endpoint}`
    pub fn endpoint(&self) -> &'static str {
        match self {
            LoanType::CommercialAcquisition => "commercial_acquisition",
            LoanType::CommercialConstruction => "commercial_construction",
            LoanType::CommercialRefinance => "commercial_refinance",
            LoanType::ResidentialAcquisition => "residential_acquisition",
            LoanType::ResidentialConstruction => "residential_construction",
            LoanType::ResidentialRefinance => "residential_refinance",
        }
    }

    /// Dashed segment used by routes and the matching-lenders endpoint.
    pub fn slug(&self) -> &'static str {
        match self {
            LoanType::CommercialAcquisition => "commercial-acquisition",
            LoanType::CommercialConstruction => "commercial-construction",
            LoanType::CommercialRefinance => "commercial-refinance",
            LoanType::ResidentialAcquisition => "residential-acquisition",
            LoanType::ResidentialConstruction => "residential-construction",
            LoanType::ResidentialRefinance => "residential-refinance",
        }
    }

    /// Human-readable name for page titles.
    pub fn title(&self) -> &'static str {
        match self {
            LoanType::CommercialAcquisition => "Commercial Acquisition",
            LoanType::CommercialConstruction => "Commercial Construction",
            LoanType::CommercialRefinance => "Commercial Refinance",
            LoanType::ResidentialAcquisition => "Residential Acquisition",
            LoanType::ResidentialConstruction => "Residential Construction",
            LoanType::ResidentialRefinance => "Residential Refinance",
        }
    }

    pub fn from_slug(slug: &str) -> Option<LoanType> {
        LoanType::ALL.iter().copied().find(|t| t.slug() == slug)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommercialAcquisition {
    pub id: i64,
    pub submission_time: Option<String>,

    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub client_first_name: Option<String>,
    pub client_last_name: Option<String>,
    pub company_name: Option<String>,
    pub phone_number: Option<String>,
    pub email: Option<String>,

    pub property_address: Option<String>,
    pub property_type: Option<String>,
    pub units: Option<i64>,

    #[serde(default)]
    pub purchase_price_or_property_value: RawNum,
    #[serde(default)]
    pub down_payment: RawNum,
    #[serde(default)]
    pub percent_of_company_owned: RawNum,
    #[serde(default)]
    pub loan_amount_requested: RawNum,
    #[serde(default)]
    pub ltv: RawNum,
    pub lien_position: Option<String>,

    #[serde(default)]
    pub occupancy_rate: RawNum,
    #[serde(default)]
    pub annual_lease_rent_revenue: RawNum,
    #[serde(default)]
    pub projected_annual_lease_rent_revenue: RawNum,

    pub is_under_contract: Option<String>,
    pub property_under_contract: Option<String>,
    pub close_of_escrow_date: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommercialConstruction {
    pub id: i64,
    pub submission_time: Option<String>,

    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub client_first_name: Option<String>,
    pub client_last_name: Option<String>,
    pub company_name: Option<String>,
    pub phone_number: Option<String>,
    pub email: Option<String>,

    pub property_address: Option<String>,
    pub property_address_address: Option<String>,
    pub property_type: Option<String>,
    pub units: Option<i64>,
    pub type_of_construction: Option<String>,

    #[serde(default)]
    pub purchase_price_or_property_value: RawNum,
    #[serde(default)]
    pub cost_of_construction: RawNum,
    #[serde(default)]
    pub construction_financed_amount: RawNum,
    #[serde(default)]
    pub after_repair_value: RawNum,
    #[serde(default)]
    pub ltc: RawNum,
    #[serde(default)]
    pub ltarv: RawNum,

    pub estimated_completion_time: Option<String>,
    pub permit_status: Option<String>,
    pub lien_position: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommercialRefinance {
    pub id: i64,
    pub submission_time: Option<String>,

    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub client_first_name: Option<String>,
    pub client_last_name: Option<String>,
    pub company_name: Option<String>,
    pub phone_number: Option<String>,
    pub email: Option<String>,

    pub property_address: Option<String>,
    pub property_address_address: Option<String>,
    pub property_type: Option<String>,
    pub occupancy_type: Option<String>,
    pub units: Option<i64>,

    pub refinance_type: Option<String>,
    #[serde(default)]
    pub property_value: RawNum,
    #[serde(default)]
    pub loan_amount_requested: RawNum,
    #[serde(default)]
    pub ltv: RawNum,
    pub lien_position: Option<String>,

    #[serde(default)]
    pub mortgage_balance_1: RawNum,
    #[serde(default)]
    pub monthly_payment_1: RawNum,
    #[serde(default)]
    pub interest_rate_1: RawNum,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResidentialAcquisition {
    pub id: i64,
    pub submission_time: Option<String>,

    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub client_first_name: Option<String>,
    pub client_last_name: Option<String>,
    pub phone_number: Option<String>,
    pub email: Option<String>,

    pub property_address: Option<String>,
    pub property_type: Option<String>,
    pub occupancy_type: Option<String>,

    #[serde(default)]
    pub purchase_price: RawNum,
    #[serde(default)]
    pub down_payment: RawNum,
    #[serde(default)]
    pub percent_of_company_owned: RawNum,
    #[serde(default)]
    pub loan_amount_requested: RawNum,
    #[serde(default)]
    pub ltv: RawNum,
    pub lien_position: Option<String>,

    pub is_under_contract: Option<String>,
    pub property_under_contract: Option<String>,
    pub close_of_escrow_date: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResidentialConstruction {
    pub id: i64,
    pub submission_time: Option<String>,

    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub client_first_name: Option<String>,
    pub client_last_name: Option<String>,
    pub phone_number: Option<String>,
    pub email: Option<String>,

    pub property_address: Option<String>,
    pub property_type: Option<String>,
    pub type_of_construction: Option<String>,

    #[serde(default)]
    pub purchase_price_or_property_value: RawNum,
    #[serde(default)]
    pub cost_of_construction: RawNum,
    #[serde(default)]
    pub after_repair_value: RawNum,
    #[serde(default)]
    pub ltc: RawNum,
    #[serde(default)]
    pub ltarv: RawNum,

    pub estimated_completion_time: Option<String>,
    pub permit_status: Option<String>,
    pub lien_position: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResidentialRefinance {
    pub id: i64,
    pub submission_time: Option<String>,

    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub client_first_name: Option<String>,
    pub client_last_name: Option<String>,
    pub phone_number: Option<String>,
    pub email: Option<String>,

    pub property_address: Option<String>,
    pub property_type: Option<String>,
    pub occupancy_type: Option<String>,

    pub refinance_type: Option<String>,
    #[serde(default)]
    pub property_value: RawNum,
    #[serde(default)]
    pub loan_amount_requested: RawNum,
    #[serde(default)]
    pub ltv: RawNum,
    pub lien_position: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loan_type_segments() {
        assert_eq!(
            LoanType::CommercialAcquisition.endpoint(),
            "commercial_acquisition"
        );
        assert_eq!(
            LoanType::CommercialAcquisition.slug(),
            "commercial-acquisition"
        );
        assert_eq!(
            LoanType::from_slug("residential-refinance"),
            Some(LoanType::ResidentialRefinance)
        );
        assert_eq!(LoanType::from_slug("bridge"), None);
    }

    #[test]
    fn test_record_deserializes_mixed_numeric_types() {
        let record: CommercialAcquisition = serde_json::from_str(
            r#"{
                "id": 12,
                "units": 4,
                "ltv": "75",
                "loan_amount_requested": 500000,
                "is_under_contract": "Yes",
                "unknown_backend_field": true
            }"#,
        )
        .unwrap();

        assert_eq!(record.id, 12);
        assert_eq!(record.units, Some(4));
        assert_eq!(record.ltv.display(), "75");
        assert_eq!(record.loan_amount_requested.display(), "500000");
        assert!(record.down_payment.is_missing());
    }
}
