// Commercial refinance records -> display rows

use serde::Serialize;

use crate::format::{alias, full_name};
use crate::grid::{Column, Grid};
use crate::models::{CommercialRefinance, LoanType, OneOrMany};

use super::{action_cell, coerce, opt};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommercialRefinanceRow {
    pub id: i64,
    pub submission_time: Option<String>,

    pub client_full_name: String,
    pub company_name: Option<String>,
    pub phone_number: Option<String>,
    pub email: Option<String>,

    pub property_address: String,
    pub property_type: Option<String>,
    pub occupancy_type: Option<String>,
    pub units: Option<i64>,

    pub refinance_type: Option<String>,
    pub property_value_display: String,
    pub loan_amount_requested_display: String,
    pub ltv_display: String,
    pub lien_position: Option<String>,

    pub mortgage_balance_1_display: String,
    pub monthly_payment_1_display: String,
    pub interest_rate_1_display: String,
}

pub fn transform_commercial_refinance(
    input: Option<OneOrMany<CommercialRefinance>>,
) -> Vec<CommercialRefinanceRow> {
    coerce(input).into_iter().map(row).collect()
}

fn row(r: CommercialRefinance) -> CommercialRefinanceRow {
    let client_full_name = full_name(
        alias(&r.client_first_name, &r.first_name),
        alias(&r.client_last_name, &r.last_name),
    );
    let property_address = r
        .property_address
        .or(r.property_address_address)
        .unwrap_or_default();

    CommercialRefinanceRow {
        id: r.id,
        submission_time: r.submission_time,

        client_full_name,
        company_name: r.company_name,
        phone_number: r.phone_number,
        email: r.email,

        property_address,
        property_type: r.property_type,
        occupancy_type: r.occupancy_type,
        units: r.units,

        refinance_type: r.refinance_type,
        property_value_display: r.property_value.display(),
        loan_amount_requested_display: r.loan_amount_requested.display(),
        ltv_display: r.ltv.display(),
        lien_position: r.lien_position,

        mortgage_balance_1_display: r.mortgage_balance_1.display(),
        monthly_payment_1_display: r.monthly_payment_1.display(),
        interest_rate_1_display: r.interest_rate_1.display(),
    }
}

pub fn commercial_refinance_grid(rows: &[CommercialRefinanceRow]) -> Grid {
    let columns = vec![
        Column::new("ID", 6),
        Column::new("Submitted", 12),
        Column::new("Client", 20),
        Column::new("Company", 18),
        Column::new("Phone", 14),
        Column::new("Email", 24),
        Column::new("Property Address", 28),
        Column::new("Type", 14),
        Column::new("Occupancy", 12),
        Column::new("Units", 6),
        Column::new("Refi Type", 12),
        Column::new("Value", 13),
        Column::new("Loan Amount", 12),
        Column::new("LTV", 7),
        Column::new("Lien", 10),
        Column::new("Mtg Balance", 12),
        Column::new("Payment", 10),
        Column::new("Rate", 7),
        Column::new("Actions", 10),
    ];

    let cells = rows
        .iter()
        .map(|r| {
            vec![
                r.id.to_string(),
                opt(&r.submission_time),
                r.client_full_name.clone(),
                opt(&r.company_name),
                opt(&r.phone_number),
                opt(&r.email),
                r.property_address.clone(),
                opt(&r.property_type),
                opt(&r.occupancy_type),
                r.units.map(|u| u.to_string()).unwrap_or_default(),
                opt(&r.refinance_type),
                r.property_value_display.clone(),
                r.loan_amount_requested_display.clone(),
                r.ltv_display.clone(),
                opt(&r.lien_position),
                r.mortgage_balance_1_display.clone(),
                r.monthly_payment_1_display.clone(),
                r.interest_rate_1_display.clone(),
                action_cell(r.id),
            ]
        })
        .collect();

    Grid::new(LoanType::CommercialRefinance.title(), columns, cells).with_pinned_action()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RawNum;

    #[test]
    fn test_transform_none_and_counts() {
        assert!(transform_commercial_refinance(None).is_empty());
        let rows = transform_commercial_refinance(Some(OneOrMany::One(
            CommercialRefinance::default(),
        )));
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn test_financing_snapshot_passthrough() {
        let r = CommercialRefinance {
            id: 9,
            mortgage_balance_1: RawNum::Num(850000.0),
            interest_rate_1: RawNum::Text("6.25".to_string()),
            ..Default::default()
        };
        let rows = transform_commercial_refinance(Some(OneOrMany::One(r)));
        assert_eq!(rows[0].mortgage_balance_1_display, "850000");
        assert_eq!(rows[0].interest_rate_1_display, "6.25");
        assert_eq!(rows[0].monthly_payment_1_display, "");
    }
}
