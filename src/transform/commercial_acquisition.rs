// Commercial acquisition records -> display rows

use serde::Serialize;

use crate::format::{alias, full_name};
use crate::grid::{Column, Grid};
use crate::models::{CommercialAcquisition, LoanType, OneOrMany};

use super::{action_cell, coerce, opt, under_contract_cell};

/// Display-ready row. Economics fields pass the raw backend value through
/// as a string; application tables intentionally skip currency formatting.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommercialAcquisitionRow {
    pub id: i64,
    pub submission_time: Option<String>,

    pub client_full_name: String,
    pub company_name: Option<String>,
    pub phone_number: Option<String>,
    pub email: Option<String>,

    pub property_address: String,
    pub property_type: Option<String>,
    pub units: Option<i64>,

    pub purchase_price_or_property_value_display: String,
    pub down_payment_display: String,
    pub down_payment_pct_display: String,
    pub loan_amount_requested_display: String,
    pub ltv_display: String,
    pub lien_position: Option<String>,

    pub occupancy_rate_display: String,
    pub annual_lease_rent_revenue_display: String,
    pub projected_annual_lease_rent_revenue_display: String,

    pub is_under_contract: Option<String>,
    pub close_of_escrow_date: Option<String>,
}

pub fn transform_commercial_acquisition(
    input: Option<OneOrMany<CommercialAcquisition>>,
) -> Vec<CommercialAcquisitionRow> {
    coerce(input).into_iter().map(row).collect()
}

fn row(r: CommercialAcquisition) -> CommercialAcquisitionRow {
    let client_full_name = full_name(
        alias(&r.client_first_name, &r.first_name),
        alias(&r.client_last_name, &r.last_name),
    );

    CommercialAcquisitionRow {
        id: r.id,
        submission_time: r.submission_time,

        client_full_name,
        company_name: r.company_name,
        phone_number: r.phone_number,
        email: r.email,

        property_address: r.property_address.unwrap_or_default(),
        property_type: r.property_type,
        units: r.units,

        purchase_price_or_property_value_display: r.purchase_price_or_property_value.display(),
        down_payment_display: r.down_payment.display(),
        down_payment_pct_display: r.percent_of_company_owned.display(),
        loan_amount_requested_display: r.loan_amount_requested.display(),
        ltv_display: r.ltv.display(),
        lien_position: r.lien_position,

        occupancy_rate_display: r.occupancy_rate.display(),
        annual_lease_rent_revenue_display: r.annual_lease_rent_revenue.display(),
        projected_annual_lease_rent_revenue_display: r.projected_annual_lease_rent_revenue.display(),

        is_under_contract: r.is_under_contract.or(r.property_under_contract),
        close_of_escrow_date: r.close_of_escrow_date,
    }
}

pub fn commercial_acquisition_grid(rows: &[CommercialAcquisitionRow]) -> Grid {
    let columns = vec![
        Column::new("ID", 6),
        Column::new("Submitted", 12),
        Column::new("Client", 20),
        Column::new("Company", 18),
        Column::new("Phone", 14),
        Column::new("Email", 24),
        Column::new("Property Address", 28),
        Column::new("Type", 14),
        Column::new("Units", 6),
        Column::new("Price/Value", 13),
        Column::new("Down Payment", 13),
        Column::new("Down Pmt %", 11),
        Column::new("Loan Amount", 12),
        Column::new("LTV", 7),
        Column::new("Lien", 10),
        Column::new("Occupancy", 10),
        Column::new("Lease Rev", 12),
        Column::new("Proj Rev", 12),
        Column::new("Under Contract", 14),
        Column::new("COE Date", 12),
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
                r.units.map(|u| u.to_string()).unwrap_or_default(),
                r.purchase_price_or_property_value_display.clone(),
                r.down_payment_display.clone(),
                r.down_payment_pct_display.clone(),
                r.loan_amount_requested_display.clone(),
                r.ltv_display.clone(),
                opt(&r.lien_position),
                r.occupancy_rate_display.clone(),
                r.annual_lease_rent_revenue_display.clone(),
                r.projected_annual_lease_rent_revenue_display.clone(),
                under_contract_cell(&r.is_under_contract),
                opt(&r.close_of_escrow_date),
                action_cell(r.id),
            ]
        })
        .collect();

    Grid::new(LoanType::CommercialAcquisition.title(), columns, cells).with_pinned_action()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RawNum;
    use pretty_assertions::assert_eq;

    fn record() -> CommercialAcquisition {
        CommercialAcquisition {
            id: 12,
            first_name: Some("Grace".to_string()),
            last_name: Some("Hopper".to_string()),
            units: Some(4),
            ltv: RawNum::Text("75".to_string()),
            loan_amount_requested: RawNum::Num(500000.0),
            is_under_contract: Some("Yes".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_transform_none_is_empty() {
        assert!(transform_commercial_acquisition(None).is_empty());
    }

    #[test]
    fn test_transform_counts_match_input() {
        let one = transform_commercial_acquisition(Some(OneOrMany::One(record())));
        assert_eq!(one.len(), 1);

        let two =
            transform_commercial_acquisition(Some(OneOrMany::Many(vec![record(), record()])));
        assert_eq!(two.len(), 2);
    }

    #[test]
    fn test_pass_through_display_values() {
        let rows = transform_commercial_acquisition(Some(OneOrMany::One(record())));
        let row = &rows[0];
        assert_eq!(row.units, Some(4));
        assert_eq!(row.ltv_display, "75");
        assert_eq!(row.loan_amount_requested_display, "500000");
        assert_eq!(row.client_full_name, "Grace Hopper");
        assert_eq!(row.down_payment_display, "");
    }

    #[test]
    fn test_client_fields_win_over_bare_fields() {
        let mut r = record();
        r.client_first_name = Some("Margaret".to_string());
        r.client_last_name = Some("Hamilton".to_string());
        let rows = transform_commercial_acquisition(Some(OneOrMany::One(r)));
        assert_eq!(rows[0].client_full_name, "Margaret Hamilton");
    }

    #[test]
    fn test_under_contract_alias_order() {
        let mut r = record();
        r.is_under_contract = None;
        r.property_under_contract = Some("no".to_string());
        let rows = transform_commercial_acquisition(Some(OneOrMany::One(r)));
        assert_eq!(rows[0].is_under_contract.as_deref(), Some("no"));
    }

    #[test]
    fn test_grid_pins_action_column() {
        let rows = transform_commercial_acquisition(Some(OneOrMany::One(record())));
        let grid = commercial_acquisition_grid(&rows);
        assert!(grid.has_pinned_action());
        assert_eq!(grid.rows[0].last().map(String::as_str), Some("View #12"));
        assert_eq!(grid.rows[0].len(), grid.columns.len());
    }
}
