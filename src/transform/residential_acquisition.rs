// Residential acquisition records -> display rows

use serde::Serialize;

use crate::format::{alias, full_name};
use crate::grid::{Column, Grid};
use crate::models::{LoanType, OneOrMany, ResidentialAcquisition};

use super::{action_cell, coerce, opt, under_contract_cell};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResidentialAcquisitionRow {
    pub id: i64,
    pub submission_time: Option<String>,

    pub client_full_name: String,
    pub phone_number: Option<String>,
    pub email: Option<String>,

    pub property_address: String,
    pub property_type: Option<String>,
    pub occupancy_type: Option<String>,

    pub purchase_price_display: String,
    pub down_payment_display: String,
    pub down_payment_pct_display: String,
    /// None when the backend never sent the field, unlike the other display
    /// strings which blank out.
    pub loan_amount_requested_display: Option<String>,
    pub ltv_display: Option<String>,
    pub lien_position: Option<String>,

    pub is_under_contract: Option<String>,
    pub close_of_escrow_date: Option<String>,
}

pub fn transform_residential_acquisition(
    input: Option<OneOrMany<ResidentialAcquisition>>,
) -> Vec<ResidentialAcquisitionRow> {
    coerce(input).into_iter().map(row).collect()
}

fn row(r: ResidentialAcquisition) -> ResidentialAcquisitionRow {
    let client_full_name = full_name(
        alias(&r.client_first_name, &r.first_name),
        alias(&r.client_last_name, &r.last_name),
    );

    ResidentialAcquisitionRow {
        id: r.id,
        submission_time: r.submission_time,

        client_full_name,
        phone_number: r.phone_number,
        email: r.email,

        property_address: r.property_address.unwrap_or_default(),
        property_type: r.property_type,
        occupancy_type: r.occupancy_type,

        purchase_price_display: r.purchase_price.display(),
        down_payment_display: r.down_payment.display(),
        down_payment_pct_display: r.percent_of_company_owned.display(),
        loan_amount_requested_display: if r.loan_amount_requested.is_missing() {
            None
        } else {
            Some(r.loan_amount_requested.display())
        },
        ltv_display: if r.ltv.is_missing() {
            None
        } else {
            Some(r.ltv.display())
        },
        lien_position: r.lien_position,

        is_under_contract: r.is_under_contract.or(r.property_under_contract),
        close_of_escrow_date: r.close_of_escrow_date,
    }
}

pub fn residential_acquisition_grid(rows: &[ResidentialAcquisitionRow]) -> Grid {
    let columns = vec![
        Column::new("ID", 6),
        Column::new("Submitted", 12),
        Column::new("Client", 20),
        Column::new("Phone", 14),
        Column::new("Email", 24),
        Column::new("Property Address", 28),
        Column::new("Type", 14),
        Column::new("Occupancy", 12),
        Column::new("Purchase Price", 14),
        Column::new("Down Payment", 13),
        Column::new("Down Pmt %", 11),
        Column::new("Loan Amount", 12),
        Column::new("LTV", 7),
        Column::new("Lien", 10),
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
                opt(&r.phone_number),
                opt(&r.email),
                r.property_address.clone(),
                opt(&r.property_type),
                opt(&r.occupancy_type),
                r.purchase_price_display.clone(),
                r.down_payment_display.clone(),
                r.down_payment_pct_display.clone(),
                opt(&r.loan_amount_requested_display),
                opt(&r.ltv_display),
                opt(&r.lien_position),
                under_contract_cell(&r.is_under_contract),
                opt(&r.close_of_escrow_date),
                action_cell(r.id),
            ]
        })
        .collect();

    Grid::new(LoanType::ResidentialAcquisition.title(), columns, cells).with_pinned_action()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RawNum;

    #[test]
    fn test_transform_none_and_counts() {
        assert!(transform_residential_acquisition(None).is_empty());
        let rows = transform_residential_acquisition(Some(OneOrMany::Many(vec![
            ResidentialAcquisition::default(),
            ResidentialAcquisition::default(),
        ])));
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn test_absent_loan_fields_stay_none() {
        let rows = transform_residential_acquisition(Some(OneOrMany::One(
            ResidentialAcquisition::default(),
        )));
        assert_eq!(rows[0].loan_amount_requested_display, None);
        assert_eq!(rows[0].ltv_display, None);
        // but the always-present display strings blank out
        assert_eq!(rows[0].purchase_price_display, "");
    }

    #[test]
    fn test_present_loan_fields_passthrough() {
        let r = ResidentialAcquisition {
            id: 4,
            loan_amount_requested: RawNum::Num(320000.0),
            ltv: RawNum::Text("80".to_string()),
            ..Default::default()
        };
        let rows = transform_residential_acquisition(Some(OneOrMany::One(r)));
        assert_eq!(
            rows[0].loan_amount_requested_display.as_deref(),
            Some("320000")
        );
        assert_eq!(rows[0].ltv_display.as_deref(), Some("80"));
    }
}
