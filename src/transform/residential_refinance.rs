// Residential refinance records -> display rows

use serde::Serialize;

use crate::format::{alias, full_name};
use crate::grid::{Column, Grid};
use crate::models::{LoanType, OneOrMany, ResidentialRefinance};

use super::{action_cell, coerce, opt};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResidentialRefinanceRow {
    pub id: i64,
    pub submission_time: Option<String>,

    pub client_full_name: String,
    pub phone_number: Option<String>,
    pub email: Option<String>,

    pub property_address: String,
    pub property_type: Option<String>,
    pub occupancy_type: Option<String>,

    pub refinance_type: Option<String>,
    pub property_value_display: String,
    pub loan_amount_requested_display: String,
    pub ltv_display: String,
    pub lien_position: Option<String>,
}

pub fn transform_residential_refinance(
    input: Option<OneOrMany<ResidentialRefinance>>,
) -> Vec<ResidentialRefinanceRow> {
    coerce(input).into_iter().map(row).collect()
}

fn row(r: ResidentialRefinance) -> ResidentialRefinanceRow {
    let client_full_name = full_name(
        alias(&r.client_first_name, &r.first_name),
        alias(&r.client_last_name, &r.last_name),
    );

    ResidentialRefinanceRow {
        id: r.id,
        submission_time: r.submission_time,

        client_full_name,
        phone_number: r.phone_number,
        email: r.email,

        property_address: r.property_address.unwrap_or_default(),
        property_type: r.property_type,
        occupancy_type: r.occupancy_type,

        refinance_type: r.refinance_type,
        property_value_display: r.property_value.display(),
        loan_amount_requested_display: r.loan_amount_requested.display(),
        ltv_display: r.ltv.display(),
        lien_position: r.lien_position,
    }
}

pub fn residential_refinance_grid(rows: &[ResidentialRefinanceRow]) -> Grid {
    let columns = vec![
        Column::new("ID", 6),
        Column::new("Submitted", 12),
        Column::new("Client", 20),
        Column::new("Phone", 14),
        Column::new("Email", 24),
        Column::new("Property Address", 28),
        Column::new("Type", 14),
        Column::new("Occupancy", 12),
        Column::new("Refi Type", 12),
        Column::new("Value", 13),
        Column::new("Loan Amount", 12),
        Column::new("LTV", 7),
        Column::new("Lien", 10),
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
                opt(&r.refinance_type),
                r.property_value_display.clone(),
                r.loan_amount_requested_display.clone(),
                r.ltv_display.clone(),
                opt(&r.lien_position),
                action_cell(r.id),
            ]
        })
        .collect();

    Grid::new(LoanType::ResidentialRefinance.title(), columns, cells).with_pinned_action()
}
