// Lender records -> display rows for the matching-lenders panel

use serde::Serialize;

use crate::format::{format_number, format_percent, loan_range_display, parse_comma_separated};
use crate::grid::{Column, Grid};
use crate::models::{Lender, OneOrMany, RawNum};

use super::coerce;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LenderRow {
    pub id: i64,
    pub lender_name: String,
    pub company_name: String,
    pub contact_name: String,
    pub contact_phone: String,
    pub contact_email: String,

    pub loan_range_display: String,
    pub max_ltv_display: String,
    pub fico_min_display: String,
    pub lending_states: Vec<String>,
    pub property_types: Vec<String>,
    pub notes: String,
}

pub fn transform_matching_lenders(input: Option<OneOrMany<Lender>>) -> Vec<LenderRow> {
    coerce(input).into_iter().map(row).collect()
}

fn row(l: Lender) -> LenderRow {
    let fico_min_display = match l.fico_min {
        Some(score) => format_number(&RawNum::from(score)),
        None => String::new(),
    };

    LenderRow {
        id: l.id,
        lender_name: l.lender_name.unwrap_or_default(),
        company_name: l.company_name.unwrap_or_default(),
        contact_name: l.contact_name.unwrap_or_default(),
        contact_phone: l.contact_phone.unwrap_or_default(),
        contact_email: l.contact_email.unwrap_or_default(),

        loan_range_display: loan_range_display(&l.loan_min, &l.loan_max),
        max_ltv_display: format_percent(&l.max_ltv),
        fico_min_display,
        lending_states: parse_comma_separated(l.lending_states.as_deref()),
        property_types: parse_comma_separated(l.property_types.as_deref()),
        notes: l.notes.unwrap_or_default(),
    }
}

pub fn lenders_grid(rows: &[LenderRow]) -> Grid {
    let columns = vec![
        Column::new("Lender", 22),
        Column::new("Company", 20),
        Column::new("Contact", 18),
        Column::new("Phone", 14),
        Column::new("Email", 24),
        Column::new("Loan Range", 22),
        Column::new("Max LTV", 9),
        Column::new("Min FICO", 9),
        Column::new("States", 20),
        Column::new("Property Types", 24),
        Column::new("Notes", 30),
    ];

    let cells = rows
        .iter()
        .map(|r| {
            vec![
                r.lender_name.clone(),
                r.company_name.clone(),
                r.contact_name.clone(),
                r.contact_phone.clone(),
                r.contact_email.clone(),
                r.loan_range_display.clone(),
                r.max_ltv_display.clone(),
                r.fico_min_display.clone(),
                r.lending_states.join(", "),
                r.property_types.join(", "),
                r.notes.clone(),
            ]
        })
        .collect();

    Grid::new("Matching Lenders", columns, cells)
        .with_empty_state("No matching lenders found for this application")
}
