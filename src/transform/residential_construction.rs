// Residential construction records -> display rows

use serde::Serialize;

use crate::format::{alias, full_name};
use crate::grid::{Column, Grid};
use crate::models::{LoanType, OneOrMany, ResidentialConstruction};

use super::{action_cell, coerce, opt};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResidentialConstructionRow {
    pub id: i64,
    pub submission_time: Option<String>,

    pub client_full_name: String,
    pub phone_number: Option<String>,
    pub email: Option<String>,

    pub property_address: String,
    pub property_type: Option<String>,

    pub type_of_construction: Option<String>,
    pub purchase_price_or_property_value_display: String,
    pub cost_of_construction_display: String,
    pub after_repair_value_display: String,
    pub ltc_display: String,
    pub ltarv_display: String,
    pub estimated_completion_time: Option<String>,
    pub permit_status: Option<String>,
    pub lien_position: Option<String>,
}

pub fn transform_residential_construction(
    input: Option<OneOrMany<ResidentialConstruction>>,
) -> Vec<ResidentialConstructionRow> {
    coerce(input).into_iter().map(row).collect()
}

fn row(r: ResidentialConstruction) -> ResidentialConstructionRow {
    let client_full_name = full_name(
        alias(&r.client_first_name, &r.first_name),
        alias(&r.client_last_name, &r.last_name),
    );

    ResidentialConstructionRow {
        id: r.id,
        submission_time: r.submission_time,

        client_full_name,
        phone_number: r.phone_number,
        email: r.email,

        property_address: r.property_address.unwrap_or_default(),
        property_type: r.property_type,

        type_of_construction: r.type_of_construction,
        purchase_price_or_property_value_display: r.purchase_price_or_property_value.display(),
        cost_of_construction_display: r.cost_of_construction.display(),
        after_repair_value_display: r.after_repair_value.display(),
        ltc_display: r.ltc.display(),
        ltarv_display: r.ltarv.display(),
        estimated_completion_time: r.estimated_completion_time,
        permit_status: r.permit_status,
        lien_position: r.lien_position,
    }
}

pub fn residential_construction_grid(rows: &[ResidentialConstructionRow]) -> Grid {
    let columns = vec![
        Column::new("ID", 6),
        Column::new("Submitted", 12),
        Column::new("Client", 20),
        Column::new("Phone", 14),
        Column::new("Email", 24),
        Column::new("Property Address", 28),
        Column::new("Type", 14),
        Column::new("Construction", 16),
        Column::new("Price/Value", 13),
        Column::new("Build Cost", 12),
        Column::new("ARV", 12),
        Column::new("LTC", 7),
        Column::new("LTARV", 7),
        Column::new("Completion", 12),
        Column::new("Permits", 12),
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
                opt(&r.type_of_construction),
                r.purchase_price_or_property_value_display.clone(),
                r.cost_of_construction_display.clone(),
                r.after_repair_value_display.clone(),
                r.ltc_display.clone(),
                r.ltarv_display.clone(),
                opt(&r.estimated_completion_time),
                opt(&r.permit_status),
                opt(&r.lien_position),
                action_cell(r.id),
            ]
        })
        .collect();

    Grid::new(LoanType::ResidentialConstruction.title(), columns, cells).with_pinned_action()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RawNum;

    #[test]
    fn test_transform_none_and_counts() {
        assert!(transform_residential_construction(None).is_empty());
        let rows = transform_residential_construction(Some(OneOrMany::One(
            ResidentialConstruction::default(),
        )));
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn test_project_fields() {
        let r = ResidentialConstruction {
            id: 21,
            type_of_construction: Some("Ground up".to_string()),
            ltarv: RawNum::Text("65".to_string()),
            cost_of_construction: RawNum::Num(410000.0),
            ..Default::default()
        };
        let rows = transform_residential_construction(Some(OneOrMany::One(r)));
        assert_eq!(rows[0].type_of_construction.as_deref(), Some("Ground up"));
        assert_eq!(rows[0].ltarv_display, "65");
        assert_eq!(rows[0].cost_of_construction_display, "410000");
    }
}
