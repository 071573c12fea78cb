// Row Transformers
// One module per loan type plus matching lenders and the admin lists. Each
// exposes a display Row struct, a pure `transform_*` function, and a grid
// builder for the table renderer.
//
// The none/one/many input normalization lives here in `coerce`, and the
// alias/formatting rules live in `format`, so the per-type modules carry
// only their field mapping and cannot drift on the shared rules.

pub mod commercial_acquisition;
pub mod commercial_construction;
pub mod commercial_refinance;
pub mod matching_lenders;
pub mod residential_acquisition;
pub mod residential_construction;
pub mod residential_refinance;
pub mod users;

pub use commercial_acquisition::{
    commercial_acquisition_grid, transform_commercial_acquisition, CommercialAcquisitionRow,
};
pub use commercial_construction::{
    commercial_construction_grid, transform_commercial_construction, CommercialConstructionRow,
};
pub use commercial_refinance::{
    commercial_refinance_grid, transform_commercial_refinance, CommercialRefinanceRow,
};
pub use matching_lenders::{lenders_grid, transform_matching_lenders, LenderRow};
pub use residential_acquisition::{
    residential_acquisition_grid, transform_residential_acquisition, ResidentialAcquisitionRow,
};
pub use residential_construction::{
    residential_construction_grid, transform_residential_construction, ResidentialConstructionRow,
};
pub use residential_refinance::{
    residential_refinance_grid, transform_residential_refinance, ResidentialRefinanceRow,
};
pub use users::{
    invitations_grid, transform_invitations, transform_users, users_grid, InvitationRow, UserRow,
};

use crate::format::is_under_contract;
use crate::models::OneOrMany;

/// Normalize a fetch payload into a flat record list. Transformers never
/// drop records: the output row count always equals the record count.
pub fn coerce<T>(input: Option<OneOrMany<T>>) -> Vec<T> {
    input.map(OneOrMany::into_vec).unwrap_or_default()
}

/// Grid cell for the under-contract flag: Yes/No for answered records,
/// blank when the backend has no value.
pub(crate) fn under_contract_cell(value: &Option<String>) -> String {
    match value {
        Some(answer) => {
            if is_under_contract(Some(answer)) {
                "Yes".to_string()
            } else {
                "No".to_string()
            }
        }
        None => String::new(),
    }
}

/// Action cell shown in the pinned column of every application grid.
pub(crate) fn action_cell(id: i64) -> String {
    format!("View #{}", id)
}

pub(crate) fn opt(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CommercialAcquisition;

    #[test]
    fn test_coerce_shapes() {
        assert!(coerce::<CommercialAcquisition>(None).is_empty());

        let one = coerce(Some(OneOrMany::One(CommercialAcquisition::default())));
        assert_eq!(one.len(), 1);

        let many = coerce(Some(OneOrMany::Many(vec![
            CommercialAcquisition::default(),
            CommercialAcquisition::default(),
        ])));
        assert_eq!(many.len(), 2);
    }

    #[test]
    fn test_under_contract_cell() {
        assert_eq!(under_contract_cell(&Some("Yes".to_string())), "Yes");
        assert_eq!(under_contract_cell(&Some("nope".to_string())), "No");
        assert_eq!(under_contract_cell(&None), "");
    }
}
