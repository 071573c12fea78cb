// Record Models
// Raw records as the external API returns them, plus shared payload helpers

pub mod applications;
pub mod lender;
pub mod raw;
pub mod user;

pub use applications::{
    CommercialAcquisition, CommercialConstruction, CommercialRefinance, LoanType,
    ResidentialAcquisition, ResidentialConstruction, ResidentialRefinance,
};
pub use lender::{Lender, LenderProfile, LenderProfileUpdate};
pub use raw::{OneOrMany, RawNum};
pub use user::{BackendUser, Invitation, Inviter, ManagedUser, ProvisionRequest, Role};
