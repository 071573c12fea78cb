// Lending Desk - Core Library
// Exposes all modules for use in the dashboard binary and tests

pub mod auth;
pub mod auth_api;
pub mod config;
pub mod fetch;
pub mod format;
pub mod grid;
pub mod models;
pub mod transform;

// Re-export commonly used types
pub use auth::{
    AuthError, IdentityProvider, IdentityToken, RestIdentity, Session, SessionState,
};
pub use auth_api::{ApiError, AuthApi, BackendDirectory};
pub use config::{AppConfig, IdentityConfig, StaffCredentials};
pub use fetch::{or_empty, ApiClient, FetchError};
pub use grid::{Column, Grid};
pub use models::{
    BackendUser, CommercialAcquisition, CommercialConstruction, CommercialRefinance, Invitation,
    Lender, LenderProfile, LenderProfileUpdate, LoanType, ManagedUser, OneOrMany, ProvisionRequest,
    RawNum, ResidentialAcquisition, ResidentialConstruction, ResidentialRefinance, Role,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
