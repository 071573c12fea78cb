// Configuration
// Everything comes from the environment (a .env file is honored when
// present). API_URL is the only hard requirement; identity and staff
// credentials are optional and gate the admin pages.

use anyhow::{Context, Result};

pub const DEFAULT_TIMEOUT_SECS: u64 = 15;
pub const DEFAULT_IDENTITY_URL: &str = "https://identitytoolkit.googleapis.com/v1";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_url: String,
    pub shared_secret: String,
    pub timeout_secs: u64,
    pub identity: Option<IdentityConfig>,
    pub staff: Option<StaffCredentials>,
}

#[derive(Debug, Clone)]
pub struct IdentityConfig {
    pub api_key: String,
    pub api_url: String,
}

#[derive(Debug, Clone)]
pub struct StaffCredentials {
    pub email: String,
    pub password: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        // Best effort; absence of a .env file is not an error
        let _ = dotenvy::dotenv();

        let api_url = std::env::var("API_URL")
            .context("API_URL environment variable is not set")?;
        let shared_secret = std::env::var("FILLOUT_SHARED_SECRET").unwrap_or_default();
        let timeout_secs = match std::env::var("FETCH_TIMEOUT_SECS") {
            Ok(raw) => raw
                .parse()
                .context("FETCH_TIMEOUT_SECS is not a number of seconds")?,
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };

        let identity = std::env::var("IDENTITY_API_KEY").ok().map(|api_key| {
            let api_url = std::env::var("IDENTITY_API_URL")
                .unwrap_or_else(|_| DEFAULT_IDENTITY_URL.to_string());
            IdentityConfig { api_key, api_url }
        });

        let staff = match (std::env::var("STAFF_EMAIL"), std::env::var("STAFF_PASSWORD")) {
            (Ok(email), Ok(password)) => Some(StaffCredentials { email, password }),
            _ => None,
        };

        Ok(AppConfig {
            api_url,
            shared_secret,
            timeout_secs,
            identity,
            staff,
        })
    }
}
