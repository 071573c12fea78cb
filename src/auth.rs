// Identity & Session
// Sign-in flows against a Google Identity Toolkit style REST provider, a
// local password policy checked before the provider ever sees a password,
// and the session state machine that ties an identity token to a backend
// account record.
//
// Session phases, in order:
//   SignedOut -> Pending -> SignedIn -> Provisioning -> Ready
// A session is only useful in Ready; SignedIn means the identity provider
// accepted the credentials but the backend has no account record yet.

use serde::Deserialize;
use thiserror::Error;

use crate::auth_api::{ApiError, BackendDirectory};
use crate::models::{BackendUser, ProvisionRequest};

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid email or password.")]
    InvalidCredentials,
    #[error("This account has been deactivated. Contact an administrator.")]
    Deactivated,
    #[error("Password does not meet requirements: {0}.")]
    WeakPassword(String),
    #[error("identity provider error: {0}")]
    Provider(String),
    #[error(transparent)]
    Backend(#[from] ApiError),
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Token bundle the identity provider hands back on sign-in/sign-up.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityToken {
    pub id_token: String,
    pub email: String,
    pub refresh_token: String,
    pub local_id: String,
    pub expires_in: String,
}

/// The identity provider seam. Production uses [`RestIdentity`]; session
/// tests use an in-memory fake.
pub trait IdentityProvider {
    fn sign_in(&self, email: &str, password: &str) -> Result<IdentityToken, AuthError>;
    fn sign_up(&self, email: &str, password: &str) -> Result<IdentityToken, AuthError>;
    fn sign_out(&self, token: &IdentityToken) -> Result<(), AuthError>;
    fn send_password_reset(&self, email: &str) -> Result<(), AuthError>;
    fn confirm_password_reset(&self, oob_code: &str, new_password: &str)
        -> Result<(), AuthError>;
}

// ============================================================
// REST identity provider
// ============================================================

pub struct RestIdentity {
    http: reqwest::blocking::Client,
    base_url: String,
    api_key: String,
}

impl RestIdentity {
    pub fn new(base_url: &str, api_key: &str, timeout_secs: u64) -> Result<Self, AuthError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()?;
        Ok(RestIdentity {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    fn call<T: serde::de::DeserializeOwned>(
        &self,
        action: &str,
        body: serde_json::Value,
    ) -> Result<T, AuthError> {
        let url = format!("{}/{}?key={}", self.base_url, action, self.api_key);
        let response = self.http.post(url).json(&body).send()?;

        if response.status().is_success() {
            return response
                .json()
                .map_err(|e| AuthError::Provider(e.to_string()));
        }

        let text = response.text().unwrap_or_default();
        Err(map_provider_error(&text))
    }
}

impl IdentityProvider for RestIdentity {
    fn sign_in(&self, email: &str, password: &str) -> Result<IdentityToken, AuthError> {
        self.call(
            "accounts:signInWithPassword",
            serde_json::json!({
                "email": email,
                "password": password,
                "returnSecureToken": true,
            }),
        )
    }

    fn sign_up(&self, email: &str, password: &str) -> Result<IdentityToken, AuthError> {
        self.call(
            "accounts:signUp",
            serde_json::json!({
                "email": email,
                "password": password,
                "returnSecureToken": true,
            }),
        )
    }

    // Tokens are not revocable through this surface; signing out is
    // discarding the token.
    fn sign_out(&self, _token: &IdentityToken) -> Result<(), AuthError> {
        Ok(())
    }

    fn send_password_reset(&self, email: &str) -> Result<(), AuthError> {
        self.call::<serde_json::Value>(
            "accounts:sendOobCode",
            serde_json::json!({
                "requestType": "PASSWORD_RESET",
                "email": email,
            }),
        )
        .map(|_| ())
    }

    fn confirm_password_reset(
        &self,
        oob_code: &str,
        new_password: &str,
    ) -> Result<(), AuthError> {
        self.call::<serde_json::Value>(
            "accounts:resetPassword",
            serde_json::json!({
                "oobCode": oob_code,
                "newPassword": new_password,
            }),
        )
        .map(|_| ())
    }
}

/// Map a provider error body to our error set. The provider encodes the
/// cause as `error.message`, sometimes with a detail suffix after " : ".
fn map_provider_error(body: &str) -> AuthError {
    let code = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("error")
                .and_then(|e| e.get("message"))
                .and_then(|m| m.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| "UNKNOWN".to_string());
    map_provider_code(&code)
}

fn map_provider_code(code: &str) -> AuthError {
    let (head, detail) = match code.split_once(':') {
        Some((head, detail)) => (head.trim(), detail.trim()),
        None => (code.trim(), ""),
    };
    match head {
        "EMAIL_NOT_FOUND" | "INVALID_PASSWORD" | "INVALID_LOGIN_CREDENTIALS" => {
            AuthError::InvalidCredentials
        }
        "USER_DISABLED" => AuthError::Deactivated,
        "WEAK_PASSWORD" => AuthError::WeakPassword(if detail.is_empty() {
            "too weak".to_string()
        } else {
            detail.to_string()
        }),
        other => AuthError::Provider(other.to_string()),
    }
}

// ============================================================
// Password policy
// ============================================================

pub const PASSWORD_MIN_LEN: usize = 8;
pub const PASSWORD_MAX_LEN: usize = 64;

/// Check a candidate password locally, before any network call. Returns the
/// names of every unmet requirement, empty when the password is acceptable.
pub fn password_unmet(password: &str) -> Vec<&'static str> {
    let mut unmet = Vec::new();
    if password.chars().count() < PASSWORD_MIN_LEN {
        unmet.push("minimum length");
    }
    if password.chars().count() > PASSWORD_MAX_LEN {
        unmet.push("maximum length");
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        unmet.push("lowercase letter");
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        unmet.push("uppercase letter");
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        unmet.push("number");
    }
    if !password.chars().any(|c| !c.is_ascii_alphanumeric()) {
        unmet.push("symbol");
    }
    unmet
}

pub fn validate_password(password: &str) -> Result<(), AuthError> {
    let unmet = password_unmet(password);
    if unmet.is_empty() {
        Ok(())
    } else {
        Err(AuthError::WeakPassword(unmet.join(", ")))
    }
}

// ============================================================
// Session state machine
// ============================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    SignedOut,
    Pending,
    SignedIn,
    Provisioning,
    Ready,
}

enum Phase {
    SignedOut,
    Pending,
    SignedIn { token: IdentityToken },
    Provisioning { token: IdentityToken },
    Ready { token: IdentityToken, user: BackendUser },
}

pub struct Session<P, B> {
    provider: P,
    backend: B,
    phase: Phase,
}

impl<P: IdentityProvider, B: BackendDirectory> Session<P, B> {
    pub fn new(provider: P, backend: B) -> Self {
        Session {
            provider,
            backend,
            phase: Phase::SignedOut,
        }
    }

    pub fn state(&self) -> SessionState {
        match self.phase {
            Phase::SignedOut => SessionState::SignedOut,
            Phase::Pending => SessionState::Pending,
            Phase::SignedIn { .. } => SessionState::SignedIn,
            Phase::Provisioning { .. } => SessionState::Provisioning,
            Phase::Ready { .. } => SessionState::Ready,
        }
    }

    pub fn backend_user(&self) -> Option<&BackendUser> {
        match &self.phase {
            Phase::Ready { user, .. } => Some(user),
            _ => None,
        }
    }

    /// The id token to present as a Bearer credential, in any signed-in
    /// phase.
    pub fn bearer(&self) -> Option<&str> {
        match &self.phase {
            Phase::SignedIn { token }
            | Phase::Provisioning { token }
            | Phase::Ready { token, .. } => Some(&token.id_token),
            _ => None,
        }
    }

    /// Sign in and resolve the backend account. A provider account with no
    /// backend record is provisioned on the spot with no profile details.
    pub fn sign_in(&mut self, email: &str, password: &str) -> Result<(), AuthError> {
        self.phase = Phase::Pending;
        let token = match self.provider.sign_in(email, password) {
            Ok(token) => token,
            Err(err) => {
                self.phase = Phase::SignedOut;
                return Err(err);
            }
        };
        self.phase = Phase::SignedIn {
            token: token.clone(),
        };
        self.resolve_backend(token, &ProvisionRequest::default())
    }

    /// Sign up a new account: password checked locally first, then the
    /// provider account is created and provisioned with the given profile.
    pub fn sign_up(
        &mut self,
        email: &str,
        password: &str,
        profile: ProvisionRequest,
    ) -> Result<(), AuthError> {
        validate_password(password)?;

        self.phase = Phase::Pending;
        let token = match self.provider.sign_up(email, password) {
            Ok(token) => token,
            Err(err) => {
                self.phase = Phase::SignedOut;
                return Err(err);
            }
        };
        self.phase = Phase::SignedIn {
            token: token.clone(),
        };
        self.resolve_backend(token, &profile)
    }

    fn resolve_backend(
        &mut self,
        token: IdentityToken,
        profile: &ProvisionRequest,
    ) -> Result<(), AuthError> {
        match self.backend.get_me(&token.id_token) {
            Ok(user) => {
                self.phase = Phase::Ready { token, user };
                Ok(())
            }
            Err(ApiError::NotFound) => {
                self.phase = Phase::Provisioning {
                    token: token.clone(),
                };
                match self.backend.provision(&token.id_token, profile) {
                    Ok(user) => {
                        self.phase = Phase::Ready { token, user };
                        Ok(())
                    }
                    Err(err) => {
                        // Identity is valid; the caller may retry
                        // provisioning without signing in again.
                        self.phase = Phase::SignedIn { token };
                        Err(err.into())
                    }
                }
            }
            Err(ApiError::Deactivated) => {
                let _ = self.provider.sign_out(&token);
                self.phase = Phase::SignedOut;
                Err(AuthError::Deactivated)
            }
            Err(err) => {
                self.phase = Phase::SignedIn { token };
                Err(err.into())
            }
        }
    }

    pub fn sign_out(&mut self) -> Result<(), AuthError> {
        let phase = std::mem::replace(&mut self.phase, Phase::SignedOut);
        match phase {
            Phase::SignedIn { token }
            | Phase::Provisioning { token }
            | Phase::Ready { token, .. } => self.provider.sign_out(&token),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;
    use std::cell::RefCell;

    fn token(id: &str) -> IdentityToken {
        IdentityToken {
            id_token: id.to_string(),
            email: "ada@example.com".to_string(),
            refresh_token: "refresh".to_string(),
            local_id: "uid-1".to_string(),
            expires_in: "3600".to_string(),
        }
    }

    struct FakeProvider {
        fail_sign_in: Option<fn() -> AuthError>,
        signed_out: RefCell<u32>,
    }

    impl FakeProvider {
        fn ok() -> Self {
            FakeProvider {
                fail_sign_in: None,
                signed_out: RefCell::new(0),
            }
        }
    }

    impl IdentityProvider for FakeProvider {
        fn sign_in(&self, _email: &str, _password: &str) -> Result<IdentityToken, AuthError> {
            match self.fail_sign_in {
                Some(make) => Err(make()),
                None => Ok(token("tok-1")),
            }
        }

        fn sign_up(&self, _email: &str, _password: &str) -> Result<IdentityToken, AuthError> {
            Ok(token("tok-new"))
        }

        fn sign_out(&self, _token: &IdentityToken) -> Result<(), AuthError> {
            *self.signed_out.borrow_mut() += 1;
            Ok(())
        }

        fn send_password_reset(&self, _email: &str) -> Result<(), AuthError> {
            Ok(())
        }

        fn confirm_password_reset(&self, _c: &str, _p: &str) -> Result<(), AuthError> {
            Ok(())
        }
    }

    enum Directory {
        Known,
        Unknown,
        Deactivated,
        UnknownProvisionFails,
    }

    impl BackendDirectory for Directory {
        fn get_me(&self, _id_token: &str) -> Result<BackendUser, ApiError> {
            match self {
                Directory::Known => Ok(BackendUser {
                    id: 1,
                    email: "ada@example.com".to_string(),
                    role: Role::Admin,
                    lender_id: None,
                }),
                Directory::Deactivated => Err(ApiError::Deactivated),
                _ => Err(ApiError::NotFound),
            }
        }

        fn provision(
            &self,
            _id_token: &str,
            _request: &ProvisionRequest,
        ) -> Result<BackendUser, ApiError> {
            match self {
                Directory::UnknownProvisionFails => Err(ApiError::Status {
                    status: 500,
                    message: "boom".to_string(),
                }),
                _ => Ok(BackendUser {
                    id: 2,
                    email: "ada@example.com".to_string(),
                    role: Role::Lender,
                    lender_id: Some(7),
                }),
            }
        }
    }

    #[test]
    fn test_sign_in_known_account_reaches_ready() {
        let mut session = Session::new(FakeProvider::ok(), Directory::Known);
        assert_eq!(session.state(), SessionState::SignedOut);
        session.sign_in("ada@example.com", "pw").unwrap();
        assert_eq!(session.state(), SessionState::Ready);
        assert!(session.backend_user().unwrap().is_admin());
        assert_eq!(session.bearer(), Some("tok-1"));
    }

    #[test]
    fn test_sign_in_unknown_account_provisions() {
        let mut session = Session::new(FakeProvider::ok(), Directory::Unknown);
        session.sign_in("ada@example.com", "pw").unwrap();
        assert_eq!(session.state(), SessionState::Ready);
        assert_eq!(session.backend_user().unwrap().role, Role::Lender);
    }

    #[test]
    fn test_deactivated_account_is_signed_back_out() {
        let provider = FakeProvider::ok();
        let mut session = Session::new(provider, Directory::Deactivated);
        let err = session.sign_in("ada@example.com", "pw").unwrap_err();
        assert!(matches!(err, AuthError::Deactivated));
        assert_eq!(session.state(), SessionState::SignedOut);
        assert!(session.bearer().is_none());
        assert_eq!(*session.provider.signed_out.borrow(), 1);
    }

    #[test]
    fn test_provision_failure_keeps_token() {
        let mut session = Session::new(FakeProvider::ok(), Directory::UnknownProvisionFails);
        let err = session.sign_in("ada@example.com", "pw").unwrap_err();
        assert!(matches!(err, AuthError::Backend(_)));
        assert_eq!(session.state(), SessionState::SignedIn);
        assert_eq!(session.bearer(), Some("tok-1"));
    }

    #[test]
    fn test_bad_credentials_reset_to_signed_out() {
        let provider = FakeProvider {
            fail_sign_in: Some(|| AuthError::InvalidCredentials),
            signed_out: RefCell::new(0),
        };
        let mut session = Session::new(provider, Directory::Known);
        let err = session.sign_in("ada@example.com", "nope").unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
        assert_eq!(session.state(), SessionState::SignedOut);
    }

    #[test]
    fn test_sign_up_rejects_weak_password_locally() {
        let mut session = Session::new(FakeProvider::ok(), Directory::Unknown);
        let err = session
            .sign_up("ada@example.com", "short", ProvisionRequest::default())
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Password does not meet requirements: minimum length, uppercase letter, number, symbol."
        );
        assert_eq!(session.state(), SessionState::SignedOut);
    }

    #[test]
    fn test_password_unmet_names() {
        assert!(password_unmet("Str0ng!pass").is_empty());
        assert_eq!(password_unmet("alllower1!"), vec!["uppercase letter"]);
        assert_eq!(
            password_unmet(&"Aa1!".repeat(20)),
            vec!["maximum length"]
        );
    }

    #[test]
    fn test_provider_code_mapping() {
        assert!(matches!(
            map_provider_code("EMAIL_NOT_FOUND"),
            AuthError::InvalidCredentials
        ));
        assert!(matches!(
            map_provider_code("INVALID_LOGIN_CREDENTIALS"),
            AuthError::InvalidCredentials
        ));
        assert!(matches!(
            map_provider_code("USER_DISABLED"),
            AuthError::Deactivated
        ));
        match map_provider_code("WEAK_PASSWORD : Password should be at least 6 characters") {
            AuthError::WeakPassword(detail) => {
                assert_eq!(detail, "Password should be at least 6 characters")
            }
            other => panic!("unexpected: {other:?}"),
        }
        assert!(matches!(
            map_provider_code("TOO_MANY_ATTEMPTS_TRY_LATER"),
            AuthError::Provider(_)
        ));
    }

    #[test]
    fn test_sign_out_clears_phase() {
        let mut session = Session::new(FakeProvider::ok(), Directory::Known);
        session.sign_in("ada@example.com", "pw").unwrap();
        session.sign_out().unwrap();
        assert_eq!(session.state(), SessionState::SignedOut);
        assert_eq!(*session.provider.signed_out.borrow(), 1);
    }
}
