// Backend Account API
// Bearer-token client for the backend's own account surface: the signed-in
// user record, provisioning, admin user management, invitations, and the
// lender's self-service profile. Distinct from `fetch::ApiClient`, which
// talks to the application data endpoints with the shared secret.

use serde::Serialize;
use thiserror::Error;

use crate::models::{
    BackendUser, Invitation, LenderProfile, LenderProfileUpdate, ManagedUser, ProvisionRequest,
    Role,
};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("account not found")]
    NotFound,
    #[error("this account has been deactivated")]
    Deactivated,
    #[error("backend returned {status}: {message}")]
    Status { status: u16, message: String },
    #[error("backend response did not match the expected shape")]
    Decode,
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

#[derive(Clone)]
pub struct AuthApi {
    http: reqwest::blocking::Client,
    base_url: String,
}

impl AuthApi {
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self, ApiError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()?;
        Ok(AuthApi {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn check(
        response: reqwest::blocking::Response,
    ) -> Result<reqwest::blocking::Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        if status.as_u16() == 404 {
            return Err(ApiError::NotFound);
        }

        let message = safe_error(&response.text().unwrap_or_default());
        if message.to_lowercase().contains("deactivat") {
            return Err(ApiError::Deactivated);
        }
        Err(ApiError::Status {
            status: status.as_u16(),
            message,
        })
    }

    fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        token: &str,
        path: &str,
    ) -> Result<T, ApiError> {
        let response = self.http.get(self.url(path)).bearer_auth(token).send()?;
        Self::check(response)?.json().map_err(|_| ApiError::Decode)
    }

    fn post_json<B: Serialize, T: serde::de::DeserializeOwned>(
        &self,
        token: &str,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self
            .http
            .post(self.url(path))
            .bearer_auth(token)
            .json(body)
            .send()?;
        Self::check(response)?.json().map_err(|_| ApiError::Decode)
    }

    // -- User management (admin) --

    pub fn users(&self, token: &str) -> Result<Vec<ManagedUser>, ApiError> {
        self.get_json(token, "/auth/users")
    }

    pub fn set_role(&self, token: &str, user_id: i64, role: Role) -> Result<(), ApiError> {
        let response = self
            .http
            .patch(self.url(&format!("/auth/users/{}/role", user_id)))
            .bearer_auth(token)
            .json(&serde_json::json!({ "role": role }))
            .send()?;
        Self::check(response).map(|_| ())
    }

    pub fn deactivate_user(&self, token: &str, user_id: i64) -> Result<(), ApiError> {
        let response = self
            .http
            .delete(self.url(&format!("/auth/users/{}", user_id)))
            .bearer_auth(token)
            .send()?;
        Self::check(response).map(|_| ())
    }

    pub fn activate_user(&self, token: &str, user_id: i64) -> Result<(), ApiError> {
        let response = self
            .http
            .post(self.url(&format!("/auth/users/{}/activate", user_id)))
            .bearer_auth(token)
            .send()?;
        Self::check(response).map(|_| ())
    }

    // -- Invitations (admin) --

    pub fn invitations(&self, token: &str) -> Result<Vec<Invitation>, ApiError> {
        self.get_json(token, "/auth/invitations")
    }

    pub fn create_invitation(
        &self,
        token: &str,
        email: &str,
        role: Role,
    ) -> Result<Invitation, ApiError> {
        self.post_json(
            token,
            "/auth/invitations",
            &serde_json::json!({ "email": email, "role": role }),
        )
    }

    pub fn resend_invitation(&self, token: &str, invitation_id: i64) -> Result<(), ApiError> {
        let response = self
            .http
            .post(self.url(&format!("/auth/invitations/{}/resend", invitation_id)))
            .bearer_auth(token)
            .send()?;
        Self::check(response).map(|_| ())
    }

    // -- Lender self-service profile --

    pub fn lender_profile(&self, token: &str) -> Result<LenderProfile, ApiError> {
        self.get_json(token, "/lenders/profile")
    }

    pub fn update_lender_profile(
        &self,
        token: &str,
        update: &LenderProfileUpdate,
    ) -> Result<LenderProfile, ApiError> {
        let response = self
            .http
            .patch(self.url("/lenders/profile"))
            .bearer_auth(token)
            .json(update)
            .send()?;
        Self::check(response)?.json().map_err(|_| ApiError::Decode)
    }
}

/// The backend's directory of accounts, as the session layer sees it. A
/// trait so session tests can run against an in-memory directory.
pub trait BackendDirectory {
    fn get_me(&self, id_token: &str) -> Result<BackendUser, ApiError>;
    fn provision(
        &self,
        id_token: &str,
        request: &ProvisionRequest,
    ) -> Result<BackendUser, ApiError>;
}

impl BackendDirectory for AuthApi {
    fn get_me(&self, id_token: &str) -> Result<BackendUser, ApiError> {
        self.get_json(id_token, "/auth/me")
    }

    fn provision(
        &self,
        id_token: &str,
        request: &ProvisionRequest,
    ) -> Result<BackendUser, ApiError> {
        self.post_json(id_token, "/auth/provision", request)
    }
}

/// Pull a human-readable message out of an error body without ever
/// surfacing raw HTML or stack traces to the user.
fn safe_error(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["detail", "error", "message"] {
            if let Some(text) = value.get(key).and_then(|v| v.as_str()) {
                return text.to_string();
            }
        }
    }
    let trimmed = body.trim();
    if trimmed.is_empty() || trimmed.starts_with('<') {
        "request failed".to_string()
    } else {
        trimmed.chars().take(200).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::routing::{get, post};
    use axum::Router;
    use std::net::SocketAddr;

    fn serve(router: Router) -> SocketAddr {
        let (tx, rx) = std::sync::mpsc::channel();
        std::thread::spawn(move || {
            let rt = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .unwrap();
            rt.block_on(async move {
                let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
                tx.send(listener.local_addr().unwrap()).unwrap();
                axum::serve(listener, router).await.unwrap();
            });
        });
        rx.recv().unwrap()
    }

    fn api(addr: SocketAddr) -> AuthApi {
        AuthApi::new(&format!("http://{}", addr), 5).unwrap()
    }

    #[test]
    fn test_safe_error_extraction() {
        assert_eq!(safe_error(r#"{"detail": "Invalid role"}"#), "Invalid role");
        assert_eq!(safe_error(r#"{"error": "nope"}"#), "nope");
        assert_eq!(safe_error("<html><body>502</body></html>"), "request failed");
        assert_eq!(safe_error(""), "request failed");
        assert_eq!(safe_error("plain text"), "plain text");
    }

    #[test]
    fn test_get_me_maps_statuses() {
        let router = Router::new()
            .route(
                "/auth/me",
                get(|| async {
                    r#"{"id": 4, "email": "ada@example.com", "role": "loan_officer", "lender_id": 2}"#
                }),
            );
        let me = api(serve(router)).get_me("token").unwrap();
        assert_eq!(me.id, 4);
        assert_eq!(me.role, Role::Lender);
        assert!(!me.is_admin());

        let missing = Router::new().route("/auth/me", get(|| async { StatusCode::NOT_FOUND }));
        let err = api(serve(missing)).get_me("token").unwrap_err();
        assert!(matches!(err, ApiError::NotFound));

        let disabled = Router::new().route(
            "/auth/me",
            get(|| async {
                (
                    StatusCode::FORBIDDEN,
                    r#"{"detail": "Account deactivated"}"#,
                )
            }),
        );
        let err = api(serve(disabled)).get_me("token").unwrap_err();
        assert!(matches!(err, ApiError::Deactivated));
    }

    #[test]
    fn test_provision_posts_names() {
        let router = Router::new().route(
            "/auth/provision",
            post(|body: String| async move {
                assert!(body.contains("\"given_name\":\"Ada\""));
                assert!(!body.contains("lender_name"));
                r#"{"id": 9, "email": "ada@example.com", "role": "lender", "lender_id": null}"#
            }),
        );
        let request = ProvisionRequest {
            given_name: Some("Ada".to_string()),
            family_name: Some("Lovelace".to_string()),
            ..Default::default()
        };
        let user = api(serve(router)).provision("token", &request).unwrap();
        assert_eq!(user.id, 9);
    }

    #[test]
    fn test_status_error_carries_safe_message() {
        let router = Router::new().route(
            "/auth/invitations",
            get(|| async { (StatusCode::BAD_REQUEST, r#"{"detail": "Invalid email"}"#) }),
        );
        let err = api(serve(router)).invitations("token").unwrap_err();
        match err {
            ApiError::Status { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "Invalid email");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
