// External API Fetchers
// Blocking HTTP client for the loan-application backend. Every request
// carries the shared-secret header; responses are normalized here so the
// transformers only ever see well-shaped records.
//
// Failure contract:
//   - 404 means "no such record": detail fetches yield None, collection
//     fetches yield an empty list.
//   - Any other non-2xx status is a hard `FetchError::Status`.
//   - A 2xx body that is not JSON, or a detail body that does not decode,
//     yields the absent value rather than an error.
//   - A 2xx collection body that is JSON but not an array yields an empty
//     list; an array whose elements do not decode is `FetchError::Decode`.

use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::models::{Lender, LoanType, OneOrMany};

pub const SECRET_HEADER: &str = "x-fillout-secret";

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request timed out after {0}s")]
    Timeout(u64),
    #[error("unexpected status {status} from {url}")]
    Status { status: u16, url: String },
    #[error("response from {url} did not match the expected record shape")]
    Decode { url: String },
    #[error("transport error: {0}")]
    Transport(reqwest::Error),
}

/// Client for the loan-application backend.
pub struct ApiClient {
    http: reqwest::blocking::Client,
    base_url: String,
    secret: String,
    timeout_secs: u64,
}

impl ApiClient {
    pub fn new(base_url: &str, secret: &str, timeout_secs: u64) -> Result<Self, FetchError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .map_err(FetchError::Transport)?;
        Ok(ApiClient {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            secret: secret.to_string(),
            timeout_secs,
        })
    }

    fn get(&self, url: &str) -> Result<reqwest::blocking::Response, FetchError> {
        self.http
            .get(url)
            .header(SECRET_HEADER, &self.secret)
            .send()
            .map_err(|e| self.transport(e))
    }

    fn transport(&self, err: reqwest::Error) -> FetchError {
        if err.is_timeout() {
            FetchError::Timeout(self.timeout_secs)
        } else {
            FetchError::Transport(err)
        }
    }

    /// Fetch a single application record. The backend sometimes wraps a
    /// detail response in a one-element array; both shapes are accepted.
    pub fn application<R: DeserializeOwned>(
        &self,
        loan_type: LoanType,
        id: i64,
    ) -> Result<Option<R>, FetchError> {
        let url = format!(
            "{}/applications/{}/{}",
            self.base_url,
            loan_type.endpoint(),
            id
        );
        let response = self.get(&url)?;
        let status = response.status();

        if status.as_u16() == 404 {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url,
            });
        }

        let record = response
            .json::<OneOrMany<R>>()
            .ok()
            .and_then(|payload| payload.into_vec().into_iter().next());
        Ok(record)
    }

    /// Fetch all records of one application type.
    pub fn applications<R: DeserializeOwned>(
        &self,
        loan_type: LoanType,
    ) -> Result<Vec<R>, FetchError> {
        let url = format!("{}/applications/{}", self.base_url, loan_type.endpoint());
        self.collection(&url)
    }

    /// Fetch the lenders matched against one application.
    pub fn matching_lenders(
        &self,
        loan_type: LoanType,
        id: i64,
    ) -> Result<Vec<Lender>, FetchError> {
        let url = format!(
            "{}/applications/{}/{}/matching-lenders",
            self.base_url,
            loan_type.slug(),
            id
        );
        self.collection(&url)
    }

    pub fn lenders(&self) -> Result<Vec<Lender>, FetchError> {
        let url = format!("{}/lenders", self.base_url);
        self.collection(&url)
    }

    pub fn lender(&self, id: i64) -> Result<Option<Lender>, FetchError> {
        let url = format!("{}/lenders/{}", self.base_url, id);
        let response = self.get(&url)?;
        let status = response.status();

        if status.as_u16() == 404 {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url,
            });
        }

        let record = response
            .json::<OneOrMany<Lender>>()
            .ok()
            .and_then(|payload| payload.into_vec().into_iter().next());
        Ok(record)
    }

    fn collection<R: DeserializeOwned>(&self, url: &str) -> Result<Vec<R>, FetchError> {
        let response = self.get(url)?;
        let status = response.status();

        if status.as_u16() == 404 {
            return Ok(Vec::new());
        }
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let Ok(value) = response.json::<serde_json::Value>() else {
            return Ok(Vec::new());
        };
        if !value.is_array() {
            return Ok(Vec::new());
        }
        serde_json::from_value(value).map_err(|_| FetchError::Decode {
            url: url.to_string(),
        })
    }
}

/// Degrade a collection fetch to an empty page, logging the failure. Detail
/// fetches stay fail-fast; list pages render empty instead of crashing the
/// dashboard.
pub fn or_empty<T>(what: &str, result: Result<Vec<T>, FetchError>) -> Vec<T> {
    match result {
        Ok(records) => records,
        Err(err) => {
            tracing::warn!("failed to fetch {}: {}", what, err);
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CommercialAcquisition;
    use axum::extract::Request;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use axum::routing::get;
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

    fn client(addr: SocketAddr) -> ApiClient {
        ApiClient::new(&format!("http://{}", addr), "hunter2", 5).unwrap()
    }

    #[test]
    fn test_detail_shapes() {
        let router = Router::new()
            .route(
                "/applications/commercial_acquisition/1",
                get(|| async { r#"{"id": 1, "email": "a@b.co"}"# }),
            )
            .route(
                "/applications/commercial_acquisition/2",
                get(|| async { r#"[{"id": 2}]"# }),
            )
            .route(
                "/applications/commercial_acquisition/3",
                get(|| async { StatusCode::NOT_FOUND }),
            )
            .route(
                "/applications/commercial_acquisition/4",
                get(|| async { "not json at all" }),
            );
        let api = client(serve(router));

        let one: Option<CommercialAcquisition> = api
            .application(LoanType::CommercialAcquisition, 1)
            .unwrap();
        assert_eq!(one.unwrap().email.as_deref(), Some("a@b.co"));

        // Single-element array unwraps to the record
        let wrapped: Option<CommercialAcquisition> = api
            .application(LoanType::CommercialAcquisition, 2)
            .unwrap();
        assert_eq!(wrapped.unwrap().id, 2);

        let missing: Option<CommercialAcquisition> = api
            .application(LoanType::CommercialAcquisition, 3)
            .unwrap();
        assert!(missing.is_none());

        let garbled: Option<CommercialAcquisition> = api
            .application(LoanType::CommercialAcquisition, 4)
            .unwrap();
        assert!(garbled.is_none());
    }

    #[test]
    fn test_detail_server_error_is_status() {
        let router = Router::new().route(
            "/applications/commercial_acquisition/1",
            get(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
        );
        let api = client(serve(router));
        let err = api
            .application::<CommercialAcquisition>(LoanType::CommercialAcquisition, 1)
            .unwrap_err();
        assert!(matches!(err, FetchError::Status { status: 500, .. }));
    }

    #[test]
    fn test_collection_shapes() {
        let router = Router::new()
            .route(
                "/applications/commercial_acquisition",
                get(|| async { r#"[{"id": 1}, {"id": 2}]"# }),
            )
            .route(
                "/applications/commercial_construction",
                get(|| async { r#"{"message": "maintenance"}"# }),
            )
            .route(
                "/applications/commercial_refinance",
                get(|| async { StatusCode::NOT_FOUND }),
            );
        let api = client(serve(router));

        let many: Vec<CommercialAcquisition> =
            api.applications(LoanType::CommercialAcquisition).unwrap();
        assert_eq!(many.len(), 2);

        // Non-array 2xx bodies degrade to an empty page
        let object: Vec<CommercialAcquisition> =
            api.applications(LoanType::CommercialConstruction).unwrap();
        assert!(object.is_empty());

        let gone: Vec<CommercialAcquisition> =
            api.applications(LoanType::CommercialRefinance).unwrap();
        assert!(gone.is_empty());
    }

    #[test]
    fn test_collection_with_bad_elements_is_decode_error() {
        let router = Router::new().route(
            "/applications/commercial_acquisition",
            get(|| async { r#"[{"id": "not-a-number"}]"# }),
        );
        let api = client(serve(router));
        let err = api
            .applications::<CommercialAcquisition>(LoanType::CommercialAcquisition)
            .unwrap_err();
        assert!(matches!(err, FetchError::Decode { .. }));
    }

    #[test]
    fn test_secret_header_is_sent() {
        let router = Router::new().route(
            "/lenders",
            get(|request: Request| async move {
                let secret = request
                    .headers()
                    .get(SECRET_HEADER)
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or_default()
                    .to_string();
                if secret == "hunter2" {
                    "[]".into_response()
                } else {
                    StatusCode::UNAUTHORIZED.into_response()
                }
            }),
        );
        let addr = serve(router);
        assert!(client(addr).lenders().unwrap().is_empty());

        let wrong = ApiClient::new(&format!("http://{}", addr), "wrong", 5).unwrap();
        let err = wrong.lenders().unwrap_err();
        assert!(matches!(err, FetchError::Status { status: 401, .. }));
    }

    #[test]
    fn test_slow_backend_maps_to_timeout() {
        let router = Router::new().route(
            "/lenders",
            get(|| async {
                tokio::time::sleep(std::time::Duration::from_secs(5)).await;
                "[]"
            }),
        );
        let addr = serve(router);
        let api = ApiClient::new(&format!("http://{}", addr), "hunter2", 1).unwrap();
        let err = api.lenders().unwrap_err();
        assert!(matches!(err, FetchError::Timeout(1)));
    }

    #[test]
    fn test_matching_lenders_path_uses_dashed_slug() {
        let router = Router::new().route(
            "/applications/commercial-acquisition/7/matching-lenders",
            get(|| async { r#"[{"id": 5, "lender_name": "Bridgewater"}]"# }),
        );
        let api = client(serve(router));
        let lenders = api
            .matching_lenders(LoanType::CommercialAcquisition, 7)
            .unwrap();
        assert_eq!(lenders.len(), 1);
        assert_eq!(lenders[0].lender_name.as_deref(), Some("Bridgewater"));
    }

    #[test]
    fn test_or_empty_degrades_to_empty() {
        let ok: Result<Vec<i64>, FetchError> = Ok(vec![1, 2]);
        assert_eq!(or_empty("lenders", ok), vec![1, 2]);

        let err: Result<Vec<i64>, FetchError> = Err(FetchError::Timeout(15));
        assert!(or_empty("lenders", err).is_empty());
    }
}
