//! HTTP error response mapping.
//!
//! [`ApiError`] always renders the typed mapping (400/409/404/500). When the
//! server runs with [`ErrorStatusPolicy::Compat`], the
//! [`apply_status_policy`] middleware rewrites every error response to
//! `400 Bad Request` carrying the raw error message.

use std::fmt;
use std::str::FromStr;

use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use geostore_domain::error::{GeoStoreError, ValidationError};

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// How error kinds map onto HTTP status codes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorStatusPolicy {
    /// Every failure is `400 Bad Request` with the error message.
    #[default]
    Compat,
    /// Validation 400, conflict 409, not-found 404, storage 500.
    Typed,
}

impl FromStr for ErrorStatusPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "compat" => Ok(Self::Compat),
            "typed" => Ok(Self::Typed),
            other => Err(format!("unknown status code policy: {other}")),
        }
    }
}

impl fmt::Display for ErrorStatusPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Compat => f.write_str("compat"),
            Self::Typed => f.write_str("typed"),
        }
    }
}

/// Full error text, attached to error responses for the compat rewrite.
#[derive(Clone)]
struct RawMessage(String);

/// Maps [`GeoStoreError`] to an HTTP response with appropriate status code.
#[derive(Debug)]
pub struct ApiError(GeoStoreError);

impl From<GeoStoreError> for ApiError {
    fn from(err: GeoStoreError) -> Self {
        Self(err)
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self(err.into())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ValidationError::MalformedBody(rejection.body_text()).into()
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ValidationError::MalformedBody(rejection.body_text()).into()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let raw = self.0.to_string();
        let (status, message) = match &self.0 {
            GeoStoreError::Validation(_) => (StatusCode::BAD_REQUEST, raw.clone()),
            GeoStoreError::Conflict(_) => (StatusCode::CONFLICT, raw.clone()),
            GeoStoreError::NotFound(_) => (StatusCode::NOT_FOUND, raw.clone()),
            GeoStoreError::Storage(err) => {
                tracing::error!(error = %err, "storage error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        let mut response = (status, Json(ErrorBody { error: message })).into_response();
        response.extensions_mut().insert(RawMessage(raw));
        response
    }
}

/// Middleware enforcing the configured [`ErrorStatusPolicy`].
pub async fn apply_status_policy(
    State(policy): State<ErrorStatusPolicy>,
    request: Request,
    next: Next,
) -> Response {
    let response = next.run(request).await;
    if policy == ErrorStatusPolicy::Typed {
        return response;
    }
    match response.extensions().get::<RawMessage>() {
        Some(RawMessage(message)) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorBody {
                error: message.clone(),
            }),
        )
            .into_response(),
        None => response,
    }
}
