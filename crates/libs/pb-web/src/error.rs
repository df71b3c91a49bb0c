//! Main Crate Error

use axum::{Json, http::StatusCode, response::IntoResponse};
use serde_json::json;
use tracing::{error, warn};

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Models(#[from] pb_models::error::Error),

    #[error(transparent)]
    Auth(#[from] pb_auth::error::Error),

    #[error("Bad Request {0}")]
    BadRequest(String),

    #[error("Not Found")]
    NotFound,

    #[error("Wrong Credentials")]
    WrongCredentials,

    #[error("Context Missing")]
    CtxMissing,
}

impl IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match &self {
            Error::WrongCredentials => (StatusCode::UNAUTHORIZED, String::from("Invalid credentials")),
            // Every token problem looks the same from the outside.
            Error::CtxMissing => return unauthorized(&self),
            Error::Auth(err) if err.is_token_rejection() => return unauthorized(&self),
            Error::BadRequest(reason) => (StatusCode::BAD_REQUEST, reason.clone()),
            Error::NotFound => (
                StatusCode::NOT_FOUND,
                String::from("The requested resource could not be found"),
            ),
            Error::Auth(_) | Error::Models(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                String::from("Internal server error"),
            ),
        };

        if status.is_server_error() {
            error!("Creating API error response for error: {:?}", self);
        } else {
            warn!("Rejecting request: {}", self);
        }

        let body = Json(json!({
            "error": {
                "message": message,
                "status": status.as_u16()
            }
        }));
        (status, body).into_response()
    }
}

/// `401` with an empty body.
fn unauthorized(err: &Error) -> axum::response::Response {
    warn!("Unauthorized request: {err}");
    StatusCode::UNAUTHORIZED.into_response()
}

#[cfg(test)]
mod test {
    use super::*;
    use axum::body::to_bytes;

    async fn body_of(err: Error) -> (StatusCode, Vec<u8>) {
        let response = err.into_response();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, body.to_vec())
    }

    #[tokio::test]
    async fn test_token_errors_are_empty_unauthorized() {
        let errors = [
            Error::CtxMissing,
            Error::Auth(pb_auth::error::Error::TokenMissing),
            Error::Auth(pb_auth::error::Error::TokenMalformed),
            Error::Auth(pb_auth::error::Error::TokenBadSignature),
            Error::Auth(pb_auth::error::Error::TokenExpired),
            Error::Auth(pb_auth::error::Error::TokenUnsupportedAlgorithm(String::from("none"))),
        ];

        for err in errors {
            let (status, body) = body_of(err).await;
            assert_eq!(status, StatusCode::UNAUTHORIZED);
            assert!(body.is_empty());
        }
    }

    #[tokio::test]
    async fn test_claim_type_error_is_internal() {
        let (status, body) = body_of(Error::Auth(pb_auth::error::Error::ClaimType(
            String::from("user_id"),
        )))
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["error"]["message"], "Internal server error");
    }

    #[tokio::test]
    async fn test_wrong_credentials_leak_nothing() {
        let (status, body) = body_of(Error::WrongCredentials).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(
            body,
            json!({"error": {"message": "Invalid credentials", "status": 401}})
        );
    }
}
