use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};

use crate::{error::ApiError, types::LoginPrompt};

/// Failure returned by a request handler.
///
/// Every variant serialises to JSON. A missing or rejected Spotify login is the
/// one case recovered locally: the caller receives a [`LoginPrompt`] with
/// status 200 instead of an error message and can send the user to `/login`.
#[derive(Debug)]
pub enum HandlerError {
    LoginRequired,
    Failed { status: StatusCode, message: String },
}

impl HandlerError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        HandlerError::Failed {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }
}

impl From<ApiError> for HandlerError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Unauthorized => HandlerError::LoginRequired,
            ApiError::RemoteFailure { status, body } => HandlerError::Failed {
                status,
                message: remote_message(&body),
            },
            ApiError::Transport(e) => HandlerError::Failed {
                status: if e.is_timeout() {
                    StatusCode::GATEWAY_TIMEOUT
                } else {
                    StatusCode::BAD_GATEWAY
                },
                message: e.to_string(),
            },
        }
    }
}

impl IntoResponse for HandlerError {
    fn into_response(self) -> Response {
        match self {
            HandlerError::LoginRequired => {
                (StatusCode::OK, Json(LoginPrompt::default())).into_response()
            }
            HandlerError::Failed { status, message } => (
                status,
                Json(json!({ "error": message, "status": status.as_u16() })),
            )
                .into_response(),
        }
    }
}

/// Spotify wraps errors as `{"error": {"status": .., "message": ..}}`.
fn remote_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
        .unwrap_or_else(|| body.to_string())
}
