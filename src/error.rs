//! Error types shared by the authorization flow, the Spotify client and
//! configuration loading.

use reqwest::StatusCode;
use thiserror::Error;

/// Failures of the OAuth2 authorization-code flow.
#[derive(Debug, Error)]
pub enum AuthError {
    /// No token has been obtained yet (or it was dropped after a failed refresh).
    #[error("Not authenticated with Spotify.")]
    NotAuthenticated,
    /// The authorization code could not be exchanged for tokens.
    #[error("Authorization code exchange failed: {0}.")]
    ExchangeFailed(String),
    /// The refresh token was rejected or the refresh request failed.
    #[error("Token refresh failed: {0}.")]
    RefreshFailed(String),
}

/// Failures of calls against the Spotify Web API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Spotify answered 401 or no usable token was available.
    #[error("Spotify rejected the request as unauthorized.")]
    Unauthorized,
    /// Spotify answered with any other non-success status.
    #[error("Spotify responded with {status}: {body}")]
    RemoteFailure { status: StatusCode, body: String },
    /// DNS, TCP, TLS, timeout or an undecodable response body.
    #[error("Request to Spotify failed: {0}")]
    Transport(#[from] reqwest::Error),
}

impl From<AuthError> for ApiError {
    fn from(_: AuthError) -> Self {
        ApiError::Unauthorized
    }
}

/// Missing or malformed process configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{name} has an invalid value `{value}`")]
    Invalid { name: &'static str, value: String },
    #[error("HTTP client could not be constructed: {0}")]
    HttpClient(#[source] reqwest::Error),
}
