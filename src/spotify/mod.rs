//! # Spotify Integration Module
//!
//! This module is the integration layer between m3u2spotify and Spotify's
//! services. It covers the OAuth 2.0 authorization-code flow and the handful of
//! Web API endpoints needed to turn a local playlist into a Spotify playlist.
//!
//! ## Architecture
//!
//! ```text
//! Request handlers (api)
//!          ↓
//! SpotifyClient ──── AuthController (tokens, consent URL, code exchange, refresh)
//!          ↓
//! HTTP Layer (reqwest, JSON, bounded timeout)
//!          ↓
//! Spotify Web API / Accounts service
//! ```
//!
//! ## API Coverage
//!
//! - `GET /search` - track search, [`SpotifyClient::search`]
//! - `GET /me` - current user, [`SpotifyClient::current_user_id`]
//! - `POST /users/{user_id}/playlists` - [`SpotifyClient::create_playlist`]
//! - `POST /playlists/{playlist_id}/tracks` - [`SpotifyClient::add_items`]
//! - `POST /api/token` - code exchange and refresh, see [`auth`]
//!
//! ## Error Handling
//!
//! Every call that needs a user token asks the [`AuthController`] first; when no
//! token is available the call is never sent and fails with
//! [`ApiError::Unauthorized`]. Responses are mapped as follows:
//!
//! - `401 Unauthorized` → [`ApiError::Unauthorized`]
//! - any other non-2xx → [`ApiError::RemoteFailure`] with status and body
//! - connection errors, timeouts and undecodable bodies → [`ApiError::Transport`]
//!
//! Nothing is retried; a failed call is surfaced to the caller immediately.

pub mod auth;
mod playlist;
mod search;
mod user;

use std::sync::Arc;

use reqwest::{Client, RequestBuilder, Response, StatusCode};

use crate::error::ApiError;

pub use auth::AuthController;

/// Client for the Spotify Web API, authenticated through a shared [`AuthController`].
#[derive(Clone)]
pub struct SpotifyClient {
    http: Client,
    api_url: String,
    auth: Arc<AuthController>,
}

impl SpotifyClient {
    pub fn new(http: Client, auth: Arc<AuthController>) -> Self {
        let api_url = auth.settings().api_url.trim_end_matches('/').to_string();
        SpotifyClient {
            http,
            api_url,
            auth,
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.api_url, path)
    }

    /// Attaches the current access token and sends the request.
    async fn send(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        let token = self.auth.current_token().await?;
        let response = request.bearer_auth(&token.access_token).send().await?;
        check_status(response).await
    }
}

async fn check_status(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    if status == StatusCode::UNAUTHORIZED {
        return Err(ApiError::Unauthorized);
    }

    let body = response.text().await.unwrap_or_default();
    Err(ApiError::RemoteFailure { status, body })
}
