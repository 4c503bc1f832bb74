#![allow(dead_code)]

use std::{path::Path, sync::Arc, time::Duration};

use httpmock::prelude::*;
use m3u2spotify::{
    config::Settings,
    server::{self, AppState},
    spotify::AuthController,
};
use serde_json::json;
use tokio::net::TcpListener;

pub const CLIENT_ID: &str = "client-id";
pub const CLIENT_SECRET: &str = "client-secret";
pub const VALID_CODE: &str = "good-code";
pub const INVALID_CODE: &str = "bad-code";
pub const ACCESS_TOKEN: &str = "access-1";

pub fn settings(server: &MockServer, secret: Option<&str>) -> Settings {
    Settings {
        client_id: CLIENT_ID.to_string(),
        client_secret: secret.map(str::to_string),
        redirect_uri: "http://localhost:8000/callback".to_string(),
        scope: "playlist-modify-public".to_string(),
        auth_url: server.url("/authorize"),
        token_url: server.url("/api/token"),
        api_url: server.url("/v1"),
        http_timeout: Duration::from_secs(5),
    }
}

pub fn controller(settings: Settings) -> (Arc<AuthController>, reqwest::Client) {
    let http = settings
        .http_client()
        .expect("HTTP client should build for tests.");
    let auth = AuthController::new(settings, http.clone()).expect("Controller should build.");
    (Arc::new(auth), http)
}

/// Token endpoint that accepts [`VALID_CODE`] and rejects [`INVALID_CODE`]
/// with an OAuth2 error body. Unmatched requests get httpmock's 404.
pub async fn mock_token_endpoint(server: &MockServer) {
    server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/token")
                .form_urlencoded_tuple("grant_type", "authorization_code")
                .form_urlencoded_tuple("code", VALID_CODE);
            then.status(200).json_body(json!({
                "access_token": ACCESS_TOKEN,
                "token_type": "Bearer",
                "scope": "playlist-modify-public",
                "expires_in": 3600,
                "refresh_token": "refresh-1"
            }));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/token")
                .form_urlencoded_tuple("code", INVALID_CODE);
            then.status(400).json_body(json!({
                "error": "invalid_grant",
                "error_description": "Invalid authorization code"
            }));
        })
        .await;
}

/// A controller that has already completed the login round trip.
pub async fn authorized(server: &MockServer) -> (Arc<AuthController>, reqwest::Client) {
    mock_token_endpoint(server).await;
    let (auth, http) = controller(settings(server, Some(CLIENT_SECRET)));
    auth.complete_authorization(VALID_CODE, None)
        .await
        .expect("Code exchange should succeed against the mock.");
    (auth, http)
}

/// Serves the full router on an ephemeral local port and returns its base URL.
pub async fn spawn_app(server: &MockServer) -> String {
    let (auth, http) = controller(settings(server, Some(CLIENT_SECRET)));
    let state = AppState::new(auth, http);
    let public_dir = Path::new(concat!(env!("CARGO_MANIFEST_DIR"), "/public"));
    let app = server::router(state, public_dir);

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Test listener should bind.");
    let addr = listener.local_addr().expect("Listener should have an address.");
    tokio::spawn(async move { axum::serve(listener, app).await });
    format!("http://{addr}")
}

/// Browser stand-in that does not follow redirects.
pub fn browser() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .expect("Test client should build.")
}
