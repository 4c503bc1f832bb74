mod common;

use common::*;
use httpmock::prelude::*;
use reqwest::{StatusCode, Url, header::LOCATION};
use serde_json::{Value, json};

/// Walks through `/login` and `/callback` the way a browser would.
async fn login(app: &str, code: &str) -> reqwest::Response {
    let browser = browser();
    let response = browser
        .get(format!("{app}/login"))
        .send()
        .await
        .expect("Login request should succeed.");
    assert_eq!(response.status(), StatusCode::FOUND);

    let consent = Url::parse(
        response.headers()[LOCATION]
            .to_str()
            .expect("Location should be ASCII."),
    )
    .expect("Location should be an absolute URL.");
    let state = consent
        .query_pairs()
        .find(|(k, _)| k == "state")
        .map(|(_, v)| v.into_owned())
        .expect("Consent URL should carry a state.");

    browser
        .get(format!("{app}/callback"))
        .query(&[("code", code), ("state", state.as_str())])
        .send()
        .await
        .expect("Callback request should succeed.")
}

async fn post_playlist(app: &str, body: Value) -> reqwest::Response {
    browser()
        .post(format!("{app}/playlist"))
        .json(&body)
        .send()
        .await
        .expect("Playlist request should succeed.")
}

#[tokio::test]
async fn playlist_without_login_returns_login_prompt() {
    let server = MockServer::start_async().await;
    let create = server
        .mock_async(|when, then| {
            when.method(POST).path("/v1/users/user-1/playlists");
            then.status(201).json_body(json!({ "id": "pl-1", "name": "Test" }));
        })
        .await;
    let app = spawn_app(&server).await;

    let response = post_playlist(
        &app,
        json!({ "name": "Test", "tracks": ["uri:track:1", "uri:track:2"] }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("Body should be JSON.");
    assert_eq!(
        body,
        json!({ "error": "Please login first", "login_url": "/login" })
    );
    create.assert_hits_async(0).await;
}

#[tokio::test]
async fn login_redirects_to_consent_page() {
    let server = MockServer::start_async().await;
    let app = spawn_app(&server).await;

    let response = browser()
        .get(format!("{app}/login"))
        .send()
        .await
        .expect("Login request should succeed.");

    assert_eq!(response.status(), StatusCode::FOUND);
    let location = response.headers()[LOCATION].to_str().unwrap_or_default();
    assert!(location.starts_with(&server.url("/authorize")));
    assert!(location.contains("scope=playlist-modify-public"));
}

#[tokio::test]
async fn playlist_after_login_creates_then_adds_tracks() {
    let server = MockServer::start_async().await;
    mock_token_endpoint(&server).await;
    let me = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/v1/me")
                .header("authorization", format!("Bearer {ACCESS_TOKEN}"));
            then.status(200).json_body(json!({ "id": "user-1" }));
        })
        .await;
    let create = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/v1/users/user-1/playlists")
                .json_body(json!({
                    "name": "Test",
                    "public": true,
                    "description": "Imported from an .m3u playlist"
                }));
            then.status(201).json_body(json!({
                "id": "pl-1",
                "name": "Test",
                "public": true,
                "owner": { "id": "user-1" }
            }));
        })
        .await;
    let add = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/v1/playlists/pl-1/tracks")
                .json_body(json!({ "uris": ["uri:track:1", "uri:track:2"] }));
            then.status(201).json_body(json!({ "snapshot_id": "snap" }));
        })
        .await;
    let app = spawn_app(&server).await;

    let callback = login(&app, VALID_CODE).await;
    assert_eq!(callback.status(), StatusCode::FOUND);
    assert_eq!(callback.headers()[LOCATION], "/");

    let response = post_playlist(
        &app,
        json!({ "name": "Test", "tracks": ["uri:track:1", "uri:track:2"] }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("Body should be JSON.");
    assert_eq!(
        body,
        json!({ "id": "pl-1", "name": "Test", "public": true, "owner": { "id": "user-1" } })
    );
    me.assert_async().await;
    create.assert_async().await;
    add.assert_async().await;

    // The owner lookup is cached
    post_playlist(&app, json!({ "name": "Test", "tracks": [] })).await;
    me.assert_hits_async(1).await;
}

#[tokio::test]
async fn bare_track_ids_are_sent_as_uris() {
    let server = MockServer::start_async().await;
    mock_token_endpoint(&server).await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/v1/me");
            then.status(200).json_body(json!({ "id": "user-1" }));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/v1/users/user-1/playlists");
            then.status(201).json_body(json!({ "id": "pl-1", "name": "Ids" }));
        })
        .await;
    let add = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/v1/playlists/pl-1/tracks")
                .json_body(json!({ "uris": ["spotify:track:4uLU6hMCjMI75M1A2tKUQC"] }));
            then.status(201).json_body(json!({ "snapshot_id": "snap" }));
        })
        .await;
    let app = spawn_app(&server).await;
    login(&app, VALID_CODE).await;

    let response = post_playlist(
        &app,
        json!({ "name": "Ids", "tracks": ["4uLU6hMCjMI75M1A2tKUQC", ""] }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    add.assert_async().await;
}

#[tokio::test]
async fn revoked_token_during_create_returns_login_prompt() {
    let server = MockServer::start_async().await;
    mock_token_endpoint(&server).await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/v1/me");
            then.status(200).json_body(json!({ "id": "user-1" }));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/v1/users/user-1/playlists");
            then.status(401)
                .json_body(json!({ "error": { "status": 401, "message": "Invalid access token" } }));
        })
        .await;
    let app = spawn_app(&server).await;
    login(&app, VALID_CODE).await;

    let response = post_playlist(&app, json!({ "name": "Test", "tracks": ["uri:track:1"] })).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("Body should be JSON.");
    assert_eq!(
        body,
        json!({ "error": "Please login first", "login_url": "/login" })
    );
}

#[tokio::test]
async fn remote_failure_propagates_status_and_message() {
    let server = MockServer::start_async().await;
    mock_token_endpoint(&server).await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/v1/me");
            then.status(200).json_body(json!({ "id": "user-1" }));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/v1/users/user-1/playlists");
            then.status(403)
                .json_body(json!({ "error": { "status": 403, "message": "Insufficient client scope" } }));
        })
        .await;
    let app = spawn_app(&server).await;
    login(&app, VALID_CODE).await;

    let response = post_playlist(&app, json!({ "name": "Test", "tracks": [] })).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body: Value = response.json().await.expect("Body should be JSON.");
    assert_eq!(
        body,
        json!({ "error": "Insufficient client scope", "status": 403 })
    );
}

#[tokio::test]
async fn search_forwards_n_as_limit() {
    let server = MockServer::start_async().await;
    mock_token_endpoint(&server).await;
    let payload = json!({ "tracks": { "items": [{ "id": "t1" }, { "id": "t2" }] } });
    let search = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/v1/search")
                .query_param("q", "foo")
                .query_param("limit", "5")
                .query_param("type", "track");
            then.status(200).json_body(payload.clone());
        })
        .await;
    let app = spawn_app(&server).await;
    login(&app, VALID_CODE).await;

    let response = browser()
        .get(format!("{app}/search?q=foo&n=5"))
        .send()
        .await
        .expect("Search request should succeed.");

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("Body should be JSON.");
    assert_eq!(body, payload);
    search.assert_async().await;
}

#[tokio::test]
async fn search_defaults_and_login_prompt() {
    let server = MockServer::start_async().await;
    let app = spawn_app(&server).await;

    let response = browser()
        .get(format!("{app}/search?q=foo"))
        .send()
        .await
        .expect("Search request should succeed.");

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("Body should be JSON.");
    assert_eq!(body["login_url"], "/login");
}

#[tokio::test]
async fn callback_failures_render_error_page() {
    let server = MockServer::start_async().await;
    mock_token_endpoint(&server).await;
    let app = spawn_app(&server).await;

    let rejected = login(&app, INVALID_CODE).await;
    assert_eq!(rejected.status(), StatusCode::BAD_REQUEST);
    let page = rejected.text().await.unwrap_or_default();
    assert!(page.contains("Login failed"));
    assert!(page.contains("invalid_grant"));

    let denied = browser()
        .get(format!("{app}/callback?error=access_denied"))
        .send()
        .await
        .expect("Callback request should succeed.");
    assert_eq!(denied.status(), StatusCode::BAD_REQUEST);

    let missing = browser()
        .get(format!("{app}/callback"))
        .send()
        .await
        .expect("Callback request should succeed.");
    assert_eq!(missing.status(), StatusCode::BAD_REQUEST);

    // A failed callback leaves the login retryable
    let retried = login(&app, VALID_CODE).await;
    assert_eq!(retried.status(), StatusCode::FOUND);
}

#[tokio::test]
async fn health_reports_login_state() {
    let server = MockServer::start_async().await;
    mock_token_endpoint(&server).await;
    let app = spawn_app(&server).await;

    let health: Value = browser()
        .get(format!("{app}/health"))
        .send()
        .await
        .expect("Health request should succeed.")
        .json()
        .await
        .expect("Body should be JSON.");
    assert_eq!(health["status"], "ok");
    assert_eq!(health["authorized"], false);

    login(&app, VALID_CODE).await;

    let health: Value = browser()
        .get(format!("{app}/health"))
        .send()
        .await
        .expect("Health request should succeed.")
        .json()
        .await
        .expect("Body should be JSON.");
    assert_eq!(health["authorized"], true);
}

#[tokio::test]
async fn root_serves_front_end() {
    let server = MockServer::start_async().await;
    let app = spawn_app(&server).await;

    let response = browser()
        .get(format!("{app}/"))
        .send()
        .await
        .expect("Root request should succeed.");

    assert_eq!(response.status(), StatusCode::OK);
    let page = response.text().await.unwrap_or_default();
    assert!(page.contains("fileInput"));
}

#[tokio::test]
async fn front_end_script_resumes_after_login() {
    let server = MockServer::start_async().await;
    let app = spawn_app(&server).await;

    let response = browser()
        .get(format!("{app}/js/app.js"))
        .send()
        .await
        .expect("Script request should succeed.");

    assert_eq!(response.status(), StatusCode::OK);
    let script = response.text().await.unwrap_or_default();
    assert!(script.contains("isLoading: false"));
    assert!(script.contains("resumePending"));
    assert!(script.contains("searchTrack(index)"));
}
