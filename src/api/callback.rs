use axum::{
    Extension,
    extract::Query,
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
};

use crate::{server::AppState, types::CallbackParams};

/// `GET /login`: sends the browser to Spotify's consent page.
pub async fn login(Extension(state): Extension<AppState>) -> Response {
    let url = state.auth.begin_authorization().await;
    found(url.as_str())
}

/// `GET /callback`: Spotify redirects here with `code` and `state` once the
/// user has granted (or denied) access.
pub async fn callback(
    Extension(state): Extension<AppState>,
    Query(params): Query<CallbackParams>,
) -> Response {
    if let Some(error) = params.error {
        tracing::warn!(%error, "authorization denied by provider");
        return failure_page(&format!("Spotify reported: {error}"));
    }

    let Some(code) = params.code else {
        return failure_page("The callback carried no authorization code.");
    };

    match state
        .auth
        .complete_authorization(&code, params.state.as_deref())
        .await
    {
        Ok(_) => found("/"),
        Err(e) => failure_page(&e.to_string()),
    }
}

fn found(location: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location.to_string())]).into_response()
}

fn failure_page(reason: &str) -> Response {
    let body = format!(
        "<h2>Login failed.</h2><p>{}</p><p><a href=\"/login\">Try again</a></p>",
        escape(reason)
    );
    (StatusCode::BAD_REQUEST, Html(body)).into_response()
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
