use axum::{Extension, response::Json};
use serde_json::{Value, json};

use crate::server::AppState;

pub async fn health(Extension(state): Extension<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "authorized": state.auth.is_authorized().await,
    }))
}
