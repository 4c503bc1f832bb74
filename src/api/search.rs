use axum::{Extension, Json, extract::Query};
use serde_json::Value;

use super::HandlerError;
use crate::{
    server::AppState,
    types::{SearchParams, SearchQuery},
};

/// `GET /search?q=..&n=10&type=track`, proxied to Spotify with `limit = n`.
pub async fn search(
    Extension(state): Extension<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Value>, HandlerError> {
    if params.q.trim().is_empty() {
        return Err(HandlerError::bad_request("query must not be empty"));
    }

    let query = SearchQuery::from(params);
    let results = state.spotify.search(&query).await?;
    Ok(Json(results))
}
