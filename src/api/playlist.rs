use axum::{Extension, Json};

use super::HandlerError;
use crate::{
    server::AppState,
    types::{Playlist, PlaylistRequest},
    utils,
};

/// `POST /playlist`: creates a public playlist for the logged-in user and fills
/// it with the requested tracks.
///
/// A missing login never surfaces as an error: the response is the
/// `{"error": "Please login first", "login_url": "/login"}` prompt so the
/// front-end can send the user through `/login` and retry with the same data.
pub async fn create_playlist(
    Extension(state): Extension<AppState>,
    Json(request): Json<PlaylistRequest>,
) -> Result<Json<Playlist>, HandlerError> {
    let name = request.name.trim();
    if name.is_empty() {
        return Err(HandlerError::bad_request("playlist name must not be empty"));
    }

    let uris: Vec<String> = request
        .tracks
        .iter()
        .filter(|t| !t.trim().is_empty())
        .map(|t| utils::track_uri(t))
        .collect();

    let owner = state.owner_id().await?;
    let playlist = state.spotify.create_playlist(&owner, name, true).await?;
    state.spotify.add_items(&playlist.id, &uris).await?;

    Ok(Json(playlist))
}
