use super::SpotifyClient;
use crate::{
    error::ApiError,
    types::{AddTrackToPlaylistRequest, CreatePlaylistRequest, Playlist},
};

/// Spotify accepts at most this many URIs per add-items request.
const MAX_ITEMS_PER_REQUEST: usize = 100;

const PLAYLIST_DESCRIPTION: &str = "Imported from an .m3u playlist";

impl SpotifyClient {
    /// Creates an empty playlist owned by `owner_id`.
    ///
    /// # Arguments
    ///
    /// * `owner_id` - Spotify user id, as returned by [`current_user_id`](Self::current_user_id)
    /// * `name` - Display name of the new playlist
    /// * `public` - Whether the playlist is listed on the user's profile
    ///
    /// # Returns
    ///
    /// The created [`Playlist`], including every field Spotify sent back.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Unauthorized`] if no valid token is available or Spotify answers 401
    /// - [`ApiError::RemoteFailure`] for any other rejected request
    /// - [`ApiError::Transport`] for network failures and timeouts
    pub async fn create_playlist(
        &self,
        owner_id: &str,
        name: &str,
        public: bool,
    ) -> Result<Playlist, ApiError> {
        let body = CreatePlaylistRequest {
            name: name.to_string(),
            public,
            description: PLAYLIST_DESCRIPTION.to_string(),
        };
        let request = self
            .http
            .post(self.endpoint(&format!("/users/{owner_id}/playlists")))
            .json(&body);

        let playlist = self.send(request).await?.json::<Playlist>().await?;
        tracing::info!(playlist_id = %playlist.id, "playlist created");
        Ok(playlist)
    }

    /// Appends tracks to a playlist, preserving their order.
    ///
    /// URIs are sent in batches of 100, the maximum Spotify accepts per
    /// request. An empty list sends nothing.
    pub async fn add_items(&self, playlist_id: &str, uris: &[String]) -> Result<(), ApiError> {
        let url = self.endpoint(&format!("/playlists/{playlist_id}/tracks"));
        for chunk in uris.chunks(MAX_ITEMS_PER_REQUEST) {
            let body = AddTrackToPlaylistRequest {
                uris: chunk.to_vec(),
            };
            self.send(self.http.post(&url).json(&body)).await?;
        }

        tracing::info!(playlist_id, count = uris.len(), "tracks added to playlist");
        Ok(())
    }
}
