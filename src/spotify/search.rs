use serde_json::Value;

use super::SpotifyClient;
use crate::{error::ApiError, types::SearchQuery};

impl SpotifyClient {
    /// Runs a catalogue search and returns Spotify's payload unmodified.
    ///
    /// Spotify's search endpoint rejects requests without a bearer token, so a
    /// missing login surfaces as [`ApiError::Unauthorized`] like every other call.
    pub async fn search(&self, query: &SearchQuery) -> Result<Value, ApiError> {
        let limit = query.limit.to_string();
        let request = self.http.get(self.endpoint("/search")).query(&[
            ("q", query.q.as_str()),
            ("limit", limit.as_str()),
            ("type", query.kind.as_str()),
        ]);

        let response = self.send(request).await?;
        Ok(response.json::<Value>().await?)
    }
}
