use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Access/refresh token pair held in memory for the lifetime of the process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenSet {
    pub access_token: String,
    pub refresh_token: String,
    pub scope: String,
    pub expires_at: DateTime<Utc>,
}

impl TokenSet {
    /// True once `now + margin` has passed the expiry.
    pub fn is_expired(&self, now: DateTime<Utc>, margin: Duration) -> bool {
        now + margin >= self.expires_at
    }
}

/// Body of a successful token endpoint response.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub scope: Option<String>,
    pub expires_in: i64,
}

/// Body of an OAuth2 error response from the token endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenErrorResponse {
    pub error: String,
    #[serde(default)]
    pub error_description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchParams {
    pub q: String,
    #[serde(default = "default_search_limit")]
    pub n: u32,
    #[serde(default = "default_search_type", rename = "type")]
    pub kind: String,
}

fn default_search_limit() -> u32 {
    10
}

fn default_search_type() -> String {
    "track".to_string()
}

/// One search request against Spotify.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub q: String,
    pub limit: u32,
    pub kind: String,
}

impl From<SearchParams> for SearchQuery {
    fn from(params: SearchParams) -> Self {
        SearchQuery {
            q: params.q,
            limit: params.n,
            kind: params.kind,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistRequest {
    pub name: String,
    #[serde(default)]
    pub tracks: Vec<String>,
}

/// Structured reply sent instead of an error when Spotify needs a login first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginPrompt {
    pub error: String,
    pub login_url: String,
}

impl Default for LoginPrompt {
    fn default() -> Self {
        LoginPrompt {
            error: "Please login first".to_string(),
            login_url: "/login".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlaylistRequest {
    pub name: String,
    pub public: bool,
    pub description: String,
}

/// A playlist as returned by Spotify. Fields we do not use are kept verbatim so
/// the object can be handed back to the caller unchanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Playlist {
    pub id: String,
    pub name: String,
    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTrackToPlaylistRequest {
    pub uris: Vec<String>,
}

/// One entry of a `.m3u` file turned into search terms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackQuery {
    pub album: String,
    pub title: String,
}

impl TrackQuery {
    pub fn search_text(&self) -> String {
        format!("{} {}", self.album, self.title).trim().to_string()
    }
}
