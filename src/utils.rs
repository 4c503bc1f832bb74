use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::{Rng, distr::Alphanumeric};
use sha2::{Digest, Sha256};

use crate::types::TrackQuery;

const OPEN_URL: &str = "https://open.spotify.com/";

pub fn generate_code_verifier() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(128)
        .map(char::from)
        .collect()
}

pub fn generate_code_challenge(verifier: &str) -> String {
    let hash = Sha256::digest(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hash)
}

/// Random value for the OAuth2 `state` parameter.
pub fn generate_state() -> String {
    let bytes: [u8; 24] = rand::rng().random();
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Parses `.m3u` content into album/title search terms.
///
/// Empty lines and `#` directives are skipped. Each entry is split on `.`,
/// the trailing extension is dropped and the first two parts are taken as
/// album and title.
pub fn parse_m3u(content: &str) -> Vec<TrackQuery> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(|line| {
            let mut parts: Vec<&str> = line.split('.').collect();
            if parts.len() > 1 {
                parts.pop();
            }
            TrackQuery {
                album: parts.first().map(|s| s.trim().to_string()).unwrap_or_default(),
                title: parts.get(1).map(|s| s.trim().to_string()).unwrap_or_default(),
            }
        })
        .collect()
}

/// Normalises a track reference to a Spotify URI.
///
/// URIs pass through unchanged, `open.spotify.com` links (with or without an
/// `intl-xx/` locale segment) and bare IDs are rewritten to `spotify:track:<id>`.
pub fn track_uri(entry: &str) -> String {
    let entry = entry.trim();
    if let Some(id) = open_track_id(entry) {
        return format!("spotify:track:{id}");
    }
    if entry.contains(':') {
        return entry.to_string();
    }
    format!("spotify:track:{entry}")
}

fn open_track_id(entry: &str) -> Option<&str> {
    let mut path = entry.strip_prefix(OPEN_URL)?;
    if path.starts_with("intl-") {
        path = path.split_once('/')?.1;
    }
    let rest = path.strip_prefix("track/")?;
    rest.split(['?', '/']).next()
}
