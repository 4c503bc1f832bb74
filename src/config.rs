//! Configuration management for m3u2spotify.
//!
//! This module handles loading and accessing configuration values from environment
//! variables and `.env` files. Spotify credentials, endpoint URLs and the outbound
//! request timeout are collected into a single [`Settings`] value that is built once
//! at startup and handed to the authorization controller and the API client.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults (where applicable)

use std::{env, path::PathBuf, time::Duration};

use reqwest::Url;

use crate::error::ConfigError;

pub const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_SCOPE: &str = "playlist-modify-public";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

/// Loads environment variables from a `.env` file in the local data directory.
///
/// Creates the necessary directory structure if it doesn't exist and loads
/// environment variables from `m3u2spotify/.env` under the platform-specific
/// local data directory:
/// - Linux: `~/.local/share/m3u2spotify/.env`
/// - macOS: `~/Library/Application Support/m3u2spotify/.env`
/// - Windows: `%LOCALAPPDATA%/m3u2spotify/.env`
///
/// A missing file is not an error; variables may come from the process
/// environment alone. Returns the path that was consulted.
///
/// # Errors
///
/// Returns an error string if the directory cannot be created or the file
/// exists but cannot be parsed.
pub async fn load_env() -> Result<PathBuf, String> {
    let path = env_path();
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| e.to_string())?;
    }
    Ok(path)
}

/// Location of the optional `.env` file.
pub fn env_path() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("m3u2spotify/.env");
    path
}

/// Resolved runtime configuration for talking to Spotify.
#[derive(Debug, Clone)]
pub struct Settings {
    /// `SPOTIFY_API_AUTH_CLIENT_ID`, issued by the Spotify developer dashboard.
    pub client_id: String,
    /// `SPOTIFY_API_AUTH_CLIENT_SECRET`. When absent the PKCE variant of the
    /// authorization-code flow is used instead of HTTP Basic client auth.
    pub client_secret: Option<String>,
    /// `SPOTIFY_API_REDIRECT_URI`. Must match the URI registered with Spotify
    /// exactly; defaults to `http://localhost:<port>/callback`.
    pub redirect_uri: String,
    /// `SPOTIFY_API_AUTH_SCOPE`, space separated.
    pub scope: String,
    /// `SPOTIFY_API_AUTH_URL`, the consent page.
    pub auth_url: String,
    /// `SPOTIFY_API_TOKEN_URL`, used for code exchange and refresh.
    pub token_url: String,
    /// `SPOTIFY_API_URL`, base of the Web API.
    pub api_url: String,
    /// `HTTP_TIMEOUT_SECS`, upper bound for every outbound request.
    pub http_timeout: Duration,
}

impl Settings {
    /// Builds settings from the process environment.
    ///
    /// `port` is the local listener port and only feeds the default redirect URI.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::Missing`] if `SPOTIFY_API_AUTH_CLIENT_ID` is unset
    /// - [`ConfigError::Invalid`] if a URL or the timeout cannot be parsed
    pub fn from_env(port: u16) -> Result<Self, ConfigError> {
        let client_id = var("SPOTIFY_API_AUTH_CLIENT_ID")
            .ok_or(ConfigError::Missing("SPOTIFY_API_AUTH_CLIENT_ID"))?;
        let client_secret = var("SPOTIFY_API_AUTH_CLIENT_SECRET");
        let redirect_uri = var("SPOTIFY_API_REDIRECT_URI")
            .unwrap_or_else(|| format!("http://localhost:{port}/callback"));
        let http_timeout = match var("HTTP_TIMEOUT_SECS") {
            Some(raw) => raw
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs)
                .ok_or(ConfigError::Invalid {
                    name: "HTTP_TIMEOUT_SECS",
                    value: raw,
                })?,
            None => Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        };

        let settings = Settings {
            client_id,
            client_secret,
            redirect_uri,
            scope: var("SPOTIFY_API_AUTH_SCOPE").unwrap_or_else(|| DEFAULT_SCOPE.to_string()),
            auth_url: var("SPOTIFY_API_AUTH_URL").unwrap_or_else(|| DEFAULT_AUTH_URL.to_string()),
            token_url: var("SPOTIFY_API_TOKEN_URL")
                .unwrap_or_else(|| DEFAULT_TOKEN_URL.to_string()),
            api_url: var("SPOTIFY_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            http_timeout,
        };
        settings.validate()?;
        Ok(settings)
    }

    /// Checks that every configured endpoint is an absolute URL.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("SPOTIFY_API_REDIRECT_URI", &self.redirect_uri),
            ("SPOTIFY_API_AUTH_URL", &self.auth_url),
            ("SPOTIFY_API_TOKEN_URL", &self.token_url),
            ("SPOTIFY_API_URL", &self.api_url),
        ] {
            if Url::parse(value).is_err() {
                return Err(ConfigError::Invalid {
                    name,
                    value: value.clone(),
                });
            }
        }
        Ok(())
    }

    /// Builds the single outbound HTTP client shared by the controller and the
    /// API client, with the configured timeout applied.
    pub fn http_client(&self) -> Result<reqwest::Client, ConfigError> {
        reqwest::Client::builder()
            .timeout(self.http_timeout)
            .build()
            .map_err(ConfigError::HttpClient)
    }
}

fn var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}
