//! # API Module
//!
//! HTTP endpoints of the local web app. Handlers are thin: they translate
//! query strings and JSON bodies into typed requests, call the
//! [`AuthController`](crate::spotify::AuthController) or the
//! [`SpotifyClient`](crate::spotify::SpotifyClient) held in
//! [`AppState`](crate::server::AppState), and map failures through [`HandlerError`].
//!
//! ## Endpoints
//!
//! - [`search`] - `GET /search`, track search proxied to Spotify
//! - [`login`] - `GET /login`, redirect to Spotify's consent page
//! - [`callback`] - `GET /callback`, completes the authorization-code exchange
//! - [`create_playlist`] - `POST /playlist`, creates and fills a playlist
//! - [`health`] - `GET /health`, status, version and login state
//!
//! ## Login round trip
//!
//! When a call needs a Spotify login that is missing or no longer valid, the
//! handler answers `200` with `{"error": "Please login first", "login_url": "/login"}`.
//! The front-end keeps its pending data, sends the user through `/login`, and
//! retries after Spotify redirects back to `/callback` and then `/`. The server
//! never retries on its own.

mod callback;
mod error;
mod health;
mod playlist;
mod search;

pub use callback::{callback, login};
pub use error::HandlerError;
pub use health::health;
pub use playlist::create_playlist;
pub use search::search;
