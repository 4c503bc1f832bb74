//! m3u2spotify library
//!
//! A small local web app that turns a `.m3u` playlist into a Spotify playlist.
//! It performs the OAuth 2.0 authorization-code login with Spotify, proxies
//! track searches, and creates playlists for the logged-in account.
//!
//! # Modules
//!
//! - `api` - HTTP endpoints (`/search`, `/login`, `/callback`, `/playlist`, `/health`)
//! - `cli` - Command implementations behind the binary
//! - `config` - Configuration from environment variables and `.env` files
//! - `error` - Error types for the login flow, the Spotify client and configuration
//! - `logging` - Tracing subscriber setup
//! - `management` - In-memory token store
//! - `server` - Router, shared state and listener
//! - `spotify` - Spotify Web API client and authorization flow
//! - `types` - Data structures and type definitions
//! - `utils` - PKCE helpers, `.m3u` parsing and track URI normalisation
//!
//! # Example
//!
//! ```
//! use m3u2spotify::{config, cli};
//!
//! #[tokio::main]
//! async fn main() {
//!     config::load_env().await.ok();
//!     cli::serve(cli::ServeOptions {
//!         port: 8000,
//!         open_browser: true,
//!         public_dir: "public".into(),
//!     })
//!     .await;
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod management;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;

/// Prints an informational message with a blue bullet point.
///
/// Accepts the same arguments as `println!`.
///
/// ```
/// info!("Starting server at {}", url);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// ```
/// success!("Logged in to Spotify as {}", user_id);
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Terminates the process with exit code 1 right after printing, so it is only
/// used for fatal errors where recovery is not possible. The expansion has
/// type `!` and can stand in any expression position.
///
/// ```
/// error!("Invalid configuration: {}", e);
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// ```
/// warning!("Failed to open browser. Please navigate to {} manually.", url);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
