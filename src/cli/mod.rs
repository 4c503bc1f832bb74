//! # CLI Module
//!
//! Command implementations behind the `m3u2spotify` binary.
//!
//! - [`serve`] - runs the local web app (the default command)
//! - [`preview`] - shows how a `.m3u` file will be turned into search queries
//!
//! Fatal problems (bad configuration, a port already in use, an account that
//! cannot be resolved) are reported with the `error!` macro, which exits the
//! process with status 1.

mod preview;
mod serve;

pub use preview::preview;
pub use serve::{ServeOptions, serve};
