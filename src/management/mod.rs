mod auth;

pub use auth::AuthPhase;
pub use auth::EXPIRY_MARGIN_SECS;
pub use auth::PendingAuthorization;
pub use auth::TokenManager;
