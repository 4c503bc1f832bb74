use chrono::{DateTime, Duration, Utc};

use crate::types::TokenSet;

/// Tokens are treated as expired this long before Spotify would reject them.
pub const EXPIRY_MARGIN_SECS: i64 = 60;

/// Where the authorization flow currently stands.
///
/// A rejected refresh drops the token and normally leaves `NoToken`. If a
/// login started through `/login` is still outstanding the phase reads
/// `AwaitingCallback` instead, and that login can still complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthPhase {
    NoToken,
    AwaitingCallback,
    Authorized,
    Expired,
}

/// Values sent to the consent page that must come back on the callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingAuthorization {
    pub state: String,
    /// Only set for PKCE, i.e. when no client secret is configured.
    pub code_verifier: Option<String>,
}

/// In-memory token store. Nothing here is ever written to disk.
#[derive(Debug, Default)]
pub struct TokenManager {
    token: Option<TokenSet>,
    pending: Option<PendingAuthorization>,
}

impl TokenManager {
    pub fn new() -> Self {
        TokenManager::default()
    }

    pub fn phase(&self, now: DateTime<Utc>) -> AuthPhase {
        match (&self.token, &self.pending) {
            (Some(token), _) if token.is_expired(now, Self::margin()) => AuthPhase::Expired,
            (Some(_), _) => AuthPhase::Authorized,
            (None, Some(_)) => AuthPhase::AwaitingCallback,
            (None, None) => AuthPhase::NoToken,
        }
    }

    pub fn current_token(&self) -> Option<&TokenSet> {
        self.token.as_ref()
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.token
            .as_ref()
            .is_some_and(|token| token.is_expired(now, Self::margin()))
    }

    /// Stores a freshly obtained token and ends any pending authorization.
    pub fn store(&mut self, token: TokenSet) {
        self.token = Some(token);
        self.pending = None;
    }

    /// Replaces the token after a refresh; a pending re-login stays untouched.
    pub fn replace(&mut self, token: TokenSet) {
        self.token = Some(token);
    }

    pub fn clear_token(&mut self) {
        self.token = None;
    }

    pub fn pending(&self) -> Option<&PendingAuthorization> {
        self.pending.as_ref()
    }

    /// Returns the pending authorization, creating it on first use so that
    /// repeated logins reuse the same `state` and verifier.
    pub fn pending_or_insert_with(
        &mut self,
        create: impl FnOnce() -> PendingAuthorization,
    ) -> &PendingAuthorization {
        self.pending.get_or_insert_with(create)
    }

    fn margin() -> Duration {
        Duration::seconds(EXPIRY_MARGIN_SECS)
    }
}
