use chrono::{Duration, Utc};
use reqwest::{Client, Url};
use tokio::sync::Mutex;

use crate::{
    config::Settings,
    error::{AuthError, ConfigError},
    management::{AuthPhase, PendingAuthorization, TokenManager},
    types::{TokenErrorResponse, TokenResponse, TokenSet},
    utils,
};

/// Drives the OAuth 2.0 authorization-code flow against Spotify's accounts service.
///
/// The controller is created once per process and shared by every request
/// handler. The code exchange happens on the `/callback` request, which is a
/// different request than the one that discovered the missing token, so the
/// token state has to live here rather than in any single request.
///
/// # Flow
///
/// 1. [`begin_authorization`](Self::begin_authorization) builds the consent URL
///    and records a pending authorization (`state`, and a PKCE verifier when no
///    client secret is configured)
/// 2. Spotify redirects the browser back with `code` and `state`
/// 3. [`complete_authorization`](Self::complete_authorization) checks `state` and
///    exchanges the code for a [`TokenSet`]
/// 4. [`current_token`](Self::current_token) hands out the token, refreshing it
///    silently once it is about to expire
///
/// # Concurrency
///
/// All reads and writes of the token state go through a single async mutex that
/// stays locked for the duration of an exchange or refresh. Concurrent requests
/// therefore wait for an in-flight refresh instead of starting their own.
pub struct AuthController {
    settings: Settings,
    authorize_url: Url,
    http: Client,
    tokens: Mutex<TokenManager>,
}

impl AuthController {
    /// Creates a controller with no tokens.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if the configured authorize URL cannot be parsed.
    pub fn new(settings: Settings, http: Client) -> Result<Self, ConfigError> {
        let authorize_url = Url::parse(&settings.auth_url).map_err(|_| ConfigError::Invalid {
            name: "SPOTIFY_API_AUTH_URL",
            value: settings.auth_url.clone(),
        })?;

        Ok(AuthController {
            settings,
            authorize_url,
            http,
            tokens: Mutex::new(TokenManager::new()),
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub async fn phase(&self) -> AuthPhase {
        self.tokens.lock().await.phase(Utc::now())
    }

    /// True while a token is held, whether or not it still needs a refresh.
    pub async fn is_authorized(&self) -> bool {
        self.tokens.lock().await.current_token().is_some()
    }

    /// Builds the Spotify consent URL and marks an authorization as pending.
    ///
    /// Calling this repeatedly returns the same URL until the pending
    /// authorization is completed. Tokens already held stay usable meanwhile.
    pub async fn begin_authorization(&self) -> Url {
        let mut tokens = self.tokens.lock().await;
        let use_pkce = self.settings.client_secret.is_none();
        let pending = tokens.pending_or_insert_with(|| PendingAuthorization {
            state: utils::generate_state(),
            code_verifier: use_pkce.then(utils::generate_code_verifier),
        });

        let mut url = self.authorize_url.clone();
        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("client_id", &self.settings.client_id)
                .append_pair("response_type", "code")
                .append_pair("redirect_uri", &self.settings.redirect_uri)
                .append_pair("scope", &self.settings.scope)
                .append_pair("state", &pending.state);
            if let Some(verifier) = &pending.code_verifier {
                query
                    .append_pair("code_challenge", &utils::generate_code_challenge(verifier))
                    .append_pair("code_challenge_method", "S256");
            }
        }

        tracing::debug!(pkce = use_pkce, "authorization started");
        url
    }

    /// Exchanges the one-time authorization code for tokens.
    ///
    /// `state` is the value Spotify echoed back on the callback. It has to match
    /// the pending authorization; without a pending authorization no `state` may
    /// be presented.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::ExchangeFailed`] on a state mismatch, a rejected or
    /// expired code, a transport failure or an undecodable response. The pending
    /// authorization is kept so the callback can be retried.
    pub async fn complete_authorization(
        &self,
        code: &str,
        state: Option<&str>,
    ) -> Result<TokenSet, AuthError> {
        let mut tokens = self.tokens.lock().await;
        let pending = tokens.pending().cloned();

        let expected = pending.as_ref().map(|p| p.state.as_str());
        if expected != state {
            tracing::warn!("authorization callback carried an unexpected state");
            return Err(AuthError::ExchangeFailed("state mismatch".to_string()));
        }

        let verifier = pending.as_ref().and_then(|p| p.code_verifier.as_deref());
        let mut form = vec![
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", self.settings.redirect_uri.as_str()),
        ];
        if let Some(verifier) = verifier {
            form.push(("code_verifier", verifier));
        }

        match self.request_token(form).await {
            Ok(response) => {
                let token = self.token_set(response, None);
                tokens.store(token.clone());
                tracing::info!("authorization completed");
                Ok(token)
            }
            Err(reason) => {
                tracing::warn!(%reason, "authorization code exchange failed");
                Err(AuthError::ExchangeFailed(reason))
            }
        }
    }

    /// Returns a usable token, refreshing it first if it is about to expire.
    ///
    /// # Errors
    ///
    /// - [`AuthError::NotAuthenticated`] if no token has been obtained
    /// - [`AuthError::RefreshFailed`] if the refresh was rejected; the stale
    ///   token is dropped and a new login is required. An outstanding login
    ///   is kept so its callback still succeeds.
    pub async fn current_token(&self) -> Result<TokenSet, AuthError> {
        let mut tokens = self.tokens.lock().await;
        let Some(token) = tokens.current_token().cloned() else {
            return Err(AuthError::NotAuthenticated);
        };

        if !tokens.is_expired(Utc::now()) {
            return Ok(token);
        }

        match self.refresh(&token).await {
            Ok(refreshed) => {
                tokens.replace(refreshed.clone());
                tracing::info!("access token refreshed");
                Ok(refreshed)
            }
            Err(reason) => {
                tokens.clear_token();
                tracing::warn!(%reason, "token refresh failed, login required");
                Err(AuthError::RefreshFailed(reason))
            }
        }
    }

    async fn refresh(&self, token: &TokenSet) -> Result<TokenSet, String> {
        if token.refresh_token.is_empty() {
            return Err("no refresh token available".to_string());
        }

        let form = vec![
            ("grant_type", "refresh_token"),
            ("refresh_token", token.refresh_token.as_str()),
        ];
        let response = self.request_token(form).await?;
        Ok(self.token_set(response, Some(token)))
    }

    async fn request_token<'a>(
        &'a self,
        mut form: Vec<(&'a str, &'a str)>,
    ) -> Result<TokenResponse, String> {
        let mut request = self.http.post(&self.settings.token_url);
        match &self.settings.client_secret {
            Some(secret) => request = request.basic_auth(&self.settings.client_id, Some(secret)),
            None => form.push(("client_id", self.settings.client_id.as_str())),
        }

        let response = request.form(&form).send().await.map_err(|e| e.to_string())?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(match serde_json::from_str::<TokenErrorResponse>(&body) {
                Ok(TokenErrorResponse {
                    error,
                    error_description: Some(description),
                }) => format!("{error}: {description}"),
                Ok(TokenErrorResponse { error, .. }) => error,
                Err(_) => format!("{status}: {body}"),
            });
        }

        response
            .json::<TokenResponse>()
            .await
            .map_err(|e| e.to_string())
    }

    fn token_set(&self, response: TokenResponse, previous: Option<&TokenSet>) -> TokenSet {
        // Spotify may omit the refresh token on refresh; the old one stays valid then.
        let refresh_token = response
            .refresh_token
            .or_else(|| previous.map(|p| p.refresh_token.clone()))
            .unwrap_or_default();
        let scope = response
            .scope
            .or_else(|| previous.map(|p| p.scope.clone()))
            .unwrap_or_else(|| self.settings.scope.clone());

        TokenSet {
            access_token: response.access_token,
            refresh_token,
            scope,
            expires_at: Utc::now() + Duration::seconds(response.expires_in),
        }
    }
}
