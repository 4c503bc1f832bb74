use std::{
    net::{Ipv4Addr, SocketAddr},
    path::Path,
    sync::Arc,
};

use axum::{
    Extension, Router,
    routing::{get, post},
};
use tokio::{net::TcpListener, sync::OnceCell};
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::{
    api,
    error::ApiError,
    spotify::{AuthController, SpotifyClient},
};

/// Process-wide state shared by all request handlers.
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthController>,
    pub spotify: SpotifyClient,
    owner: Arc<OnceCell<String>>,
}

impl AppState {
    pub fn new(auth: Arc<AuthController>, http: reqwest::Client) -> Self {
        let spotify = SpotifyClient::new(http, Arc::clone(&auth));
        AppState {
            auth,
            spotify,
            owner: Arc::new(OnceCell::new()),
        }
    }

    /// Spotify id of the account that owns created playlists. Looked up once,
    /// then cached for the lifetime of the process.
    pub async fn owner_id(&self) -> Result<String, ApiError> {
        self.owner
            .get_or_try_init(|| self.spotify.current_user_id())
            .await
            .cloned()
    }
}

/// Builds the application router: API routes plus the static front-end as fallback.
pub fn router(state: AppState, public_dir: &Path) -> Router {
    Router::new()
        .route("/health", get(api::health))
        .route("/search", get(api::search))
        .route("/login", get(api::login))
        .route("/callback", get(api::callback))
        .route("/playlist", post(api::create_playlist))
        .fallback_service(ServeDir::new(public_dir))
        .layer(Extension(state))
        .layer(TraceLayer::new_for_http())
}

/// Binds the listener on all interfaces.
pub async fn bind(port: u16) -> std::io::Result<TcpListener> {
    TcpListener::bind(SocketAddr::from((Ipv4Addr::UNSPECIFIED, port))).await
}

/// Serves `app` until Ctrl-C is received.
pub async fn start_api_server(listener: TcpListener, app: Router) -> std::io::Result<()> {
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if tokio::signal::ctrl_c().await.is_err() {
                std::future::pending::<()>().await;
            }
        })
        .await
}
