use std::{path::PathBuf, sync::Arc, time::Duration};

use crate::{
    config::Settings,
    error, info,
    error::ApiError,
    server::{self, AppState},
    spotify::AuthController,
    success, warning,
};

#[derive(Debug, Clone)]
pub struct ServeOptions {
    pub port: u16,
    pub open_browser: bool,
    pub public_dir: PathBuf,
}

/// Runs the local web app until Ctrl-C.
///
/// The listener is bound on all interfaces and the browser opened at the local
/// root URL. Once the user has logged in for the first time the owning Spotify
/// account is resolved; if that lookup fails the process exits, since playlists
/// cannot be created without an owner.
pub async fn serve(opts: ServeOptions) {
    let settings = match Settings::from_env(opts.port) {
        Ok(settings) => settings,
        Err(e) => error!("Invalid configuration: {}", e),
    };
    let http = match settings.http_client() {
        Ok(http) => http,
        Err(e) => error!("{}", e),
    };
    if settings.client_secret.is_none() {
        info!("No client secret configured, using PKCE for the Spotify login");
    }
    info!("Spotify redirect URI: {}", settings.redirect_uri);

    let auth = match AuthController::new(settings, http.clone()) {
        Ok(auth) => Arc::new(auth),
        Err(e) => error!("Invalid configuration: {}", e),
    };
    let state = AppState::new(auth, http);

    if !opts.public_dir.is_dir() {
        warning!(
            "Front-end directory {} not found, only the API will be served",
            opts.public_dir.display()
        );
    }
    let app = server::router(state.clone(), &opts.public_dir);

    let listener = match server::bind(opts.port).await {
        Ok(listener) => listener,
        Err(e) => error!("Failed to bind port {}: {}", opts.port, e),
    };

    let url = format!("http://localhost:{}", opts.port);
    info!("Starting server at {}", url);
    if opts.open_browser && webbrowser::open(&url).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            url
        );
    }

    let mut server = tokio::spawn(server::start_api_server(listener, app));

    tokio::select! {
        result = &mut server => {
            report_shutdown(result);
            return;
        }
        owner = wait_for_owner(&state) => match owner {
            Ok(id) => success!("Logged in to Spotify as {}", id),
            Err(e) => error!("Cannot resolve the Spotify account: {}", e),
        },
    }

    report_shutdown(server.await);
}

/// Waits for the first successful login, then resolves the owning account.
async fn wait_for_owner(state: &AppState) -> Result<String, ApiError> {
    while !state.auth.is_authorized().await {
        tokio::time::sleep(Duration::from_millis(500)).await;
    }
    state.owner_id().await
}

fn report_shutdown(result: Result<std::io::Result<()>, tokio::task::JoinError>) {
    match result {
        Ok(Ok(())) => info!("Server stopped"),
        Ok(Err(e)) => error!("Server error: {}", e),
        Err(e) => error!("Server task failed: {}", e),
    }
}
