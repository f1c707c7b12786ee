mod app;
mod auth;
mod config;
mod dashboard;
mod error;
mod handlers;
mod models;
mod registry;
mod state;

use std::process;

use classhub_common::{bind_listener, init_tracing, load_env_file, shutdown_signal};

use crate::auth::AuthGuard;
use crate::config::CheckinConfig;
use crate::dashboard::Dashboard;
use crate::state::AppState;

#[tokio::main]
async fn main() {
    // Pull in `.env` first so RUST_LOG and LOG_DIR from the file take effect.
    let env_file = load_env_file();
    let _guards = init_tracing("checkin-service");
    match env_file {
        Ok(Some(path)) => tracing::info!(path = %path.display(), "loaded env file"),
        Ok(None) => {}
        Err(err) => tracing::warn!(error = %err, "env file ignored"),
    }

    let config = CheckinConfig::from_env();
    let auth = AuthGuard::new(config.required_user_agent.clone(), config.token.clone());
    let token_configured = auth.has_token();
    if !token_configured {
        tracing::warn!("CLASS_TOKEN is not set; every check-in will be denied");
    }

    let dashboard = match Dashboard::new(config.refresh_secs) {
        Ok(dashboard) => dashboard,
        Err(err) => {
            tracing::error!(error = %err, "dashboard template failed to load");
            process::exit(1);
        }
    };

    // Registry lives only as long as the process.
    let state = AppState::new(auth, dashboard);
    let app = app::build_router(state);

    let listener = match bind_listener(config.bind_host, config.port).await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!(
                error = %err,
                host = %config.bind_host,
                port = config.port,
                "bind listener failed"
            );
            process::exit(1);
        }
    };
    tracing::info!(
        host = %config.bind_host,
        port = config.port,
        user_agent = %config.required_user_agent,
        token_configured,
        "checkin-service listening"
    );

    if let Err(err) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!(error = %err, "server exited with error");
        process::exit(1);
    }
}
