//! Users Admin - server-rendered CRUD page over a users REST collection

use core_config::tracing::{init_tracing, install_color_eyre};
use domain_users::{HttpUsersApi, UsersController, UsersView};
use tokio::signal;
use tracing::{error, info};

mod config;
mod routes;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    info!("Using users API at {}", config.users_api.base_url());

    let api = HttpUsersApi::new(config.users_api.base_url());
    let mut controller = UsersController::new(api, UsersView::new());

    // A failed initial load is shown on the page instead of aborting startup
    let notice = match controller.init().await {
        Ok(()) => None,
        Err(e) => {
            error!(error = %e, "Failed to load users");
            Some(e.to_string())
        }
    };

    let app = routes::router(AppState::new(controller, notice));

    let listener = tokio::net::TcpListener::bind(config.server.address()).await?;
    info!("Users admin listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Users admin shutdown complete");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal, shutting down gracefully");
        },
        _ = terminate => {
            info!("Received SIGTERM signal, shutting down gracefully");
        },
    }
}
