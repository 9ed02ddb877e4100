//! Bot runtime - webhook registration and HTTP serving.

use std::net::SocketAddr;

use tokio::net::TcpListener;
use tracing::info;

use super::dispatcher::{ThrottledBot, UpdateDispatcher};
use super::webhook::{self, WebhookState};
use crate::config::Config;
use crate::error::Result;

/// Register the webhook with Telegram, then serve updates until shutdown.
pub async fn run(config: &Config, bot: &ThrottledBot, dispatcher: UpdateDispatcher) -> Result<()> {
    webhook::register_webhook(bot, config).await?;

    let app = webhook::router(WebhookState {
        dispatcher,
        secret: config.bot_token.clone(),
    });

    let address = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(address).await?;
    info!("🤖 Welcome bot listening on {}", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
