//! Webhook receiver.
//!
//! Telegram pushes updates to `POST /webhook/<bot token>`; the token in the
//! path is the shared secret. `GET /health` answers liveness probes.

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use teloxide::prelude::*;
use teloxide::types::AllowedUpdate;
use tracing::{debug, info, warn};

use super::dispatcher::{ThrottledBot, UpdateDispatcher};
use crate::config::Config;
use crate::error::Result;

/// State shared by the webhook routes.
#[derive(Clone)]
pub struct WebhookState {
    pub dispatcher: UpdateDispatcher,
    /// Expected final path segment.
    pub secret: String,
}

/// Build the HTTP router.
pub fn router(state: WebhookState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/webhook/:secret", post(telegram_webhook))
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}

async fn telegram_webhook(
    State(state): State<WebhookState>,
    Path(secret): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    if !constant_time_eq(secret.as_bytes(), state.secret.as_bytes()) {
        warn!("Rejected webhook call with wrong secret");
        return StatusCode::NOT_FOUND.into_response();
    }

    if !is_json(&headers) {
        warn!("Rejected webhook call without a JSON content type");
        return StatusCode::FORBIDDEN.into_response();
    }

    let update: Update = match serde_json::from_slice(&body) {
        Ok(update) => update,
        Err(e) => {
            warn!("Failed to decode update: {}", e);
            return StatusCode::BAD_REQUEST.into_response();
        }
    };

    debug!("Received update {:?}", update.id);

    // Detached: a dropped request must not cancel a send/pin sequence.
    let dispatcher = state.dispatcher.clone();
    tokio::spawn(async move { dispatcher.dispatch(update).await });

    (StatusCode::OK, "OK").into_response()
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut res = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        res |= x ^ y;
    }
    res == 0
}

/// True when the media type is `application/json`, parameters ignored.
fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .is_some_and(|mime| mime.trim().eq_ignore_ascii_case("application/json"))
}

/// Point Telegram at this service.
///
/// Pending updates are dropped and only messages are requested.
pub async fn register_webhook(bot: &ThrottledBot, config: &Config) -> Result<()> {
    let url = config.webhook_url()?;
    info!(
        "🔗 Setting webhook URL: {}",
        url.as_str().replace(&config.bot_token, "<token>")
    );

    bot.inner()
        .set_webhook(url)
        .drop_pending_updates(true)
        .allowed_updates(vec![AllowedUpdate::Message])
        .await?;

    info!("✅ Webhook registered");
    Ok(())
}
