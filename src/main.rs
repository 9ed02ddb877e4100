//! Golden Fork welcome bot
//!
//! Greets new group members with a pinned welcome and navigation buttons.
//! Telegram delivers updates through a webhook.
//!
//! ## Architecture
//!
//! - `config` - Environment configuration, welcome copy and links
//! - `models` - Chat, member and welcome message types
//! - `cache` - In-memory pinned welcome tracking
//! - `bot` - Telegram port, dispatcher and webhook server
//! - `events` - Event handlers (welcome)
//! - `utils` - HTML escaping and chat links

mod bot;
mod cache;
mod config;
mod error;
mod events;
mod models;
mod utils;

use std::sync::Arc;

use teloxide::adaptors::throttle::Limits;
use teloxide::prelude::*;
use tracing::info;
use tracing_subscriber::EnvFilter;

use bot::api::SendOptions;
use bot::{AppState, UpdateDispatcher};
use config::Config;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file first (before anything else)
    dotenvy::dotenv().ok();

    // If RUST_LOG is not set, default to "info" level for our crate
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("welcome_bot=info,teloxide=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .init();

    info!("Starting welcome bot...");

    let config = Config::from_env()?;
    info!("Configuration loaded successfully");

    // Throttle keeps sends within Telegram's per-chat limits
    let bot = Bot::new(&config.bot_token).throttle(Limits::default());

    let state = AppState::new(
        Arc::new(bot.clone()),
        SendOptions {
            silent: config.silent,
        },
    );
    let dispatcher = UpdateDispatcher::new(state);

    bot::run(&config, &bot, dispatcher).await?;

    Ok(())
}
