//! Error types for the welcome bot.

use thiserror::Error;

/// Errors raised while configuring the bot or talking to Telegram.
#[derive(Debug, Error)]
pub enum Error {
    #[error("{0} is not set")]
    MissingEnv(&'static str),

    #[error("invalid {name}: {reason}")]
    InvalidConfig { name: &'static str, reason: String },

    #[error("telegram request failed: {0}")]
    Telegram(#[from] teloxide::RequestError),

    #[error("http server error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
