//! Configuration module for the welcome bot.
//!
//! Loads configuration from environment variables.

pub mod content;

use std::env;

use url::Url;

use crate::error::{Error, Result};

const DEFAULT_PORT: u16 = 8080;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    // Telegram
    pub bot_token: String,

    /// Public HTTPS base the webhook is registered under.
    /// Only required by the registration step.
    pub public_url: Option<String>,

    /// HTTP listen port.
    pub port: u16,

    /// Send and pin the welcome without notifying members.
    pub silent: bool,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let bot_token = var("TELEGRAM_BOT_TOKEN").ok_or(Error::MissingEnv("TELEGRAM_BOT_TOKEN"))?;

        let public_url = var("PUBLIC_URL").or_else(|| var("RAILWAY_URL"));

        let port = match var("PORT") {
            Some(raw) => raw.parse::<u16>().map_err(|e| Error::InvalidConfig {
                name: "PORT",
                reason: format!("{raw:?}: {e}"),
            })?,
            None => DEFAULT_PORT,
        };

        let silent = match var("WELCOME_SILENT") {
            Some(raw) => parse_flag(&raw).ok_or_else(|| Error::InvalidConfig {
                name: "WELCOME_SILENT",
                reason: format!("{raw:?} is not a boolean"),
            })?,
            None => true,
        };

        Ok(Self {
            bot_token,
            public_url,
            port,
            silent,
        })
    }

    /// Full webhook URL: `<public url>/webhook/<token>`.
    pub fn webhook_url(&self) -> Result<Url> {
        let base = self
            .public_url
            .as_deref()
            .ok_or(Error::MissingEnv("PUBLIC_URL"))?;

        let raw = format!("{}/webhook/{}", base.trim_end_matches('/'), self.bot_token);
        Url::parse(&raw).map_err(|e| Error::InvalidConfig {
            name: "PUBLIC_URL",
            reason: format!("{base:?}: {e}"),
        })
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_missing_token_is_an_error() {
        let err = config(&[("PORT", "9000")]).unwrap_err();
        assert!(matches!(err, Error::MissingEnv("TELEGRAM_BOT_TOKEN")));

        let err = config(&[("TELEGRAM_BOT_TOKEN", "   ")]).unwrap_err();
        assert!(matches!(err, Error::MissingEnv("TELEGRAM_BOT_TOKEN")));
    }

    #[test]
    fn test_defaults() {
        let cfg = config(&[("TELEGRAM_BOT_TOKEN", "123:abc")]).unwrap();
        assert_eq!(cfg.port, 8080);
        assert!(cfg.silent);
        assert!(cfg.public_url.is_none());
    }

    #[test]
    fn test_invalid_port() {
        let err = config(&[("TELEGRAM_BOT_TOKEN", "123:abc"), ("PORT", "http")]).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig { name: "PORT", .. }));
    }

    #[test]
    fn test_silent_flag() {
        let cfg = config(&[("TELEGRAM_BOT_TOKEN", "t"), ("WELCOME_SILENT", "off")]).unwrap();
        assert!(!cfg.silent);

        let err = config(&[("TELEGRAM_BOT_TOKEN", "t"), ("WELCOME_SILENT", "maybe")]).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig { name: "WELCOME_SILENT", .. }));
    }

    #[test]
    fn test_webhook_url() {
        let cfg = config(&[
            ("TELEGRAM_BOT_TOKEN", "123:abc"),
            ("RAILWAY_URL", "https://bot.up.railway.app/"),
        ])
        .unwrap();
        assert_eq!(
            cfg.webhook_url().unwrap().as_str(),
            "https://bot.up.railway.app/webhook/123:abc"
        );
    }

    #[test]
    fn test_public_url_wins_over_railway_url() {
        let cfg = config(&[
            ("TELEGRAM_BOT_TOKEN", "t"),
            ("PUBLIC_URL", "https://a.example"),
            ("RAILWAY_URL", "https://b.example"),
        ])
        .unwrap();
        assert_eq!(cfg.public_url.as_deref(), Some("https://a.example"));
    }

    #[test]
    fn test_webhook_url_requires_public_url() {
        let cfg = config(&[("TELEGRAM_BOT_TOKEN", "t")]).unwrap();
        assert!(matches!(cfg.webhook_url(), Err(Error::MissingEnv("PUBLIC_URL"))));

        let cfg = config(&[("TELEGRAM_BOT_TOKEN", "t"), ("PUBLIC_URL", "not a url")]).unwrap();
        assert!(matches!(
            cfg.webhook_url(),
            Err(Error::InvalidConfig { name: "PUBLIC_URL", .. })
        ));
    }
}
