//! Runtime configuration read from the environment.

use std::time::Duration;

use anyhow::{Context, Result};

pub const DEFAULT_PREDICT_URL: &str = "http://localhost:5000/predict";

#[derive(Debug, Clone)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    /// Model service endpoint receiving forwarded feature payloads
    pub predict_url: String,
    /// Upstream timeout; `None` waits indefinitely
    pub predict_timeout: Option<Duration>,
    /// Extra CORS origin besides the local dev frontends
    pub frontend_url: Option<String>,
    /// Start with the default forum topics
    pub seed_forum: bool,
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "5001".to_string())
                .parse()
                .context("Invalid PORT")?,
            predict_url: std::env::var("PREDICT_URL").unwrap_or_else(|_| DEFAULT_PREDICT_URL.to_string()),
            predict_timeout: match std::env::var("PREDICT_TIMEOUT_SECS") {
                Ok(v) => Some(Duration::from_secs(v.parse().context("Invalid PREDICT_TIMEOUT_SECS")?)),
                Err(_) => None,
            },
            frontend_url: std::env::var("FRONTEND_URL").ok().filter(|v| !v.is_empty()),
            seed_forum: match std::env::var("SEED_FORUM") {
                Ok(v) => parse_bool(&v).context("Invalid SEED_FORUM")?,
                Err(_) => true,
            },
        })
    }
}

fn parse_bool(v: &str) -> Result<bool> {
    match v.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Ok(true),
        "0" | "false" | "no" => Ok(false),
        other => anyhow::bail!("expected a boolean, got '{other}'"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: [&str; 6] = ["HOST", "PORT", "PREDICT_URL", "PREDICT_TIMEOUT_SECS", "FRONTEND_URL", "SEED_FORUM"];

    fn clear() {
        for v in VARS {
            std::env::remove_var(v);
        }
    }

    #[test]
    #[serial]
    fn defaults() {
        clear();
        let s = Settings::from_env().unwrap();
        assert_eq!(s.host, "0.0.0.0");
        assert_eq!(s.port, 5001);
        assert_eq!(s.predict_url, DEFAULT_PREDICT_URL);
        assert!(s.predict_timeout.is_none());
        assert!(s.frontend_url.is_none());
        assert!(s.seed_forum);
    }

    #[test]
    #[serial]
    fn overrides() {
        clear();
        std::env::set_var("PORT", "8081");
        std::env::set_var("PREDICT_TIMEOUT_SECS", "15");
        std::env::set_var("SEED_FORUM", "false");
        std::env::set_var("FRONTEND_URL", "https://app.example.org");
        let s = Settings::from_env().unwrap();
        assert_eq!(s.port, 8081);
        assert_eq!(s.predict_timeout, Some(Duration::from_secs(15)));
        assert!(!s.seed_forum);
        assert_eq!(s.frontend_url.as_deref(), Some("https://app.example.org"));
        clear();
    }

    #[test]
    #[serial]
    fn rejects_bad_port() {
        clear();
        std::env::set_var("PORT", "not-a-port");
        assert!(Settings::from_env().is_err());
        clear();
    }
}
