//! Configuration module
//!
//! The backend host is fixed at build time (`DOCSHADE_BACKEND_HOST`); local
//! paths and timings are read from the environment at startup.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::constants::{HEALTH_PATH, REMINDER_DELAY, SESSION_CHANNEL_PATH, UPLOAD_PATH};
use crate::error::{ClientError, ClientResult};
use crate::models::SessionId;

const DEFAULT_BACKEND_HOST: &str = "localhost";
const HTTP_TIMEOUT_SECS: u64 = 60;
const LEDGER_DIR: &str = ".docshade";
const OUTPUT_DIR: &str = ".";

/// Backend host baked into the binary.
pub fn build_backend_host() -> &'static str {
    option_env!("DOCSHADE_BACKEND_HOST").unwrap_or(DEFAULT_BACKEND_HOST)
}

/// Base URLs derived from the backend host.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Endpoints {
    http_base: String,
    ws_base: String,
}

impl Endpoints {
    /// `https://<host>` and `wss://<host>`.
    pub fn for_host(host: &str) -> Self {
        Self::new(format!("https://{}", host), format!("wss://{}", host))
    }

    /// Explicit bases, e.g. `http://127.0.0.1:1234` for tests.
    pub fn new(http_base: impl Into<String>, ws_base: impl Into<String>) -> Self {
        Self {
            http_base: http_base.into().trim_end_matches('/').to_string(),
            ws_base: ws_base.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn http_base(&self) -> &str {
        &self.http_base
    }

    pub fn health_url(&self) -> String {
        format!("{}{}", self.http_base, HEALTH_PATH)
    }

    pub fn upload_url(&self) -> String {
        format!("{}{}", self.http_base, UPLOAD_PATH)
    }

    pub fn session_channel_url(&self, session_id: &SessionId) -> String {
        format!("{}{}/{}", self.ws_base, SESSION_CHANNEL_PATH, session_id)
    }

    /// Resolve a download link. Root-relative links are joined to the public
    /// origin; absolute links pass through.
    pub fn resolve(&self, link: &str) -> String {
        if link.starts_with('/') {
            format!("{}{}", self.http_base, link)
        } else {
            link.to_string()
        }
    }
}

#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub backend_host: String,
    pub ledger_dir: PathBuf,
    pub output_dir: PathBuf,
    pub http_timeout: Duration,
    pub reminder_delay: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            backend_host: build_backend_host().to_string(),
            ledger_dir: PathBuf::from(LEDGER_DIR),
            output_dir: PathBuf::from(OUTPUT_DIR),
            http_timeout: Duration::from_secs(HTTP_TIMEOUT_SECS),
            reminder_delay: REMINDER_DELAY,
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let defaults = Self::default();

        let http_timeout_secs = env::var("DOCSHADE_HTTP_TIMEOUT_SECS")
            .unwrap_or_else(|_| HTTP_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| {
                ClientError::Config("DOCSHADE_HTTP_TIMEOUT_SECS must be a valid number".to_string())
            })?;

        let reminder_delay_secs = env::var("DOCSHADE_REMINDER_DELAY_SECS")
            .unwrap_or_else(|_| REMINDER_DELAY.as_secs().to_string())
            .parse::<u64>()
            .map_err(|_| {
                ClientError::Config("DOCSHADE_REMINDER_DELAY_SECS must be a valid number".to_string())
            })?;

        let config = Self {
            backend_host: defaults.backend_host,
            ledger_dir: env::var("DOCSHADE_LEDGER_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.ledger_dir),
            output_dir: env::var("DOCSHADE_OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.output_dir),
            http_timeout: Duration::from_secs(http_timeout_secs),
            reminder_delay: Duration::from_secs(reminder_delay_secs),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ClientResult<()> {
        let host = self.backend_host.trim();
        if host.is_empty() {
            return Err(ClientError::Config("Backend host must not be empty".to_string()));
        }
        if host.contains("://") || host.contains('/') {
            return Err(ClientError::Config(format!(
                "Backend host must be a bare host[:port], got '{}'",
                host
            )));
        }
        if self.http_timeout.is_zero() {
            return Err(ClientError::Config(
                "HTTP timeout must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    pub fn endpoints(&self) -> Endpoints {
        Endpoints::for_host(&self.backend_host)
    }
}
