//! Client for the Docshade backend.
//!
//! `ApiClient` covers the HTTP surface (health, upload, artifact retrieval)
//! and implements `DocumentBackend`; `WsConnector` opens the per-session
//! status channel and implements `ChannelConnector`.

pub mod api;
pub mod channel;

use std::time::Duration;

use anyhow::{Context, Result};
use docshade_core::{ClientConfig, ClientError, ClientResult, Endpoints};
use reqwest::Client;

pub use channel::{WsConnector, WsSessionChannel};

/// HTTP client for the backend API.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    endpoints: Endpoints,
}

impl ApiClient {
    pub fn new(endpoints: Endpoints, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client, endpoints })
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        Self::new(config.endpoints(), config.http_timeout)
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Raw client for custom requests.
    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Turn a non-2xx response into a `Transport` error carrying the body.
    async fn ensure_success(response: reqwest::Response) -> ClientResult<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        Err(ClientError::Transport(format!(
            "API request failed with status {}: {}",
            status, error_text
        )))
    }
}

pub(crate) fn transport_error(context: &str, err: reqwest::Error) -> ClientError {
    ClientError::Transport(format!("{}: {}", context, err))
}
