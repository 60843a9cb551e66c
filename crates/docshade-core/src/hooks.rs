//! Hooks and traits for the outside world
//!
//! The workflow controller talks to the backend, the status channel and the
//! local filesystem only through these traits. `docshade-api-client` provides
//! the network implementations; tests provide doubles.

use std::path::PathBuf;

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::ClientResult;
use crate::models::{ChannelEvent, PdfFile, SessionId};

/// Request/response boundary to the backend HTTP API.
#[async_trait]
pub trait DocumentBackend: Send + Sync {
    /// Submit an already validated PDF and return its session id.
    async fn submit(&self, file: &PdfFile) -> ClientResult<SessionId>;

    /// Retrieve the processed artifact. `url` may be relative to the backend
    /// public origin.
    async fn fetch_artifact(&self, url: &str) -> ClientResult<Bytes>;
}

/// Opens one status channel per session.
#[async_trait]
pub trait ChannelConnector: Send + Sync {
    async fn connect(&self, session_id: &SessionId) -> ClientResult<Box<dyn SessionChannel>>;
}

/// Live duplex connection for one session.
///
/// Yields `Opened` once, then at most one terminal event, then `None`. A
/// closed channel never re-opens.
#[async_trait]
pub trait SessionChannel: Send {
    async fn next_event(&mut self) -> Option<ChannelEvent>;

    /// Tear the connection down. Safe to call more than once.
    async fn close(&mut self);
}

/// Local save action for a retrieved artifact.
pub trait DownloadSink: Send + Sync {
    /// Save `data` under `file_name` and return where it landed.
    fn save(&self, file_name: &str, data: &[u8]) -> ClientResult<PathBuf>;
}
