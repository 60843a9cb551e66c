//! Data models for the upload client
//!
//! Persisted records, the ephemeral upload session, channel events and the
//! request/response shapes of the backend API.

mod api;
mod channel;
mod document;
mod session;

pub use api::{HealthReport, HealthStatus, UploadResponse};
pub use channel::{ChannelEvent, StatusMessage};
pub use document::DocumentRecord;
pub use session::{PdfFile, SessionId, UploadPhase, UploadSession};
