//! Docshade Core Library
//!
//! Upload-and-track workflow for the document anonymization client: domain
//! models, error taxonomy, configuration, file validation, the persistent
//! document ledger and the workflow controller that binds them together.
//! Network access lives behind the traits in [`hooks`].

pub mod config;
pub mod constants;
pub mod error;
pub mod hooks;
pub mod ledger;
pub mod models;
pub mod notify;
pub mod scheduler;
pub mod transform;
pub mod validation;
pub mod workflow;

// Re-export commonly used types
pub use config::{ClientConfig, Endpoints};
pub use error::{ClientError, ClientResult, LogLevel};
pub use hooks::{ChannelConnector, DocumentBackend, DownloadSink, SessionChannel};
pub use ledger::{FileStore, KeyValueStore, Ledger, MemoryStore};
pub use models::{
    ChannelEvent, DocumentRecord, HealthReport, HealthStatus, PdfFile, SessionId, StatusMessage,
    UploadPhase, UploadResponse, UploadSession,
};
pub use notify::{Notification, NotificationId, NotificationLevel, Notifier, TracingNotifier};
pub use scheduler::{ScheduledNotification, Scheduler, TokioScheduler};
pub use workflow::{UploadController, WorkflowOutcome};
