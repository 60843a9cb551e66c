//! User-facing notifications (toasts)

use std::fmt;

use uuid::Uuid;

pub const PROCESSING_PENDING: &str = "Waiting for document processing...";
pub const PROCESSING_COMPLETED: &str = "Document processing completed.";
pub const DOWNLOAD_WINDOW_REMINDER: &str =
    "You have 15 minutes to download the processed document.";
pub const UPLOAD_FAILED: &str = "Error uploading file.";
pub const DOWNLOAD_FAILED: &str = "Error downloading the file.";
pub const PROCESSING_FAILED: &str = "Document processing failed.";
pub const CONNECTION_FAILED: &str = "WebSocket connection error.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl fmt::Display for NotificationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            NotificationLevel::Info => "info",
            NotificationLevel::Success => "success",
            NotificationLevel::Warning => "warning",
            NotificationLevel::Error => "error",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

impl Notification {
    pub fn new(level: NotificationLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Info, message)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Success, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Warning, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Error, message)
    }

    pub fn unknown_status(status: &str) -> Self {
        Self::warning(format!("Unknown status: {}", status))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NotificationId(Uuid);

impl NotificationId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for NotificationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Surface for notifications. Implementations must tolerate dismissing an
/// id twice or dismissing an id they never showed.
pub trait Notifier: Send + Sync {
    fn show(&self, notification: Notification) -> NotificationId;

    fn dismiss(&self, id: NotificationId);
}

/// Notifier that only logs. Used when no interactive surface exists.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn show(&self, notification: Notification) -> NotificationId {
        let id = NotificationId::new();
        match notification.level {
            NotificationLevel::Error => {
                tracing::error!(notification_id = %id, "{}", notification.message)
            }
            NotificationLevel::Warning => {
                tracing::warn!(notification_id = %id, "{}", notification.message)
            }
            NotificationLevel::Info | NotificationLevel::Success => {
                tracing::info!(notification_id = %id, level = %notification.level, "{}", notification.message)
            }
        }
        id
    }

    fn dismiss(&self, id: NotificationId) {
        tracing::debug!(notification_id = %id, "Notification dismissed");
    }
}
