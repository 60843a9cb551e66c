use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use docshade_core::validation::content_type_for_path;
use docshade_core::{
    ClientError, ClientResult, DocumentRecord, DownloadSink, LogLevel, Notification,
    NotificationId, NotificationLevel, Notifier, PdfFile,
};
use serde::Serialize;

/// Read a local file the way a browser file picker would hand it over.
pub fn read_selected_file(path: &Path) -> Result<PdfFile> {
    let data = fs::read(path).with_context(|| format!("Failed to read file: {}", path.display()))?;
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("document.pdf")
        .to_string();

    Ok(PdfFile::new(file_name, content_type_for_path(path), data))
}

/// Saves artifacts into a directory, creating it on first use.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl DownloadSink for DirectorySink {
    fn save(&self, file_name: &str, data: &[u8]) -> ClientResult<PathBuf> {
        // Backend-supplied names must not escape the output directory.
        let name = Path::new(file_name)
            .file_name()
            .and_then(|n| n.to_str())
            .filter(|n| !n.is_empty() && *n != "..")
            .ok_or_else(|| ClientError::Storage(format!("Invalid file name: {:?}", file_name)))?;

        fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(name);
        fs::write(&path, data)?;
        Ok(path)
    }
}

/// Prints notifications to stderr, leaving stdout for JSON output.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn show(&self, notification: Notification) -> NotificationId {
        let marker = match notification.level {
            NotificationLevel::Info => "…",
            NotificationLevel::Success => "✓",
            NotificationLevel::Warning => "!",
            NotificationLevel::Error => "✗",
        };
        eprintln!("{} {}", marker, notification.message);
        NotificationId::new()
    }

    fn dismiss(&self, _id: NotificationId) {}
}

/// Ledger entry as printed by `docshade documents`.
#[derive(Debug, Serialize)]
pub struct DocumentView {
    pub name: String,
    pub url: String,
    pub expires_at: Option<String>,
}

impl From<DocumentRecord> for DocumentView {
    fn from(record: DocumentRecord) -> Self {
        DocumentView {
            expires_at: record.expires_at().map(|t| t.to_rfc3339()),
            name: record.name,
            url: record.url,
        }
    }
}

/// Log a workflow error at its own level. Errors that were not already shown
/// as a notification are also printed for the user.
pub fn report_error(error: &ClientError) {
    let code = error.error_code();
    match error.log_level() {
        LogLevel::Debug => tracing::debug!(error = %error, code = code, "Upload workflow failed"),
        LogLevel::Warn => tracing::warn!(error = %error, code = code, "Upload workflow failed"),
        LogLevel::Error => tracing::error!(error = %error, code = code, "Upload workflow failed"),
    }
    if !error.is_notified() {
        eprintln!("{}", error);
    }
}

/// Process exit code for a failed workflow: 2 for bad input, 1 otherwise.
pub fn exit_code(error: &ClientError) -> i32 {
    match error {
        ClientError::Validation(_) | ClientError::Config(_) => 2,
        _ => 1,
    }
}

/// Initialize tracing for CLI binaries.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
}
