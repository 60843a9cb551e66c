//! Application-wide constants.

use std::time::Duration;

/// Local storage key holding the JSON array of document records.
pub const LEDGER_KEY: &str = "documents";

/// Maximum number of records kept in the ledger.
pub const LEDGER_CAPACITY: usize = 10;

/// How long a processed document stays downloadable after completion.
pub const DOCUMENT_TTL: Duration = Duration::from_secs(15 * 60);

/// Delay before the "download window" reminder fires.
pub const REMINDER_DELAY: Duration = Duration::from_secs(15 * 60);

pub const PDF_CONTENT_TYPE: &str = "application/pdf";

/// Internal object-storage origin the backend hands out in download links.
pub const INTERNAL_STORAGE_PREFIX: &str = "http://minio:9000/";

/// Public path the internal storage origin is proxied under.
pub const PUBLIC_STORAGE_PATH: &str = "/minio/";

/// Suffix appended to processed files. The spelling is kept as the backend
/// and existing ledgers know it.
pub const ANONYMIZED_SUFFIX: &str = "_anonimized.pdf";

pub const HEALTH_PATH: &str = "/v1/health";
pub const UPLOAD_PATH: &str = "/v1/upload";
pub const SESSION_CHANNEL_PATH: &str = "/ws";

/// Multipart field name the upload endpoint expects.
pub const UPLOAD_FIELD: &str = "file";
