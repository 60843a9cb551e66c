//! File selection validation.

use std::path::Path;

use crate::constants::PDF_CONTENT_TYPE;
use crate::error::{ClientError, ClientResult};
use crate::models::PdfFile;

pub const MISSING_FILE_MESSAGE: &str = "A pdf-file is required";
pub const NOT_A_PDF_MESSAGE: &str = "Only PDF files are allowed";

/// Require a present file whose content type is exactly `application/pdf`.
///
/// Content is not inspected; the backend does that.
pub fn validate_pdf(file: Option<&PdfFile>) -> ClientResult<&PdfFile> {
    let file = file.ok_or_else(|| ClientError::Validation(MISSING_FILE_MESSAGE.to_string()))?;

    if file.content_type != PDF_CONTENT_TYPE {
        tracing::debug!(
            file_name = %file.file_name,
            content_type = %file.content_type,
            "Rejected non-PDF selection"
        );
        return Err(ClientError::Validation(NOT_A_PDF_MESSAGE.to_string()));
    }

    Ok(file)
}

/// Content type a picker would report for a local path, from its extension.
pub fn content_type_for_path(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "pdf" => PDF_CONTENT_TYPE,
        _ => "application/octet-stream",
    }
}
