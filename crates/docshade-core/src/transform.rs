//! Download link and filename transforms applied to completed sessions.
//!
//! Both are fixed string substitutions, not URL or path parsing.

use crate::constants::{ANONYMIZED_SUFFIX, INTERNAL_STORAGE_PREFIX, PUBLIC_STORAGE_PATH};

/// Rewrite an internal object-storage link to its public relative path.
///
/// `http://minio:9000/abc` becomes `/minio/abc`. Links with any other prefix
/// are returned unchanged.
pub fn rewrite_download_link(link: &str) -> String {
    match link.strip_prefix(INTERNAL_STORAGE_PREFIX) {
        Some(rest) => format!("{}{}", PUBLIC_STORAGE_PATH, rest),
        None => link.to_string(),
    }
}

/// Name the processed file: a trailing `.pdf` becomes `_anonimized.pdf`.
pub fn anonymized_filename(original: &str) -> String {
    match original.strip_suffix(".pdf") {
        Some(stem) => format!("{}{}", stem, ANONYMIZED_SUFFIX),
        None => original.to_string(),
    }
}
