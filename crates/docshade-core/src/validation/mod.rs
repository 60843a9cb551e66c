//! Validation modules

pub mod file;

pub use file::{content_type_for_path, validate_pdf, MISSING_FILE_MESSAGE, NOT_A_PDF_MESSAGE};
