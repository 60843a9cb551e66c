use std::fmt;

use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// Opaque token returned by the upload endpoint; names one status channel.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A file picked by the user, held in memory until submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfFile {
    pub file_name: String,
    pub content_type: String,
    pub data: Bytes,
}

impl PdfFile {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        data: impl Into<Bytes>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            data: data.into(),
        }
    }

    pub fn size(&self) -> usize {
        self.data.len()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UploadPhase {
    Idle,
    Selecting,
    Submitting,
    AwaitingResult,
    Succeeded,
    Failed,
}

impl fmt::Display for UploadPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            UploadPhase::Idle => "idle",
            UploadPhase::Selecting => "selecting",
            UploadPhase::Submitting => "submitting",
            UploadPhase::AwaitingResult => "awaiting_result",
            UploadPhase::Succeeded => "succeeded",
            UploadPhase::Failed => "failed",
        };
        f.write_str(s)
    }
}

/// In-memory state of the single active upload. Never persisted.
#[derive(Debug, Clone)]
pub struct UploadSession {
    pub session_id: Option<SessionId>,
    pub phase: UploadPhase,
    pub selected_file: Option<PdfFile>,
}

impl Default for UploadSession {
    fn default() -> Self {
        Self {
            session_id: None,
            phase: UploadPhase::Idle,
            selected_file: None,
        }
    }
}

impl UploadSession {
    /// Back to `Idle`, forgetting the session id. A held file is kept only
    /// when it was never submitted.
    pub fn reset(&mut self) {
        self.session_id = None;
        self.phase = UploadPhase::Idle;
    }
}
