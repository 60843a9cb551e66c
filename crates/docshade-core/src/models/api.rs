use serde::{Deserialize, Serialize};

use super::session::SessionId;

/// Response of `POST /v1/upload`. Only `session_id` is required.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadResponse {
    pub session_id: SessionId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HealthStatus {
    #[serde(rename = "OK")]
    Ok,
    #[serde(rename = "NOT_OK")]
    NotOk,
}

/// Result of the health probe. Failures are folded into `NotOk`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthReport {
    pub status: HealthStatus,
    pub data: Option<serde_json::Value>,
}

impl HealthReport {
    pub fn ok(data: serde_json::Value) -> Self {
        Self {
            status: HealthStatus::Ok,
            data: Some(data),
        }
    }

    pub fn not_ok() -> Self {
        Self {
            status: HealthStatus::NotOk,
            data: None,
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == HealthStatus::Ok
    }
}
