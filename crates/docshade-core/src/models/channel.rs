use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::transform::{anonymized_filename, rewrite_download_link};

/// Raw status frame pushed by the backend over the session channel.
///
/// `status` is kept as raw JSON: any value other than `"ok"` or `"error"`,
/// including a missing one, is reported back as an unknown status.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusMessage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_filename: Option<String>,
}

impl StatusMessage {
    /// Status as shown to the user.
    pub fn status_label(&self) -> String {
        match &self.status {
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => "undefined".to_string(),
        }
    }
}

/// Typed event produced by a session channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelEvent {
    /// Connection established; processing is in progress.
    Opened,
    /// Processing finished. Link and name are already transformed.
    Completed {
        download_link: String,
        file_name: String,
    },
    /// `status: "ok"` without a usable download link or file name.
    IncompleteResult,
    /// Backend reported `status: "error"`.
    Failed,
    /// Backend reported a status this client does not understand.
    UnknownStatus(String),
    /// The connection itself failed, or a frame was not JSON.
    TransportError(String),
    /// Either side closed the connection.
    Closed,
}

impl ChannelEvent {
    /// Interpret one text frame.
    pub fn from_text(text: &str) -> Self {
        let value = match serde_json::from_str::<Value>(text) {
            Ok(value) => value,
            Err(e) => return ChannelEvent::TransportError(format!("invalid status frame: {}", e)),
        };

        let message = match serde_json::from_value::<StatusMessage>(value.clone()) {
            Ok(message) => message,
            // Wrong-typed fields or a non-object frame: keep whatever status is there.
            Err(_) => StatusMessage {
                status: value.get("status").cloned(),
                ..StatusMessage::default()
            },
        };
        Self::from_message(message)
    }

    pub fn from_message(message: StatusMessage) -> Self {
        match message.status.as_ref().and_then(Value::as_str) {
            Some("ok") => match (message.download_link, message.original_filename) {
                (Some(link), Some(name)) => ChannelEvent::Completed {
                    download_link: rewrite_download_link(&link),
                    file_name: anonymized_filename(&name),
                },
                _ => ChannelEvent::IncompleteResult,
            },
            Some("error") => ChannelEvent::Failed,
            _ => ChannelEvent::UnknownStatus(message.status_label()),
        }
    }

    /// Terminal events end monitoring of the session.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, ChannelEvent::Opened)
    }
}
