//! Request and response records exchanged with the chat API.

use chrono::{DateTime, Local, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// Who authored a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

/// A single chat message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub text: String,
    pub sender: Sender,
    /// ISO-8601 timestamp, when the producer supplied one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

impl ChatMessage {
    /// Creates a message stamped with the current UTC time.
    pub fn now(text: impl Into<String>, sender: Sender) -> Self {
        Self {
            text: text.into(),
            sender,
            timestamp: Some(Utc::now().to_rfc3339()),
        }
    }

    /// Formats the timestamp as `HH:MM`, or an empty string when it is
    /// absent or unparseable.
    ///
    /// Offset-qualified timestamps are shown in local time. Naive ones are
    /// shown as written.
    pub fn display_time(&self) -> String {
        let Some(ts) = self.timestamp.as_deref() else {
            return String::new();
        };
        if let Ok(dt) = DateTime::parse_from_rfc3339(ts) {
            return dt.with_timezone(&Local).format("%H:%M").to_string();
        }
        NaiveDateTime::parse_from_str(ts, "%Y-%m-%dT%H:%M:%S%.f")
            .map(|dt| dt.format("%H:%M").to_string())
            .unwrap_or_default()
    }
}

/// Credentials for `POST /auth/login`.
#[derive(Debug, Clone, Serialize)]
pub struct LoginData {
    pub username: String,
    pub password: String,
}

/// Account details for `POST /auth/register`.
#[derive(Debug, Clone, Serialize)]
pub struct RegisterData {
    pub name: String,
    pub age: u32,
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub username: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct SendMessageRequest<'a> {
    pub message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<&'a str>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChatResponse {
    pub response: String,
}
