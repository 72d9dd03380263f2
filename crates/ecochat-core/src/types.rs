// SPDX-FileCopyrightText: 2026 Ecochat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversation and chat wire types shared by the session and the gateway.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::usage::UsageRecord;

/// Author of a conversation message.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    System,
}

/// An opaque file payload attached to a user message.
#[derive(Clone, PartialEq, Eq)]
pub struct FileRef {
    /// File name sent as the multipart part's filename.
    pub name: String,
    /// MIME type, if known. The gateway sends `application/octet-stream` otherwise.
    pub mime_type: Option<String>,
    /// Raw file contents.
    pub bytes: Vec<u8>,
}

impl FileRef {
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            mime_type: None,
            bytes: bytes.into(),
        }
    }

    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }

    /// Size of the payload in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

// Payloads can be large; keep Debug output to metadata.
impl std::fmt::Debug for FileRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileRef")
            .field("name", &self.name)
            .field("mime_type", &self.mime_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// A single entry in a conversation. Immutable once appended to a session.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub role: Role,
    pub content: String,
    pub attachments: Vec<FileRef>,
}

impl Message {
    pub fn user(content: impl Into<String>, attachments: Vec<FileRef>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            attachments,
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            attachments: Vec::new(),
        }
    }

    /// Wire form of this message; attachments travel separately.
    pub fn to_chat_message(&self) -> ChatMessage {
        ChatMessage {
            role: self.role,
            content: self.content.clone(),
        }
    }
}

/// A message as it appears in the chat request body: `{role, content}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

/// A chat request assembled by a session for one send.
///
/// The gateway adds its configured `user_id` and always sets `stream: false`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatRequest {
    /// Fully qualified model identifier, e.g. `openai:gpt-4o-mini`.
    pub model: String,
    /// The complete conversation history, oldest first.
    pub messages: Vec<ChatMessage>,
}

/// A chat response as returned by the gateway.
///
/// Decoding never fails on a JSON body: `content` is taken when it is a
/// string and every numeric field goes through [`UsageRecord::parse`].
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "serde_json::Value")]
pub struct ChatResponse {
    pub content: Option<String>,
    pub usage: UsageRecord,
}

impl From<serde_json::Value> for ChatResponse {
    fn from(raw: serde_json::Value) -> Self {
        Self {
            content: raw
                .get("content")
                .and_then(serde_json::Value::as_str)
                .map(str::to_string),
            usage: UsageRecord::parse(&raw),
        }
    }
}

/// Health status reported by the gateway's health endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Gateway reports `ok`, with the number of models it serves if given.
    Healthy { models_supported: Option<u32> },
    /// Gateway answered but reported a status other than `ok`.
    Degraded(String),
}
