// SPDX-FileCopyrightText: 2026 Ecochat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Request and response bodies specific to the HTTP transport.

use ecochat_core::ChatMessage;
use serde::{Deserialize, Serialize};

/// JSON body of `POST /chat`.
#[derive(Debug, Serialize)]
pub struct ChatBody<'a> {
    pub user_id: &'a str,
    pub model: &'a str,
    pub messages: &'a [ChatMessage],
    /// Always false; incremental delivery is never consumed.
    pub stream: bool,
}

/// Body of `GET /health`.
#[derive(Debug, Deserialize)]
pub struct HealthBody {
    pub status: String,
    #[serde(default)]
    pub models_supported: Option<u32>,
}

/// Error body produced by the gateway framework, e.g. `{"detail": "..."}`.
#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    pub detail: serde_json::Value,
}

impl ApiErrorBody {
    /// The detail as display text when it is a plain string.
    pub fn detail_text(&self) -> Option<&str> {
        self.detail.as_str()
    }
}
