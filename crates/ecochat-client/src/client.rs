// SPDX-FileCopyrightText: 2026 Ecochat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the gateway's REST endpoints.
//!
//! Provides [`GatewayClient`] which handles request construction, response
//! decoding, and error classification. One attempt per call; no retries.

use std::time::Duration;

use ecochat_core::{ChatRequest, FileRef, GatewayError};
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::types::{ApiErrorBody, ChatBody};

/// Path of the JSON chat endpoint.
pub const CHAT_PATH: &str = "/chat";

/// Path of the multipart chat endpoint.
pub const CHAT_FILES_PATH: &str = "/chat/file-to-ai";

/// Path of the health endpoint.
pub const HEALTH_PATH: &str = "/health";

const DEFAULT_MIME_TYPE: &str = "application/octet-stream";

/// Low-level HTTP client bound to one endpoint base.
///
/// The base URL is fixed at construction; pointing at another gateway
/// means building a new client.
#[derive(Debug, Clone)]
pub struct GatewayClient {
    client: reqwest::Client,
    base_url: String,
    user_id: String,
}

impl GatewayClient {
    /// Creates a new client.
    ///
    /// # Arguments
    /// * `base_url` - Endpoint base; trailing slashes are stripped
    /// * `user_id` - Value sent as `user_id` in JSON chat requests
    /// * `timeout` - Per-request timeout enforced by the transport
    pub fn new(base_url: &str, user_id: String, timeout: Duration) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GatewayError::with_source(format!("failed to build HTTP client: {e}"), e))?;

        Ok(Self {
            client,
            base_url: base_url.trim().trim_end_matches('/').to_string(),
            user_id,
        })
    }

    /// Returns the endpoint base this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the configured user identifier.
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Sends a JSON chat request with `stream: false`.
    pub async fn post_chat<T: DeserializeOwned>(
        &self,
        request: &ChatRequest,
    ) -> Result<T, GatewayError> {
        let body = ChatBody {
            user_id: &self.user_id,
            model: &request.model,
            messages: &request.messages,
            stream: false,
        };

        let response = self
            .client
            .post(self.url(CHAT_PATH))
            .json(&body)
            .send()
            .await
            .map_err(|e| transport_error("POST", CHAT_PATH, e))?;

        decode("POST", CHAT_PATH, response).await
    }

    /// Sends a multipart chat request carrying the history and raw files.
    ///
    /// Fields: `model`, `messages` (JSON-serialized history), and one
    /// `files` part per attachment.
    pub async fn post_chat_with_files<T: DeserializeOwned>(
        &self,
        request: &ChatRequest,
        files: &[FileRef],
    ) -> Result<T, GatewayError> {
        let messages = serde_json::to_string(&request.messages).map_err(|e| {
            GatewayError::with_source(format!("failed to serialize message history: {e}"), e)
        })?;

        let mut form = Form::new()
            .text("model", request.model.clone())
            .text("messages", messages);

        for file in files {
            let mime = file.mime_type.as_deref().unwrap_or(DEFAULT_MIME_TYPE);
            let part = Part::bytes(file.bytes.clone())
                .file_name(file.name.clone())
                .mime_str(mime)
                .map_err(|e| {
                    GatewayError::with_source(
                        format!("invalid MIME type `{mime}` for {}: {e}", file.name),
                        e,
                    )
                })?;
            form = form.part("files", part);
        }

        let response = self
            .client
            .post(self.url(CHAT_FILES_PATH))
            .multipart(form)
            .send()
            .await
            .map_err(|e| transport_error("POST", CHAT_FILES_PATH, e))?;

        decode("POST", CHAT_FILES_PATH, response).await
    }

    /// Issues a GET and decodes the JSON body.
    ///
    /// `path` may carry a query string; it is used verbatim in error messages.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, GatewayError> {
        let response = self
            .client
            .get(self.url(path))
            .send()
            .await
            .map_err(|e| transport_error("GET", path, e))?;

        decode("GET", path, response).await
    }
}

fn transport_error(method: &str, path: &str, err: reqwest::Error) -> GatewayError {
    GatewayError::with_source(format!("{method} {path} failed: {err}"), err)
}

/// Classifies a response: non-2xx becomes `METHOD path -> status detail`,
/// an undecodable 2xx body becomes a parse error.
async fn decode<T: DeserializeOwned>(
    method: &str,
    path: &str,
    response: reqwest::Response,
) -> Result<T, GatewayError> {
    let status = response.status();
    debug!(method, path, status = %status, "gateway response received");

    let body = response.text().await.map_err(|e| {
        GatewayError::with_source(format!("failed to read {path} response body: {e}"), e)
    })?;

    if !status.is_success() {
        let detail = serde_json::from_str::<ApiErrorBody>(&body)
            .ok()
            .and_then(|b| b.detail_text().map(str::to_string))
            .unwrap_or(body);
        return Err(GatewayError::new(format!(
            "{method} {path} -> {} {detail}",
            status.as_u16()
        )));
    }

    serde_json::from_str(&body).map_err(|e| {
        GatewayError::with_source(format!("failed to parse {path} response: {e}"), e)
    })
}
