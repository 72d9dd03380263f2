// SPDX-FileCopyrightText: 2026 Ecochat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Chat gateway trait: the two request shapes a session can send.

use async_trait::async_trait;

use crate::error::GatewayError;
use crate::types::{ChatRequest, ChatResponse, FileRef, HealthStatus};

/// Transport for chat requests against the remote gateway.
///
/// Implementations make at most one attempt per call and never retry.
/// Responses are always requested non-streaming.
#[async_trait]
pub trait ChatGateway: Send + Sync {
    /// Returns a short name for logging.
    fn name(&self) -> &str;

    /// Sends the conversation as a single JSON request.
    async fn send_text(&self, request: &ChatRequest) -> Result<ChatResponse, GatewayError>;

    /// Sends the conversation together with raw file payloads.
    async fn send_with_files(
        &self,
        request: &ChatRequest,
        files: &[FileRef],
    ) -> Result<ChatResponse, GatewayError>;

    /// Checks whether the gateway is reachable.
    async fn health(&self) -> Result<HealthStatus, GatewayError>;
}
