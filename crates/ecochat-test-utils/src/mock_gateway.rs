// SPDX-FileCopyrightText: 2026 Ecochat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock chat gateway for deterministic testing.
//!
//! `MockGateway` implements `ChatGateway` with pre-configured outcomes and
//! records which endpoint each request would have hit.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use ecochat_core::{
    ChatGateway, ChatRequest, ChatResponse, FileRef, GatewayError, HealthStatus, UsageRecord,
};

/// Which request shape the session chose.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Text,
    Files,
}

/// One request as seen by the mock.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub route: Route,
    pub request: ChatRequest,
    pub file_names: Vec<String>,
}

/// A mock gateway that returns pre-configured outcomes.
///
/// Outcomes are popped from a FIFO queue. When the queue is empty,
/// a default "mock response" reply with fixed usage is returned.
#[derive(Clone)]
pub struct MockGateway {
    outcomes: Arc<Mutex<VecDeque<Result<ChatResponse, GatewayError>>>>,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl MockGateway {
    /// Create a new mock gateway with an empty outcome queue.
    pub fn new() -> Self {
        Self {
            outcomes: Arc::new(Mutex::new(VecDeque::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a mock gateway pre-loaded with successful replies.
    pub fn with_replies(replies: Vec<&str>) -> Self {
        let queue = replies.into_iter().map(|r| Ok(reply(r))).collect();
        Self {
            outcomes: Arc::new(Mutex::new(queue)),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Queue an arbitrary response.
    pub async fn push_response(&self, response: ChatResponse) {
        self.outcomes.lock().await.push_back(Ok(response));
    }

    /// Queue a failure with the given message.
    pub async fn push_failure(&self, message: &str) {
        self.outcomes
            .lock()
            .await
            .push_back(Err(GatewayError::new(message)));
    }

    /// All calls received so far, oldest first.
    pub async fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().await.clone()
    }

    /// Number of calls received so far.
    pub async fn call_count(&self) -> usize {
        self.calls.lock().await.len()
    }

    async fn next_outcome(&self) -> Result<ChatResponse, GatewayError> {
        self.outcomes
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| Ok(reply("mock response")))
    }

    async fn record(&self, route: Route, request: &ChatRequest, files: &[FileRef]) {
        self.calls.lock().await.push(RecordedCall {
            route,
            request: request.clone(),
            file_names: files.iter().map(|f| f.name.clone()).collect(),
        });
    }
}

impl Default for MockGateway {
    fn default() -> Self {
        Self::new()
    }
}

/// A successful reply with fixed usage figures.
pub fn reply(content: &str) -> ChatResponse {
    ChatResponse {
        content: Some(content.to_string()),
        usage: UsageRecord {
            input_tokens: 10,
            output_tokens: 20,
            cost_eur: 0.0002,
            est_co2e_g: 0.5,
            est_kwh: 0.001,
        },
    }
}

#[async_trait]
impl ChatGateway for MockGateway {
    fn name(&self) -> &str {
        "mock-gateway"
    }

    async fn send_text(&self, request: &ChatRequest) -> Result<ChatResponse, GatewayError> {
        self.record(Route::Text, request, &[]).await;
        self.next_outcome().await
    }

    async fn send_with_files(
        &self,
        request: &ChatRequest,
        files: &[FileRef],
    ) -> Result<ChatResponse, GatewayError> {
        self.record(Route::Files, request, files).await;
        self.next_outcome().await
    }

    async fn health(&self) -> Result<HealthStatus, GatewayError> {
        Ok(HealthStatus::Healthy {
            models_supported: None,
        })
    }
}
