// SPDX-FileCopyrightText: 2026 Ecochat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP adapter for the ecochat gateway.
//!
//! This crate implements [`ChatGateway`] and [`InsightsSource`] over the
//! gateway's REST API: JSON and multipart chat, the six insight reads, and
//! the health probe.

pub mod client;
pub mod types;

use std::time::Duration;

use async_trait::async_trait;
use ecochat_config::model::ApiConfig;
use ecochat_core::insights::{
    Equivalents, HourlyIntensity, ModelStat, Overview, Recommendations, TimelinePoint,
};
use ecochat_core::{
    ChatGateway, ChatRequest, ChatResponse, FileRef, GatewayError, Granularity, HealthStatus,
    InsightsQuery, InsightsSource,
};
use tracing::{debug, info};

pub use crate::client::GatewayClient;
use crate::types::HealthBody;

/// Gateway adapter implementing both chat and insights access.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: GatewayClient,
}

impl HttpGateway {
    /// Builds an adapter from the `[api]` configuration section.
    pub fn from_config(config: &ApiConfig) -> Result<Self, GatewayError> {
        let client = GatewayClient::new(
            config.normalized_base_url(),
            config.user_id.clone(),
            Duration::from_secs(config.timeout_secs),
        )?;

        info!(base_url = client.base_url(), "gateway client initialized");

        Ok(Self { client })
    }

    /// Wraps an existing client.
    pub fn with_client(client: GatewayClient) -> Self {
        Self { client }
    }

    /// Returns the underlying HTTP client.
    pub fn client(&self) -> &GatewayClient {
        &self.client
    }
}

#[async_trait]
impl ChatGateway for HttpGateway {
    fn name(&self) -> &str {
        "http"
    }

    async fn send_text(&self, request: &ChatRequest) -> Result<ChatResponse, GatewayError> {
        debug!(
            model = request.model,
            messages = request.messages.len(),
            "sending chat request"
        );
        self.client.post_chat(request).await
    }

    async fn send_with_files(
        &self,
        request: &ChatRequest,
        files: &[FileRef],
    ) -> Result<ChatResponse, GatewayError> {
        debug!(
            model = request.model,
            messages = request.messages.len(),
            files = files.len(),
            "sending chat request with attachments"
        );
        self.client.post_chat_with_files(request, files).await
    }

    async fn health(&self) -> Result<HealthStatus, GatewayError> {
        let body: HealthBody = self.client.get(client::HEALTH_PATH).await?;
        if body.status.eq_ignore_ascii_case("ok") {
            Ok(HealthStatus::Healthy {
                models_supported: body.models_supported,
            })
        } else {
            Ok(HealthStatus::Degraded(body.status))
        }
    }
}

#[async_trait]
impl InsightsSource for HttpGateway {
    async fn overview(&self) -> Result<Overview, GatewayError> {
        self.client.get(InsightsQuery::Overview.path()).await
    }

    async fn timeline(&self, granularity: Granularity) -> Result<Vec<TimelinePoint>, GatewayError> {
        let path = format!(
            "{}?granularity={granularity}",
            InsightsQuery::Timeline.path()
        );
        self.client.get(&path).await
    }

    async fn models(&self) -> Result<Vec<ModelStat>, GatewayError> {
        self.client.get(InsightsQuery::Models.path()).await
    }

    async fn heatmap(&self) -> Result<Vec<HourlyIntensity>, GatewayError> {
        self.client.get(InsightsQuery::Heatmap.path()).await
    }

    async fn equivalents(&self) -> Result<Equivalents, GatewayError> {
        self.client.get(InsightsQuery::Equivalents.path()).await
    }

    async fn recommendations(&self) -> Result<Recommendations, GatewayError> {
        self.client.get(InsightsQuery::Recommendations.path()).await
    }
}
