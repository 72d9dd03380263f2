// SPDX-FileCopyrightText: 2026 Ecochat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Insights source trait: the six read-only analytics queries.

use async_trait::async_trait;

use crate::error::GatewayError;
use crate::insights::{
    Equivalents, Granularity, HourlyIntensity, ModelStat, Overview, Recommendations,
    TimelinePoint,
};

/// Read access to the gateway's usage and carbon analytics.
///
/// Each method is independent; callers may run them concurrently.
#[async_trait]
pub trait InsightsSource: Send + Sync {
    async fn overview(&self) -> Result<Overview, GatewayError>;

    async fn timeline(&self, granularity: Granularity) -> Result<Vec<TimelinePoint>, GatewayError>;

    async fn models(&self) -> Result<Vec<ModelStat>, GatewayError>;

    async fn heatmap(&self) -> Result<Vec<HourlyIntensity>, GatewayError>;

    async fn equivalents(&self) -> Result<Equivalents, GatewayError>;

    async fn recommendations(&self) -> Result<Recommendations, GatewayError>;
}
