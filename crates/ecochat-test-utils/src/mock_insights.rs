// SPDX-FileCopyrightText: 2026 Ecochat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock insights source for deterministic testing.
//!
//! Serves the payloads from [`crate::fixtures`] (or overrides), can fail any
//! subset of the six queries, and can delay every read to exercise
//! concurrent fan-in.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;

use ecochat_core::insights::{
    Equivalents, HourlyIntensity, ModelStat, Overview, Recommendations, TimelinePoint,
};
use ecochat_core::{GatewayError, Granularity, InsightsQuery, InsightsSource};

use crate::fixtures;

/// An insights source with configurable data, failures, and latency.
#[derive(Clone)]
pub struct MockInsights {
    heatmap: Vec<HourlyIntensity>,
    models: Vec<ModelStat>,
    failing: HashSet<InsightsQuery>,
    delay: Option<Duration>,
    requested: Arc<Mutex<Vec<InsightsQuery>>>,
    granularities: Arc<Mutex<Vec<Granularity>>>,
}

impl MockInsights {
    /// A source serving the standard fixtures.
    pub fn new() -> Self {
        Self {
            heatmap: fixtures::heatmap(),
            models: fixtures::models(),
            failing: HashSet::new(),
            delay: None,
            requested: Arc::new(Mutex::new(Vec::new())),
            granularities: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Replace the heatmap payload.
    pub fn with_heatmap(mut self, heatmap: Vec<HourlyIntensity>) -> Self {
        self.heatmap = heatmap;
        self
    }

    /// Replace the per-model payload.
    pub fn with_models(mut self, models: Vec<ModelStat>) -> Self {
        self.models = models;
        self
    }

    /// Make `query` fail with a 500-style error.
    pub fn failing(mut self, query: InsightsQuery) -> Self {
        self.failing.insert(query);
        self
    }

    /// Sleep this long inside every read.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Queries served so far, in completion order.
    pub async fn requested(&self) -> Vec<InsightsQuery> {
        self.requested.lock().await.clone()
    }

    /// Granularities passed to `timeline`, oldest first.
    pub async fn granularities(&self) -> Vec<Granularity> {
        self.granularities.lock().await.clone()
    }

    async fn serve<T>(&self, query: InsightsQuery, value: T) -> Result<T, GatewayError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.requested.lock().await.push(query);
        if self.failing.contains(&query) {
            return Err(GatewayError::new(format!(
                "GET {} -> 500 Internal Server Error",
                query.path()
            )));
        }
        Ok(value)
    }
}

impl Default for MockInsights {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl InsightsSource for MockInsights {
    async fn overview(&self) -> Result<Overview, GatewayError> {
        self.serve(InsightsQuery::Overview, fixtures::overview()).await
    }

    async fn timeline(&self, granularity: Granularity) -> Result<Vec<TimelinePoint>, GatewayError> {
        self.granularities.lock().await.push(granularity);
        self.serve(InsightsQuery::Timeline, fixtures::timeline()).await
    }

    async fn models(&self) -> Result<Vec<ModelStat>, GatewayError> {
        self.serve(InsightsQuery::Models, self.models.clone()).await
    }

    async fn heatmap(&self) -> Result<Vec<HourlyIntensity>, GatewayError> {
        self.serve(InsightsQuery::Heatmap, self.heatmap.clone()).await
    }

    async fn equivalents(&self) -> Result<Equivalents, GatewayError> {
        self.serve(InsightsQuery::Equivalents, fixtures::equivalents())
            .await
    }

    async fn recommendations(&self) -> Result<Recommendations, GatewayError> {
        self.serve(InsightsQuery::Recommendations, fixtures::recommendations())
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn failing_query_returns_error_others_succeed() {
        let source = MockInsights::new().failing(InsightsQuery::Heatmap);
        assert!(source.heatmap().await.is_err());
        assert!(source.overview().await.is_ok());
        assert_eq!(
            source.requested().await,
            vec![InsightsQuery::Heatmap, InsightsQuery::Overview]
        );
    }

    #[tokio::test]
    async fn timeline_records_granularity() {
        let source = MockInsights::new();
        source.timeline(Granularity::Month).await.unwrap();
        assert_eq!(source.granularities().await, vec![Granularity::Month]);
    }
}
