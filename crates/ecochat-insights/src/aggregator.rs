// SPDX-FileCopyrightText: 2026 Ecochat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Concurrent fan-out of the six insight reads into one snapshot.
//!
//! Loads are all-or-nothing: the first read to fail fails the load, and the
//! results of the other reads are discarded.

use std::sync::Arc;

use chrono::Utc;
use ecochat_core::{AggregationError, GatewayError, Granularity, InsightsQuery, InsightsSource};
use tracing::{debug, info, warn};

use crate::normalize::normalize_heatmap;
use crate::snapshot::{DashboardSnapshot, ModelCard};

fn tag(query: InsightsQuery) -> impl FnOnce(GatewayError) -> AggregationError {
    move |err| AggregationError::from_gateway(query, err)
}

/// Builds [`DashboardSnapshot`]s from an [`InsightsSource`].
#[derive(Clone)]
pub struct AnalyticsAggregator {
    source: Arc<dyn InsightsSource>,
}

impl AnalyticsAggregator {
    pub fn new(source: Arc<dyn InsightsSource>) -> Self {
        Self { source }
    }

    /// Issues all six reads concurrently and assembles the snapshot.
    pub async fn load(&self, granularity: Granularity) -> Result<DashboardSnapshot, AggregationError> {
        debug!(%granularity, "loading insights");
        let source = self.source.as_ref();

        let result = futures::try_join!(
            async { source.overview().await.map_err(tag(InsightsQuery::Overview)) },
            async {
                source
                    .timeline(granularity)
                    .await
                    .map_err(tag(InsightsQuery::Timeline))
            },
            async { source.models().await.map_err(tag(InsightsQuery::Models)) },
            async { source.heatmap().await.map_err(tag(InsightsQuery::Heatmap)) },
            async {
                source
                    .equivalents()
                    .await
                    .map_err(tag(InsightsQuery::Equivalents))
            },
            async {
                source
                    .recommendations()
                    .await
                    .map_err(tag(InsightsQuery::Recommendations))
            },
        );

        let (overview, timeline, models, heatmap, equivalents, recommendations) = match result {
            Ok(parts) => parts,
            Err(err) => {
                warn!(query = %err.query, error = %err.message, "insights load failed");
                return Err(err);
            }
        };

        let snapshot = DashboardSnapshot {
            granularity,
            overview,
            timeline,
            models: models.into_iter().map(ModelCard::from_stat).collect(),
            heatmap: normalize_heatmap(&heatmap),
            equivalents,
            recommendations,
            loaded_at: Utc::now(),
        };

        info!(
            %granularity,
            total_requests = snapshot.overview.total_requests,
            total_carbon_gco2eq = snapshot.overview.total_carbon_gco2eq,
            models = snapshot.models.len(),
            "insights loaded"
        );

        Ok(snapshot)
    }
}
