// SPDX-FileCopyrightText: 2026 Ecochat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Dashboard FSM: Idle -> Loading -> Ready | Failed.
//!
//! Every refresh re-enters Loading and replaces the previous result. A
//! failed load is never retried automatically.

use ecochat_core::{AggregationError, Granularity};
use tracing::debug;

use crate::aggregator::AnalyticsAggregator;
use crate::snapshot::DashboardSnapshot;

/// States in the dashboard FSM.
#[derive(Debug)]
pub enum DashboardState {
    /// Nothing requested yet.
    Idle,
    /// A load is in progress.
    Loading,
    /// The last load succeeded.
    Ready(Box<DashboardSnapshot>),
    /// The last load failed.
    Failed(AggregationError),
}

impl std::fmt::Display for DashboardState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DashboardState::Idle => write!(f, "idle"),
            DashboardState::Loading => write!(f, "loading"),
            DashboardState::Ready(_) => write!(f, "ready"),
            DashboardState::Failed(_) => write!(f, "failed"),
        }
    }
}

/// Owns the current granularity and the outcome of the last load.
pub struct Dashboard {
    aggregator: AnalyticsAggregator,
    granularity: Granularity,
    state: DashboardState,
}

impl Dashboard {
    pub fn new(aggregator: AnalyticsAggregator, granularity: Granularity) -> Self {
        Self {
            aggregator,
            granularity,
            state: DashboardState::Idle,
        }
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    pub fn granularity(&self) -> Granularity {
        self.granularity
    }

    /// The snapshot from the last successful load, if the dashboard is Ready.
    pub fn snapshot(&self) -> Option<&DashboardSnapshot> {
        match &self.state {
            DashboardState::Ready(snapshot) => Some(snapshot.as_ref()),
            _ => None,
        }
    }

    /// Consumes the dashboard, yielding its final state.
    pub fn into_state(self) -> DashboardState {
        self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, DashboardState::Loading)
    }

    /// The aggregator loads run through, for callers driving the two phases.
    pub fn aggregator(&self) -> &AnalyticsAggregator {
        &self.aggregator
    }

    /// Phase one of a load: enter Loading and hand back the granularity to
    /// load at. The previous snapshot, if any, is dropped.
    pub fn begin_load(&mut self) -> Granularity {
        debug!(from = %self.state, granularity = %self.granularity, "dashboard load started");
        self.state = DashboardState::Loading;
        self.granularity
    }

    /// Phase two of a load: record the outcome as Ready or Failed.
    pub fn finish(
        &mut self,
        result: Result<DashboardSnapshot, AggregationError>,
    ) -> &DashboardState {
        self.state = match result {
            Ok(snapshot) => DashboardState::Ready(Box::new(snapshot)),
            Err(err) => DashboardState::Failed(err),
        };
        debug!(to = %self.state, "dashboard load finished");
        &self.state
    }

    /// Reloads all insights at the current granularity.
    pub async fn refresh(&mut self) -> &DashboardState {
        let granularity = self.begin_load();
        let result = self.aggregator.load(granularity).await;
        self.finish(result)
    }

    /// Switches granularity and reloads.
    pub async fn set_granularity(&mut self, granularity: Granularity) -> &DashboardState {
        self.granularity = granularity;
        self.refresh().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use ecochat_core::InsightsQuery;
    use ecochat_test_utils::MockInsights;

    fn dashboard(source: MockInsights) -> Dashboard {
        Dashboard::new(AnalyticsAggregator::new(Arc::new(source)), Granularity::Day)
    }

    #[test]
    fn starts_idle() {
        let d = dashboard(MockInsights::new());
        assert!(matches!(d.state(), DashboardState::Idle));
        assert!(d.snapshot().is_none());
        assert_eq!(d.state().to_string(), "idle");
    }

    #[tokio::test]
    async fn refresh_reaches_ready() {
        let mut d = dashboard(MockInsights::new());
        let state = d.refresh().await;
        assert!(matches!(state, DashboardState::Ready(_)));
        assert_eq!(d.snapshot().map(|s| s.granularity), Some(Granularity::Day));
    }

    #[tokio::test]
    async fn refresh_reaches_failed() {
        let mut d = dashboard(MockInsights::new().failing(InsightsQuery::Models));
        match d.refresh().await {
            DashboardState::Failed(err) => assert_eq!(err.query, InsightsQuery::Models),
            other => panic!("expected failed, got {other}"),
        }
        assert!(d.snapshot().is_none());
        assert!(!d.is_loading());
        assert!(matches!(d.into_state(), DashboardState::Failed(_)));
    }

    #[tokio::test]
    async fn loading_is_visible_between_phases() {
        let mut d = dashboard(MockInsights::new());
        d.refresh().await;
        assert!(d.snapshot().is_some());

        let granularity = d.begin_load();
        assert_eq!(granularity, Granularity::Day);
        assert!(d.is_loading());
        assert_eq!(d.state().to_string(), "loading");
        assert!(d.snapshot().is_none());

        let aggregator = d.aggregator().clone();
        let result = aggregator.load(granularity).await;
        assert!(matches!(d.finish(result), DashboardState::Ready(_)));
        assert!(!d.is_loading());
    }

    #[tokio::test]
    async fn failed_load_is_not_retried_until_asked() {
        let source = MockInsights::new().failing(InsightsQuery::Heatmap);
        let mut d = dashboard(source.clone());
        d.refresh().await;
        assert!(matches!(d.state(), DashboardState::Failed(_)));
        assert_eq!(source.granularities().await.len(), 1);

        d.refresh().await;
        assert_eq!(source.granularities().await.len(), 2);
    }

    #[tokio::test]
    async fn set_granularity_reloads_with_new_value() {
        let source = MockInsights::new();
        let mut d = dashboard(source.clone());
        d.refresh().await;
        d.set_granularity(Granularity::Week).await;

        assert_eq!(d.granularity(), Granularity::Week);
        assert_eq!(d.snapshot().map(|s| s.granularity), Some(Granularity::Week));
        assert_eq!(
            source.granularities().await,
            vec![Granularity::Day, Granularity::Week]
        );
    }
}
