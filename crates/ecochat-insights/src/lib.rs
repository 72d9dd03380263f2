// SPDX-FileCopyrightText: 2026 Ecochat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Usage and carbon analytics for the ecochat gateway client.
//!
//! [`AnalyticsAggregator`] runs the six insight reads concurrently and
//! normalizes them into a [`DashboardSnapshot`]; [`Dashboard`] tracks the
//! outcome of the latest load.

pub mod aggregator;
pub mod dashboard;
pub mod normalize;
pub mod snapshot;

pub use aggregator::AnalyticsAggregator;
pub use dashboard::{Dashboard, DashboardState};
pub use normalize::{
    EfficiencyTier, HeatmapCell, heatmap_alpha, heatmap_hue, model_label, normalize_heatmap,
};
pub use snapshot::{DashboardSnapshot, ModelCard};
