// SPDX-FileCopyrightText: 2026 Ecochat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The assembled, normalized result of one dashboard load.

use chrono::{DateTime, Utc};
use ecochat_core::Granularity;
use ecochat_core::insights::{Equivalents, ModelStat, Overview, Recommendations, TimelinePoint};
use serde::Serialize;

use crate::normalize::{EfficiencyTier, HeatmapCell, model_label};

/// Per-model statistics with derived display fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelCard {
    pub stat: ModelStat,
    pub label: String,
    pub tier: EfficiencyTier,
}

impl ModelCard {
    pub fn from_stat(stat: ModelStat) -> Self {
        Self {
            label: model_label(&stat.model).to_string(),
            tier: EfficiencyTier::classify(stat.efficiency_score),
            stat,
        }
    }
}

/// All six insight reads from a single successful load.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSnapshot {
    pub granularity: Granularity,
    pub overview: Overview,
    pub timeline: Vec<TimelinePoint>,
    pub models: Vec<ModelCard>,
    pub heatmap: Vec<HeatmapCell>,
    pub equivalents: Equivalents,
    pub recommendations: Recommendations,
    pub loaded_at: DateTime<Utc>,
}
