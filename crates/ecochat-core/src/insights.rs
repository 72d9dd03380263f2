// SPDX-FileCopyrightText: 2026 Ecochat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wire types for the gateway's insights endpoints.
//!
//! These mirror what the server sends. Derived values (heatmap normalization,
//! efficiency tiers, display labels) live in `ecochat-insights`.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Time-bucket size for the carbon timeline.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    EnumIter,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Granularity {
    Hour,
    #[default]
    Day,
    Week,
    Month,
}

/// The six independent reads that make up a dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum InsightsQuery {
    Overview,
    Timeline,
    Models,
    Heatmap,
    Equivalents,
    Recommendations,
}

impl InsightsQuery {
    /// Request path relative to the endpoint base, without query string.
    pub fn path(self) -> &'static str {
        match self {
            InsightsQuery::Overview => "/insights/overview",
            InsightsQuery::Timeline => "/insights/timeline",
            InsightsQuery::Models => "/insights/models",
            InsightsQuery::Heatmap => "/insights/heatmap",
            InsightsQuery::Equivalents => "/insights/equivalents",
            InsightsQuery::Recommendations => "/insights/recommendations",
        }
    }
}

/// Aggregate totals across all recorded requests.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Overview {
    pub total_carbon_gco2eq: f64,
    pub total_energy_kwh: f64,
    pub total_requests: u64,
    pub avg_carbon_per_request: f64,
    #[serde(default)]
    pub total_tokens: Option<u64>,
    /// First and last trace timestamps; absent when there is no data.
    #[serde(default)]
    pub date_range: Option<DateRange>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: String,
    pub end: String,
}

/// One timeline bucket. The server returns these in ascending date order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelinePoint {
    /// Bucket label, e.g. `2025-03-14` or `2025-03-14 09:00`.
    pub date: String,
    pub carbon_gco2eq: f64,
    pub requests: u64,
    #[serde(default)]
    pub energy_kwh: f64,
}

/// Per-model aggregate statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelStat {
    /// Model identifier, usually `provider:name`.
    pub model: String,
    pub requests: u64,
    pub total_carbon_gco2eq: f64,
    pub carbon_per_1k_tokens: f64,
    pub total_tokens: u64,
    /// Upstream-computed score in `[0, 100]`.
    pub efficiency_score: u8,
    #[serde(default)]
    pub total_energy_kwh: f64,
    #[serde(default)]
    pub avg_carbon_per_request: f64,
}

/// Raw heatmap entry for one hour of the day, before normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyIntensity {
    /// Hour of day, 0-23.
    pub hour: u8,
    pub carbon_gco2eq: f64,
    pub requests: u64,
    /// Average carbon per request during this hour.
    pub intensity: f64,
}

/// Total emissions converted into everyday equivalents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Equivalents {
    #[serde(default)]
    pub netflix_hours: f64,
    #[serde(default)]
    pub emails_sent: f64,
    #[serde(default)]
    pub km_car: f64,
    #[serde(default)]
    pub smartphone_charges: f64,
    #[serde(default)]
    pub trees_needed: f64,
}

/// Advisory payload, passed through exactly as the server sent it.
pub type Recommendations = serde_json::Value;

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn granularity_query_values() {
        assert_eq!(Granularity::Day.to_string(), "day");
        assert_eq!(Granularity::Week.to_string(), "week");
        assert_eq!(Granularity::Month.to_string(), "month");
        assert_eq!(Granularity::from_str("WEEK").unwrap(), Granularity::Week);
        assert_eq!(Granularity::default(), Granularity::Day);
    }

    #[test]
    fn overview_without_date_range() {
        let json = r#"{
            "total_requests": 0,
            "total_tokens": 0,
            "total_energy_kwh": 0,
            "total_carbon_gco2eq": 0,
            "avg_carbon_per_request": 0,
            "date_range": null
        }"#;
        let overview: Overview = serde_json::from_str(json).unwrap();
        assert_eq!(overview.total_requests, 0);
        assert!(overview.date_range.is_none());
    }

    #[test]
    fn model_stat_tolerates_missing_extras() {
        let json = r#"{
            "model": "openai:gpt-4o",
            "requests": 3,
            "total_carbon_gco2eq": 1.25,
            "carbon_per_1k_tokens": 0.8,
            "total_tokens": 1500,
            "efficiency_score": 70
        }"#;
        let stat: ModelStat = serde_json::from_str(json).unwrap();
        assert_eq!(stat.efficiency_score, 70);
        assert_eq!(stat.total_energy_kwh, 0.0);
    }

    #[test]
    fn query_paths() {
        assert_eq!(InsightsQuery::Timeline.path(), "/insights/timeline");
        assert_eq!(InsightsQuery::Recommendations.to_string(), "recommendations");
    }
}
