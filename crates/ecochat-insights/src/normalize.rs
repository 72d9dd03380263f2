// SPDX-FileCopyrightText: 2026 Ecochat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Pure transforms from raw insight payloads to display-ready values.

use ecochat_core::insights::HourlyIntensity;
use serde::Serialize;
use strum::Display;

/// Score at or above which a model is rated excellent.
pub const EXCELLENT_THRESHOLD: u8 = 80;

/// Score at or above which a model is rated good.
pub const GOOD_THRESHOLD: u8 = 60;

/// Efficiency rating bucket for a model's upstream score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum EfficiencyTier {
    Poor,
    Good,
    Excellent,
}

impl EfficiencyTier {
    pub fn classify(score: u8) -> Self {
        if score >= EXCELLENT_THRESHOLD {
            EfficiencyTier::Excellent
        } else if score >= GOOD_THRESHOLD {
            EfficiencyTier::Good
        } else {
            EfficiencyTier::Poor
        }
    }
}

/// One heatmap hour with its intensity scaled against the batch maximum.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeatmapCell {
    pub hour: u8,
    pub carbon_gco2eq: f64,
    pub requests: u64,
    pub intensity: f64,
    /// `intensity / max(intensity)` over the batch, in `[0, 1]`.
    pub normalized_intensity: f64,
}

/// Scales every intensity by the largest one in the batch.
///
/// An empty batch stays empty. When the maximum is not positive, every cell
/// is 0. Negative intensities clamp to 0.
pub fn normalize_heatmap(raw: &[HourlyIntensity]) -> Vec<HeatmapCell> {
    let max = raw
        .iter()
        .map(|h| h.intensity)
        .fold(f64::NEG_INFINITY, f64::max);

    raw.iter()
        .map(|h| {
            let normalized_intensity = if max > 0.0 {
                (h.intensity / max).clamp(0.0, 1.0)
            } else {
                0.0
            };
            HeatmapCell {
                hour: h.hour,
                carbon_gco2eq: h.carbon_gco2eq,
                requests: h.requests,
                intensity: h.intensity,
                normalized_intensity,
            }
        })
        .collect()
}

/// Display label for a model identifier: the part after the first `:`.
///
/// Identifiers without a `:`, or with nothing after it, are returned whole.
pub fn model_label(id: &str) -> &str {
    match id.split_once(':') {
        Some((_, rest)) if !rest.is_empty() => rest,
        _ => id,
    }
}

/// Hue in degrees for a normalized intensity: 120 (green) down to 0 (red).
pub fn heatmap_hue(normalized: f64) -> f64 {
    120.0 - 120.0 * normalized.clamp(0.0, 1.0)
}

/// Opacity for a normalized intensity, from 0.3 up to 1.0.
pub fn heatmap_alpha(normalized: f64) -> f64 {
    0.3 + 0.7 * normalized.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn cell(hour: u8, intensity: f64) -> HourlyIntensity {
        HourlyIntensity {
            hour,
            carbon_gco2eq: 0.0,
            requests: 1,
            intensity,
        }
    }

    #[test]
    fn tier_boundaries() {
        assert_eq!(EfficiencyTier::classify(100), EfficiencyTier::Excellent);
        assert_eq!(EfficiencyTier::classify(80), EfficiencyTier::Excellent);
        assert_eq!(EfficiencyTier::classify(79), EfficiencyTier::Good);
        assert_eq!(EfficiencyTier::classify(60), EfficiencyTier::Good);
        assert_eq!(EfficiencyTier::classify(59), EfficiencyTier::Poor);
        assert_eq!(EfficiencyTier::classify(0), EfficiencyTier::Poor);
    }

    #[test]
    fn tier_display() {
        assert_eq!(EfficiencyTier::Excellent.to_string(), "excellent");
        assert_eq!(EfficiencyTier::Poor.to_string(), "poor");
    }

    #[test]
    fn heatmap_scales_by_max() {
        let cells = normalize_heatmap(&[cell(1, 10.0), cell(2, 20.0), cell(3, 40.0)]);
        let normalized: Vec<f64> = cells.iter().map(|c| c.normalized_intensity).collect();
        assert_eq!(normalized, vec![0.25, 0.5, 1.0]);
        assert_eq!(cells[2].intensity, 40.0);
    }

    #[test]
    fn empty_heatmap_stays_empty() {
        assert!(normalize_heatmap(&[]).is_empty());
    }

    #[test]
    fn zero_max_gives_all_zero() {
        let cells = normalize_heatmap(&[cell(0, 0.0), cell(1, 0.0)]);
        assert!(cells.iter().all(|c| c.normalized_intensity == 0.0));
    }

    #[test]
    fn labels() {
        assert_eq!(model_label("openai:gpt-4o"), "gpt-4o");
        assert_eq!(model_label("standalone-model"), "standalone-model");
        assert_eq!(model_label("openrouter:meta:llama"), "meta:llama");
        assert_eq!(model_label("broken:"), "broken:");
    }

    #[test]
    fn hue_and_alpha_endpoints() {
        assert_eq!(heatmap_hue(0.0), 120.0);
        assert_eq!(heatmap_hue(1.0), 0.0);
        assert_eq!(heatmap_alpha(0.0), 0.3);
        assert_eq!(heatmap_alpha(1.0), 1.0);
    }

    proptest! {
        #[test]
        fn normalized_values_stay_in_unit_range(values in proptest::collection::vec(0.0f64..1e6, 1..24)) {
            let raw: Vec<HourlyIntensity> = values
                .iter()
                .enumerate()
                .map(|(i, v)| cell(i as u8, *v))
                .collect();
            let cells = normalize_heatmap(&raw);
            prop_assert_eq!(cells.len(), raw.len());
            for c in &cells {
                prop_assert!((0.0..=1.0).contains(&c.normalized_intensity));
            }
        }

        #[test]
        fn tiers_are_monotonic(a in 0u8..=100, b in 0u8..=100) {
            if a <= b {
                prop_assert!(EfficiencyTier::classify(a) <= EfficiencyTier::classify(b));
            }
        }
    }
}
