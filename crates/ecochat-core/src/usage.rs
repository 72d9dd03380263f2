// SPDX-FileCopyrightText: 2026 Ecochat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-request usage figures extracted from chat responses.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Token, cost, and carbon figures for one chat request.
///
/// Any figure missing from the response is zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct UsageRecord {
    pub input_tokens: u64,
    pub output_tokens: u64,
    pub cost_eur: f64,
    pub est_co2e_g: f64,
    /// Estimated energy in kWh, when the gateway reports it.
    #[serde(default)]
    pub est_kwh: f64,
}

impl UsageRecord {
    /// Extracts usage from a raw response body.
    ///
    /// Token counts are read from the nested `usage` object, falling back to
    /// the top level so flat records like `{"input_tokens": 5}` also parse.
    /// Absent or non-numeric fields become zero. Never fails.
    pub fn parse(raw: &Value) -> Self {
        let usage = raw.get("usage").filter(|u| u.is_object());
        let tokens = |key: &str| {
            usage
                .and_then(|u| u.get(key))
                .or_else(|| raw.get(key))
                .map(as_token_count)
                .unwrap_or(0)
        };

        Self {
            input_tokens: tokens("input_tokens"),
            output_tokens: tokens("output_tokens"),
            cost_eur: as_real(raw.get("cost_eur")),
            est_co2e_g: as_real(raw.get("est_co2e_g")),
            est_kwh: as_real(raw.get("est_kwh")),
        }
    }

    pub fn total_tokens(&self) -> u64 {
        self.input_tokens + self.output_tokens
    }

    /// True when the response reported nothing at all.
    pub fn is_empty(&self) -> bool {
        self.total_tokens() == 0 && self.cost_eur == 0.0 && self.est_co2e_g == 0.0
    }
}

// Some backends emit token counts as floats (`12.0`).
fn as_token_count(value: &Value) -> u64 {
    value
        .as_u64()
        .or_else(|| value.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64))
        .unwrap_or(0)
}

fn as_real(value: Option<&Value>) -> f64 {
    value.and_then(Value::as_f64).unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_object_parses_to_zero() {
        let record = UsageRecord::parse(&json!({}));
        assert_eq!(record.input_tokens, 0);
        assert_eq!(record.output_tokens, 0);
        assert_eq!(record.cost_eur, 0.0);
        assert_eq!(record.est_co2e_g, 0.0);
        assert!(record.is_empty());
    }

    #[test]
    fn flat_input_tokens_only() {
        let record = UsageRecord::parse(&json!({"input_tokens": 5}));
        assert_eq!(record.input_tokens, 5);
        assert_eq!(record.output_tokens, 0);
        assert_eq!(record.cost_eur, 0.0);
        assert_eq!(record.est_co2e_g, 0.0);
    }

    #[test]
    fn full_gateway_response() {
        let raw = json!({
            "content": "hi",
            "usage": {"input_tokens": 120, "output_tokens": 48},
            "cost_eur": 0.000312,
            "est_kwh": 0.00002,
            "est_co2e_g": 0.134
        });
        let record = UsageRecord::parse(&raw);
        assert_eq!(record.input_tokens, 120);
        assert_eq!(record.output_tokens, 48);
        assert_eq!(record.total_tokens(), 168);
        assert!((record.cost_eur - 0.000312).abs() < f64::EPSILON);
        assert!((record.est_co2e_g - 0.134).abs() < f64::EPSILON);
        assert!((record.est_kwh - 0.00002).abs() < f64::EPSILON);
    }

    #[test]
    fn nested_usage_wins_over_top_level() {
        let raw = json!({"input_tokens": 1, "usage": {"input_tokens": 9}});
        assert_eq!(UsageRecord::parse(&raw).input_tokens, 9);
    }

    #[test]
    fn non_numeric_fields_default_to_zero() {
        let raw = json!({
            "usage": {"input_tokens": "many", "output_tokens": null},
            "cost_eur": "free",
            "est_co2e_g": []
        });
        let record = UsageRecord::parse(&raw);
        assert_eq!(record, UsageRecord::default());
    }

    #[test]
    fn float_token_counts_are_accepted() {
        let record = UsageRecord::parse(&json!({"usage": {"output_tokens": 12.0}}));
        assert_eq!(record.output_tokens, 12);
    }

    #[test]
    fn non_object_input_parses_to_zero() {
        assert_eq!(UsageRecord::parse(&json!(null)), UsageRecord::default());
        assert_eq!(UsageRecord::parse(&json!("text")), UsageRecord::default());
    }
}
