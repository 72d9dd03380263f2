// SPDX-FileCopyrightText: 2026 Ecochat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the ecochat gateway client.
//!
//! This crate provides the conversation data model, the usage record parser,
//! the typed model catalog, insights wire types, error types, and the adapter
//! traits that the HTTP client and test mocks implement.

pub mod catalog;
pub mod error;
pub mod insights;
pub mod traits;
pub mod types;
pub mod usage;

// Re-export key items at crate root for ergonomic imports.
pub use catalog::{ModelEntry, Provider};
pub use error::{AggregationError, EcochatError, GatewayError};
pub use insights::{Granularity, InsightsQuery};
pub use types::{ChatMessage, ChatRequest, ChatResponse, FileRef, HealthStatus, Message, Role};
pub use usage::UsageRecord;

pub use traits::{ChatGateway, InsightsSource};

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use strum::IntoEnumIterator;

    #[test]
    fn role_serializes_lowercase() {
        let msg = Message::user("hello", Vec::new()).to_chat_message();
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json, serde_json::json!({"role": "user", "content": "hello"}));
        assert_eq!(Role::Assistant.to_string(), "assistant");
    }

    #[test]
    fn chat_message_drops_attachments() {
        let msg = Message::user("see file", vec![FileRef::new("a.txt", b"abc".to_vec())]);
        let wire = serde_json::to_string(&msg.to_chat_message()).unwrap();
        assert!(!wire.contains("a.txt"));
    }

    #[test]
    fn file_ref_debug_omits_payload() {
        let file = FileRef::new("big.bin", vec![7u8; 4096]).with_mime_type("application/pdf");
        let debug = format!("{file:?}");
        assert!(debug.contains("big.bin"));
        assert!(debug.contains("4096"));
        assert!(!debug.contains("7, 7"));
    }

    #[test]
    fn chat_response_accepts_empty_object() {
        let response: ChatResponse = serde_json::from_str("{}").unwrap();
        assert!(response.content.is_none());
        assert!(response.usage.is_empty());
    }

    #[test]
    fn chat_response_reads_flat_token_counts() {
        let response: ChatResponse =
            serde_json::from_str(r#"{"content": "ok", "input_tokens": 5}"#).unwrap();
        assert_eq!(response.content.as_deref(), Some("ok"));
        assert_eq!(response.usage.input_tokens, 5);
    }

    #[test]
    fn chat_response_tolerates_odd_numeric_fields() {
        let response: ChatResponse = serde_json::from_str(
            r#"{"content": "ok", "cost_eur": "0.01", "usage": {"input_tokens": 3}}"#,
        )
        .unwrap();
        assert_eq!(response.usage.input_tokens, 3);
        assert_eq!(response.usage.cost_eur, 0.0);
    }

    #[test]
    fn chat_response_ignores_non_string_content() {
        let response: ChatResponse = serde_json::from_str(r#"{"content": 42}"#).unwrap();
        assert!(response.content.is_none());
    }

    #[test]
    fn aggregation_error_names_the_failed_query() {
        let err = AggregationError::from_gateway(
            InsightsQuery::Heatmap,
            GatewayError::new("GET /insights/heatmap -> 500"),
        );
        let text = err.to_string();
        assert!(text.contains("heatmap"), "got: {text}");
        assert!(text.contains("500"), "got: {text}");
    }

    #[test]
    fn ecochat_error_wraps_domain_errors() {
        let err: EcochatError = GatewayError::new("down").into();
        assert!(matches!(err, EcochatError::Gateway(_)));
        assert_eq!(err.to_string(), "gateway error: down");
    }

    #[test]
    fn six_insight_queries() {
        assert_eq!(InsightsQuery::iter().count(), 6);
    }

    proptest! {
        #[test]
        fn parse_preserves_reported_token_counts(input in 0u64..1_000_000_000, output in 0u64..1_000_000_000) {
            let raw = serde_json::json!({"usage": {"input_tokens": input, "output_tokens": output}});
            let record = UsageRecord::parse(&raw);
            prop_assert_eq!(record.input_tokens, input);
            prop_assert_eq!(record.output_tokens, output);
            prop_assert_eq!(record.total_tokens(), input + output);
        }

        #[test]
        fn parse_preserves_reported_reals(cost in 0.0f64..1000.0, carbon in 0.0f64..1000.0) {
            let raw = serde_json::json!({"cost_eur": cost, "est_co2e_g": carbon});
            let record = UsageRecord::parse(&raw);
            prop_assert_eq!(record.cost_eur, cost);
            prop_assert_eq!(record.est_co2e_g, carbon);
        }
    }
}
