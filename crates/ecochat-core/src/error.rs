// SPDX-FileCopyrightText: 2026 Ecochat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the ecochat gateway client.

use thiserror::Error;

use crate::insights::InsightsQuery;

/// A failed call against the remote gateway.
///
/// Covers transport failures, non-success HTTP statuses, and response bodies
/// that could not be decoded. The gateway never retries, so one of these
/// corresponds to exactly one attempted request.
#[derive(Debug, Error)]
#[error("gateway error: {message}")]
pub struct GatewayError {
    /// Human-readable description, shown verbatim in chat error notices.
    pub message: String,
    /// Underlying transport or decode error, when there is one.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl GatewayError {
    /// Creates an error with only a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Creates an error wrapping an underlying cause.
    pub fn with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

/// A dashboard load that failed because one of its insight reads failed.
///
/// Loads are all-or-nothing: the first failing read fails the whole load
/// and no partial results are kept.
#[derive(Debug, Error)]
#[error("failed to load {query} insights: {message}")]
pub struct AggregationError {
    /// Which of the six reads failed.
    pub query: InsightsQuery,
    /// Description of the underlying gateway failure.
    pub message: String,
}

impl AggregationError {
    /// Tags a gateway failure with the insight read that produced it.
    pub fn from_gateway(query: InsightsQuery, err: GatewayError) -> Self {
        Self {
            query,
            message: err.message,
        }
    }
}

/// The top-level error type for ecochat operations outside the two domain flows.
#[derive(Debug, Error)]
pub enum EcochatError {
    /// Configuration errors (invalid TOML, unknown model, bad endpoint).
    #[error("configuration error: {0}")]
    Config(String),

    /// A gateway call failed and was not absorbed by a session.
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    /// A dashboard load failed.
    #[error(transparent)]
    Aggregation(#[from] AggregationError),

    /// Local I/O failure (reading attachments, terminal setup).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}
