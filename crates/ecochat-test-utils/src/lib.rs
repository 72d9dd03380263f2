// SPDX-FileCopyrightText: 2026 Ecochat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for ecochat integration tests.
//!
//! Provides mock adapters and canned insight fixtures for fast,
//! deterministic tests without a running gateway.
//!
//! # Components
//!
//! - [`MockGateway`] - Scripted chat gateway that records every call
//! - [`MockInsights`] - Insights source with per-query failure injection
//! - [`fixtures`] - Sample analytics payloads

pub mod fixtures;
pub mod mock_gateway;
pub mod mock_insights;

pub use mock_gateway::{MockGateway, RecordedCall, Route};
pub use mock_insights::MockInsights;
