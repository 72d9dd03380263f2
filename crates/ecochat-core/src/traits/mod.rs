// SPDX-FileCopyrightText: 2026 Ecochat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapter traits at the boundary with the remote gateway.
//!
//! Both traits use `#[async_trait]` so sessions and aggregators can hold
//! them as trait objects.

pub mod gateway;
pub mod insights;

pub use gateway::ChatGateway;
pub use insights::InsightsSource;
