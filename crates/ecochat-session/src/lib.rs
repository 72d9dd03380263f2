// SPDX-FileCopyrightText: 2026 Ecochat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversation sessions for the ecochat gateway client.
//!
//! A [`ConversationSession`] holds one chat history, the selected model, and
//! a single-flight send guard. It talks to the gateway through the
//! [`ecochat_core::ChatGateway`] trait.

pub mod session;

pub use session::{
    ConversationSession, IgnoreReason, PendingSend, SendOutcome, SessionState, EMPTY_REPLY,
    ERROR_NOTICE_PREFIX,
};
