// SPDX-FileCopyrightText: 2026 Ecochat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-view FSM that owns a single conversation with the gateway.
//!
//! Each session alternates between two states: Idle -> Sending -> Idle.
//! A send is accepted only from Idle; anything submitted while a request is
//! outstanding is dropped, never queued.
//!
//! Sends are optimistic: the user message is appended before the gateway
//! answers, and exactly one assistant message (reply or error notice) is
//! appended when it does.

use std::sync::Arc;

use ecochat_core::{
    ChatGateway, ChatRequest, ChatResponse, FileRef, GatewayError, Message, Provider,
    UsageRecord,
};
use tracing::{debug, info, warn};

/// Assistant text used when the gateway replies without content.
pub const EMPTY_REPLY: &str = "(no response)";

/// Prefix of the assistant notice appended when a send fails.
pub const ERROR_NOTICE_PREFIX: &str = "⚠️ Error: ";

/// States in the session FSM.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No request outstanding; sends are accepted.
    Idle,
    /// A request is in flight; further sends are ignored.
    Sending,
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionState::Idle => write!(f, "idle"),
            SessionState::Sending => write!(f, "sending"),
        }
    }
}

/// Why a send was dropped without touching the conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// A previous send has not settled yet.
    AlreadySending,
    /// No model is selected.
    NoModel,
    /// Blank text and no attachments.
    EmptyInput,
    /// `settle` was called with no send outstanding.
    NothingPending,
}

impl std::fmt::Display for IgnoreReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IgnoreReason::AlreadySending => write!(f, "a request is already in flight"),
            IgnoreReason::NoModel => write!(f, "no model selected"),
            IgnoreReason::EmptyInput => write!(f, "nothing to send"),
            IgnoreReason::NothingPending => write!(f, "no request outstanding"),
        }
    }
}

/// Result of a completed send.
#[derive(Debug, Clone, PartialEq)]
pub enum SendOutcome {
    /// The gateway replied; the reply was appended and usage recorded.
    Replied(UsageRecord),
    /// The gateway failed; an error notice was appended.
    Failed(String),
    /// Preconditions were not met; the conversation is unchanged.
    Ignored(IgnoreReason),
}

/// A request that has been committed to the conversation but not yet sent.
///
/// Produced by [`ConversationSession::begin_send`]. Holds no borrow of the
/// session, so the session stays observable while the request is in flight.
#[derive(Debug, Clone)]
pub struct PendingSend {
    request: ChatRequest,
    attachments: Vec<FileRef>,
}

impl PendingSend {
    /// The request body, including the just-appended user message.
    pub fn request(&self) -> &ChatRequest {
        &self.request
    }

    /// Files that travel with this request.
    pub fn attachments(&self) -> &[FileRef] {
        &self.attachments
    }

    /// Performs the single gateway call for this send.
    ///
    /// Uses the multipart endpoint when there are attachments, the JSON one
    /// otherwise.
    pub async fn dispatch(&self, gateway: &dyn ChatGateway) -> Result<ChatResponse, GatewayError> {
        if self.attachments.is_empty() {
            gateway.send_text(&self.request).await
        } else {
            gateway.send_with_files(&self.request, &self.attachments).await
        }
    }
}

/// A single conversation bound to one gateway.
///
/// The session is owned by its view; dropping it or calling
/// [`reset`](Self::reset) discards the history.
pub struct ConversationSession {
    provider: Provider,
    model: Option<String>,
    messages: Vec<Message>,
    sending: bool,
    last_usage: Option<UsageRecord>,
    gateway: Arc<dyn ChatGateway>,
}

impl ConversationSession {
    /// Creates a session with the provider's default model preselected.
    pub fn new(provider: Provider, gateway: Arc<dyn ChatGateway>) -> Self {
        let mut session = Self::without_model(provider, gateway);
        session.model = provider.default_model().map(|entry| entry.id.to_string());
        debug!(
            provider = %provider,
            model = session.model.as_deref().unwrap_or("-"),
            gateway = session.gateway.name(),
            "session created"
        );
        session
    }

    /// Creates a session with no model selected. Sends are ignored until
    /// [`select_model`](Self::select_model) succeeds.
    pub fn without_model(provider: Provider, gateway: Arc<dyn ChatGateway>) -> Self {
        Self {
            provider,
            model: None,
            messages: Vec::new(),
            sending: false,
            last_usage: None,
            gateway,
        }
    }

    pub fn provider(&self) -> Provider {
        self.provider
    }

    pub fn model(&self) -> Option<&str> {
        self.model.as_deref()
    }

    /// The conversation so far, oldest first.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn is_sending(&self) -> bool {
        self.sending
    }

    /// Usage of the most recent successful send, cleared by `reset`.
    pub fn last_usage(&self) -> Option<&UsageRecord> {
        self.last_usage.as_ref()
    }

    pub fn state(&self) -> SessionState {
        if self.sending {
            SessionState::Sending
        } else {
            SessionState::Idle
        }
    }

    /// The gateway this session sends through.
    pub fn gateway(&self) -> Arc<dyn ChatGateway> {
        Arc::clone(&self.gateway)
    }

    /// Selects a model from the provider's catalog.
    ///
    /// Returns `false` and leaves the selection unchanged when `id` is not an
    /// enabled entry for this session's provider.
    pub fn select_model(&mut self, id: &str) -> bool {
        match self.provider.find(id) {
            Some(entry) => {
                debug!(model = entry.id, "model selected");
                self.model = Some(entry.id.to_string());
                true
            }
            None => {
                debug!(model = id, provider = %self.provider, "model not in catalog, ignored");
                false
            }
        }
    }

    /// Clears the conversation and the last usage snapshot.
    ///
    /// Provider and model are kept. A send that is still in flight will
    /// append its reply to the new, empty conversation.
    pub fn reset(&mut self) {
        debug!(dropped = self.messages.len(), "session reset");
        self.messages.clear();
        self.last_usage = None;
    }

    /// Sends `text` and `attachments`, waiting for the gateway to settle.
    ///
    /// Never returns an error: gateway failures become an assistant error
    /// notice and [`SendOutcome::Failed`].
    pub async fn send(&mut self, text: &str, attachments: Vec<FileRef>) -> SendOutcome {
        let pending = match self.begin_send(text, attachments) {
            Ok(pending) => pending,
            Err(reason) => return SendOutcome::Ignored(reason),
        };
        let gateway = Arc::clone(&self.gateway);
        let result = pending.dispatch(gateway.as_ref()).await;
        self.settle(result)
    }

    /// Phase one of a send: validate, append the user message, and mark the
    /// session as sending.
    ///
    /// On rejection the conversation is untouched.
    pub fn begin_send(
        &mut self,
        text: &str,
        attachments: Vec<FileRef>,
    ) -> Result<PendingSend, IgnoreReason> {
        if self.sending {
            debug!("send ignored: already sending");
            return Err(IgnoreReason::AlreadySending);
        }
        let Some(model) = self.model.clone() else {
            debug!("send ignored: no model selected");
            return Err(IgnoreReason::NoModel);
        };
        if text.trim().is_empty() && attachments.is_empty() {
            debug!("send ignored: empty input");
            return Err(IgnoreReason::EmptyInput);
        }

        self.messages
            .push(Message::user(text.trim(), attachments.clone()));
        self.sending = true;

        let request = ChatRequest {
            model,
            messages: self.messages.iter().map(Message::to_chat_message).collect(),
        };
        debug!(
            model = request.model,
            history = request.messages.len(),
            attachments = attachments.len(),
            "send started"
        );

        Ok(PendingSend {
            request,
            attachments,
        })
    }

    /// Phase two of a send: append the reply or error notice and return to Idle.
    pub fn settle(&mut self, result: Result<ChatResponse, GatewayError>) -> SendOutcome {
        if !self.sending {
            warn!("settle called with no send outstanding");
            return SendOutcome::Ignored(IgnoreReason::NothingPending);
        }

        let outcome = match result {
            Ok(response) => {
                let usage = response.usage;
                let content = response
                    .content
                    .filter(|c| !c.is_empty())
                    .unwrap_or_else(|| EMPTY_REPLY.to_string());
                self.messages.push(Message::assistant(content));
                self.last_usage = Some(usage);
                info!(
                    input_tokens = usage.input_tokens,
                    output_tokens = usage.output_tokens,
                    cost_eur = usage.cost_eur,
                    est_co2e_g = usage.est_co2e_g,
                    "reply received"
                );
                SendOutcome::Replied(usage)
            }
            Err(err) => {
                warn!(error = %err.message, "send failed");
                self.messages
                    .push(Message::assistant(format!("{ERROR_NOTICE_PREFIX}{}", err.message)));
                SendOutcome::Failed(err.message)
            }
        };

        self.sending = false;
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ecochat_core::Role;
    use ecochat_test_utils::MockGateway;

    fn session() -> ConversationSession {
        ConversationSession::new(Provider::OpenAi, Arc::new(MockGateway::new()))
    }

    #[test]
    fn state_display() {
        assert_eq!(SessionState::Idle.to_string(), "idle");
        assert_eq!(SessionState::Sending.to_string(), "sending");
    }

    #[test]
    fn new_preselects_default_model() {
        let s = session();
        assert_eq!(s.model(), Some("openai:gpt-4o-mini"));
        assert_eq!(s.state(), SessionState::Idle);
        assert!(s.messages().is_empty());
    }

    #[test]
    fn select_model_rejects_unknown_and_disabled() {
        let mut s = session();
        assert!(s.select_model("openai:gpt-4o"));
        assert_eq!(s.model(), Some("openai:gpt-4o"));
        assert!(!s.select_model("openai:gpt-5"));
        assert!(!s.select_model("mistral:open-mistral-7b"));
        assert_eq!(s.model(), Some("openai:gpt-4o"));
    }

    #[test]
    fn begin_send_appends_user_message_and_builds_history() {
        let mut s = session();
        let pending = s.begin_send("hello", Vec::new()).unwrap();
        assert!(s.is_sending());
        assert_eq!(s.messages().len(), 1);
        assert_eq!(pending.request().messages.len(), 1);
        assert_eq!(pending.request().messages[0].role, Role::User);
        assert_eq!(pending.request().model, "openai:gpt-4o-mini");
    }

    #[test]
    fn begin_send_while_sending_is_ignored() {
        let mut s = session();
        let _pending = s.begin_send("first", Vec::new()).unwrap();
        let err = s.begin_send("second", Vec::new()).unwrap_err();
        assert_eq!(err, IgnoreReason::AlreadySending);
        assert_eq!(s.messages().len(), 1);
    }

    #[test]
    fn settle_without_pending_is_ignored() {
        let mut s = session();
        let outcome = s.settle(Ok(ChatResponse::default()));
        assert_eq!(outcome, SendOutcome::Ignored(IgnoreReason::NothingPending));
        assert!(s.messages().is_empty());
    }

    #[test]
    fn empty_content_becomes_placeholder() {
        let mut s = session();
        s.begin_send("hi", Vec::new()).unwrap();
        s.settle(Ok(ChatResponse {
            content: Some(String::new()),
            ..Default::default()
        }));
        assert_eq!(s.messages()[1].content, EMPTY_REPLY);
    }

    #[test]
    fn attachments_only_is_accepted() {
        let mut s = session();
        let files = vec![FileRef::new("data.csv", b"a,b".to_vec())];
        let pending = s.begin_send("   ", files).unwrap();
        assert_eq!(pending.attachments().len(), 1);
        assert_eq!(s.messages()[0].attachments.len(), 1);
    }
}
