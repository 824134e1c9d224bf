// src/services/session_manager.rs
//! The conversation held by one chat view.
//!
//! `ChatSession` owns the message history and the single-flight `pending`
//! flag. Every accepted submit appends one user entry right away and one
//! assistant entry once the generation call settles. Failures are turned
//! into ordinary assistant entries so the view never sees an error type.

use std::{
    fmt::Debug,
    str::FromStr,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::broadcast;
use tracing::{error, info, warn};
use uuid::Uuid;

use super::gemini::{GenerationClient, GenerationError};
use super::metrics_manager::{MetricsManager, Outcome};
use super::prompts::{API_ERROR, ERROR_PREFIX, NETWORK_ERROR, PROMPT_SUGGESTIONS, WELCOME_MESSAGE};

const EVENT_CAPACITY: usize = 64;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Message {
    pub id: Uuid,
    pub role: MessageRole,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    fn new(role: MessageRole, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            role,
            text: text.into(),
            timestamp: Utc::now(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

/// How much of a failure is shown in the injected assistant entry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ErrorDetail {
    /// Fixed user-facing strings only.
    #[default]
    Generic,
    /// Remote API messages are appended to the fixed string.
    Verbose,
}

impl FromStr for ErrorDetail {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "generic" => Ok(ErrorDetail::Generic),
            "verbose" => Ok(ErrorDetail::Verbose),
            other => Err(format!("unknown error detail policy: {other}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError {
    #[error("message is empty")]
    EmptyInput,
    #[error("a reply is already pending")]
    Busy,
}

#[derive(Clone, Debug)]
pub enum SessionEvent {
    MessageAppended(Message),
    PendingChanged(bool),
    /// The newest entry should be brought into view.
    ScrollToEnd,
}

#[derive(Clone, Debug, Serialize)]
pub struct SessionSnapshot {
    pub history: Vec<Message>,
    pub pending: bool,
    /// Only populated while the history is empty.
    pub suggestions: Vec<&'static str>,
    pub welcome: Option<&'static str>,
}

#[derive(Debug, Default)]
struct Conversation {
    history: Vec<Message>,
    pending: bool,
}

/// Maps a generation outcome to the text of the assistant entry.
pub fn reply_from(result: Result<String, GenerationError>, detail: ErrorDetail) -> String {
    match result {
        Ok(text) => text,
        Err(GenerationError::Network(_)) => format!("{ERROR_PREFIX}{NETWORK_ERROR}"),
        Err(GenerationError::Api(message)) if detail == ErrorDetail::Verbose => {
            format!("{ERROR_PREFIX}{API_ERROR} ({message})")
        }
        Err(GenerationError::Api(_)) | Err(GenerationError::MalformedResponse(_)) => {
            fallback_reply()
        }
    }
}

fn fallback_reply() -> String {
    format!("{ERROR_PREFIX}{API_ERROR}")
}

#[derive(Clone)]
pub struct ChatSession {
    inner: Arc<Mutex<Conversation>>,
    client: Arc<dyn GenerationClient>,
    detail: ErrorDetail,
    metrics: MetricsManager,
    events: broadcast::Sender<SessionEvent>,
}

impl Debug for ChatSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let conversation = self.lock();
        f.debug_struct("ChatSession")
            .field("messages", &conversation.history.len())
            .field("pending", &conversation.pending)
            .field("detail", &self.detail)
            .finish()
    }
}

impl ChatSession {
    /// Create an empty session backed by `client`.
    pub fn new(client: Arc<dyn GenerationClient>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            inner: Arc::new(Mutex::new(Conversation::default())),
            client,
            detail: ErrorDetail::default(),
            metrics: MetricsManager::new(),
            events,
        }
    }

    pub fn with_error_detail(mut self, detail: ErrorDetail) -> Self {
        self.detail = detail;
        self
    }

    pub fn with_metrics(mut self, metrics: MetricsManager) -> Self {
        self.metrics = metrics;
        self
    }

    /// Send `raw_text` to the generation client and fold the outcome into
    /// the history. Returns the appended assistant entry.
    ///
    /// Whitespace-only input and submits made while a reply is pending are
    /// rejected without touching the history.
    pub async fn submit(&self, raw_text: &str) -> Result<Message, SubmitError> {
        if raw_text.trim().is_empty() {
            self.metrics.record(Outcome::Rejected).await;
            return Err(SubmitError::EmptyInput);
        }

        let user = Message::new(MessageRole::User, raw_text);
        let accepted = {
            let mut conversation = self.lock();
            if conversation.pending {
                false
            } else {
                conversation.history.push(user.clone());
                conversation.pending = true;
                // Emitted under the lock; event order matches history order.
                self.emit(SessionEvent::MessageAppended(user.clone()));
                self.emit(SessionEvent::PendingChanged(true));
                true
            }
        };
        if !accepted {
            info!("submit rejected, reply pending");
            self.metrics.record(Outcome::Rejected).await;
            return Err(SubmitError::Busy);
        }
        info!(message_id = %user.id, "user message appended, awaiting reply");

        // The request runs to completion even if the caller is dropped.
        let session = self.clone();
        let prompt = raw_text.to_string();
        match tokio::spawn(async move { session.complete(prompt).await }).await {
            Ok(reply) => Ok(reply),
            Err(err) => {
                // PendingRelease already appended the fallback entry.
                error!(error = %err, "generation task did not complete");
                Ok(self.last_reply())
            }
        }
    }

    /// Equivalent to [`ChatSession::submit`] with the tapped suggestion.
    pub async fn submit_suggestion(&self, suggestion: &str) -> Result<Message, SubmitError> {
        self.submit(suggestion).await
    }

    async fn complete(&self, prompt: String) -> Message {
        let release = PendingRelease::new(self);
        let result = self.client.generate(&prompt).await;

        self.metrics.record(Outcome::of(&result)).await;
        if let Err(err) = &result {
            warn!(error = %err, "generation failed");
        }

        release.finish(reply_from(result, self.detail))
    }

    fn append_reply(&self, text: String) -> Message {
        let reply = Message::new(MessageRole::Assistant, text);
        {
            let mut conversation = self.lock();
            conversation.history.push(reply.clone());
            conversation.pending = false;
            self.emit(SessionEvent::MessageAppended(reply.clone()));
            self.emit(SessionEvent::PendingChanged(false));
            self.emit(SessionEvent::ScrollToEnd);
        }
        info!(message_id = %reply.id, "assistant message appended");
        reply
    }

    fn last_reply(&self) -> Message {
        self.lock()
            .history
            .iter()
            .rev()
            .find(|message| message.role == MessageRole::Assistant)
            .cloned()
            .unwrap_or_else(|| Message::new(MessageRole::Assistant, fallback_reply()))
    }

    pub fn history(&self) -> Vec<Message> {
        self.lock().history.clone()
    }

    pub fn is_pending(&self) -> bool {
        self.lock().pending
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let conversation = self.lock();
        let empty = conversation.history.is_empty();
        SessionSnapshot {
            history: conversation.history.clone(),
            pending: conversation.pending,
            suggestions: if empty { PROMPT_SUGGESTIONS.to_vec() } else { Vec::new() },
            welcome: empty.then_some(WELCOME_MESSAGE),
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    fn emit(&self, event: SessionEvent) {
        // No receivers is fine.
        let _ = self.events.send(event);
    }

    fn lock(&self) -> MutexGuard<'_, Conversation> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Appends the assistant entry and clears `pending` exactly once, including
/// when the generation future unwinds.
struct PendingRelease<'a> {
    session: &'a ChatSession,
    armed: bool,
}

impl<'a> PendingRelease<'a> {
    fn new(session: &'a ChatSession) -> Self {
        Self { session, armed: true }
    }

    fn finish(mut self, text: String) -> Message {
        self.armed = false;
        self.session.append_reply(text)
    }
}

impl Drop for PendingRelease<'_> {
    fn drop(&mut self) {
        if self.armed {
            self.session.append_reply(fallback_reply());
        }
    }
}
