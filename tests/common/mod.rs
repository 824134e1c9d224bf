#![allow(dead_code)]

use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

use async_trait::async_trait;
use gemini_chat::services::gemini::{GenerationClient, GenerationError};
use gemini_chat::services::session_manager::{ChatSession, SessionEvent};
use tokio::sync::{Notify, broadcast};

/// Always answers with the same result and remembers every prompt.
pub struct Scripted {
    result: Result<String, GenerationError>,
    prompts: Mutex<Vec<String>>,
}

impl Scripted {
    pub fn reply(text: &str) -> Arc<Self> {
        Self::with(Ok(text.to_string()))
    }

    pub fn fail(err: GenerationError) -> Arc<Self> {
        Self::with(Err(err))
    }

    fn with(result: Result<String, GenerationError>) -> Arc<Self> {
        Arc::new(Self {
            result,
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl GenerationClient for Scripted {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.result.clone()
    }
}

/// Holds every call until `release` is invoked.
#[derive(Default)]
pub struct Gated {
    gate: Notify,
    calls: AtomicUsize,
}

impl Gated {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn release(&self) {
        self.gate.notify_one();
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GenerationClient for Gated {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.gate.notified().await;
        Ok(format!("late reply to {prompt}"))
    }
}

/// Panics inside every call.
pub struct Panicking;

#[async_trait]
impl GenerationClient for Panicking {
    async fn generate(&self, _prompt: &str) -> Result<String, GenerationError> {
        panic!("generation client blew up");
    }
}

/// Wait until the session reports the given pending state.
pub async fn wait_for_pending(events: &mut broadcast::Receiver<SessionEvent>, wanted: bool) {
    loop {
        match events.recv().await.expect("session event stream closed") {
            SessionEvent::PendingChanged(pending) if pending == wanted => return,
            _ => continue,
        }
    }
}

pub fn session_with(client: Arc<dyn GenerationClient>) -> ChatSession {
    ChatSession::new(client)
}
