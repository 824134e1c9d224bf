// src/message.rs
use serde::{Deserialize, Serialize};

use crate::services::session_manager::Message;

#[derive(Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Serialize)]
pub struct ChatResponse {
    pub reply: Message,
    pub history_len: usize,
}
