//! Chat backend that forwards each user prompt to the Gemini
//! `generateContent` API and keeps the conversation for one chat view.

pub mod config;
pub mod error;
pub mod message;
pub mod routes;
pub mod services;
pub mod state;
