pub mod gemini;
pub mod metrics_manager;
pub mod prompts;
pub mod session_manager;
