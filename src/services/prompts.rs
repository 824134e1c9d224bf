// src/services/prompts.rs
//! Fixed texts shown by the chat view.

/// One-tap prompts offered while the conversation is still empty.
pub const PROMPT_SUGGESTIONS: [&str; 5] = [
    "¿Cómo puedo mejorar mi productividad?",
    "Explícame qué es la inteligencia artificial",
    "Dame consejos para aprender programación",
    "¿Cuáles son las últimas tendencias en tecnología?",
    "Ayúdame a escribir un email profesional",
];

pub const WELCOME_MESSAGE: &str =
    "¡Hola! Soy Gemini AI, tu asistente inteligente. ¿En qué puedo ayudarte hoy?";

/// Marks an assistant entry that stands in for a failed request.
pub const ERROR_PREFIX: &str = "❌ Error: ";

pub const API_ERROR: &str = "Lo siento, hubo un problema al procesar tu solicitud.";
pub const NETWORK_ERROR: &str = "No se pudo conectar. Verifica tu conexión a internet.";
pub const INVALID_INPUT: &str = "Por favor, escribe un mensaje válido.";

/// Longest message, in characters, the input bar accepts.
pub const MAX_MESSAGE_CHARS: usize = 500;

pub fn suggestion(index: usize) -> Option<&'static str> {
    PROMPT_SUGGESTIONS.get(index).copied()
}
