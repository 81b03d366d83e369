//! `mitr-ai`
//!
//! **Responsibility:** boundary to the external generative-AI service behind
//! the support chatbot.
//!
//! The service is an opaque collaborator: prompt text in, reply text out.
//! Nothing here touches accounts, tokens, or screening results.

pub mod backend;
pub mod gemini;

pub use backend::{ChatBackend, ChatError};
pub use gemini::{normalize_reply, GeminiChatBackend, GeminiConfig};
