//! Gemini-backed implementations of the MindType gateway traits.

pub mod gemini_api_client;
pub mod payload;
pub mod prompts;

pub use gemini_api_client::GeminiApiClient;
