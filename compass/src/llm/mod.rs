mod api;
pub mod prompts;
mod provider;
pub mod schema;

pub use provider::{LlmBackend, LlmProvider, ModelRequest, MoodModel};

pub(crate) use api::redact_secret;
