//! Remote text-generation backend seam

use anyhow::Result;

/// Completion returned by a backend
#[derive(Debug, Clone, PartialEq)]
pub struct ChatCompletion {
    /// Backend that produced the text
    pub backend_name: String,

    /// Raw response text
    pub content: String,

    /// Tokens billed, when the provider reports them
    pub token_cost: u32,
}

/// A remote model taking a system instruction and a user message
#[async_trait::async_trait]
pub trait InferenceBackend: Send + Sync + std::fmt::Debug {
    /// Human-readable backend name used in the monologue and logs
    fn name(&self) -> &str;

    async fn chat_completion(&self, system_prompt: &str, user_prompt: &str)
        -> Result<ChatCompletion>;
}
