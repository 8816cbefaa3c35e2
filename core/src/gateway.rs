use async_trait::async_trait;
use std::fmt;

use crate::errors::GeminiResult;
use crate::transcript::Turn;

/// Access to the text generation model.
///
/// Implementations hold no per-conversation state: `converse` is handed the whole
/// history every time. Each call makes exactly one request upstream and never retries.
#[async_trait]
pub trait ModelGateway: Send + Sync + fmt::Debug {
    /// Single prompt in, text out.
    async fn generate(&self, prompt: &str) -> GeminiResult<String>;

    /// Send `message` as the next user turn after `history` and return the reply.
    async fn converse(&self, history: &[Turn], message: &str) -> GeminiResult<String>;
}
