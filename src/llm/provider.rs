use async_trait::async_trait;

use crate::core::errors::ApiError;

use super::types::ChatMessage;

/// Hosted language-model surface consumed by the chat service and the
/// populator. Implementations wrap a remote API; tests substitute fakes.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// provider name for logging (e.g. "openai")
    fn name(&self) -> &str;

    /// chat completion (non-streaming); returns the assistant reply text
    async fn chat(&self, messages: &[ChatMessage]) -> Result<String, ApiError>;

    /// embed one input text into a fixed-length vector
    async fn embed(&self, input: &str) -> Result<Vec<f32>, ApiError>;
}
