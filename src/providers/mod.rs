// Chat-completion providers
//
// Everything that talks to the language-model API sits behind `LlmProvider`
// so the session logic can be exercised with in-process fakes.

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::mpsc::Receiver;

pub mod types;

mod factory;
pub mod openai;
mod stream;

pub use factory::create_provider;
pub use openai::OpenAIProvider;
pub use stream::collect_stream;
pub use types::{ChatMessage, ProviderRequest, ProviderResponse, Role, StreamChunk};

/// Trait for chat-completion providers
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Send the conversation and wait for the full reply
    async fn send_message(&self, request: &ProviderRequest) -> Result<ProviderResponse>;

    /// Send the conversation and stream the reply
    ///
    /// The channel yields `TextDelta`s in order, then exactly one `Done`.
    /// An `Err` item means the stream failed; nothing follows it.
    async fn send_message_stream(
        &self,
        request: &ProviderRequest,
    ) -> Result<Receiver<Result<StreamChunk>>>;

    /// Provider name (e.g., "openai")
    fn name(&self) -> &str;

    /// Model used when the request does not name one
    fn default_model(&self) -> &str;

    fn supports_streaming(&self) -> bool {
        true
    }
}
