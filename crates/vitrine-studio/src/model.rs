//! Model provider seam
//!
//! The studio never talks to a model service directly. It holds an
//! [`Arc<dyn TextModel>`](TextModel) and sends fully built prompts
//! through it; transport, authentication, and retries are the
//! implementor's business. Scripted implementations for tests live in
//! `vitrine-test-utils`.

/// Failure surfaced by a model provider.
///
/// Opaque on purpose. The session reports these to the user and never
/// retries automatically.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    /// The provider could not complete the request.
    #[error("model request failed: {0}")]
    RequestFailed(String),

    /// The provider gave up waiting.
    #[error("model request timed out after {duration_secs}s")]
    Timeout {
        /// Seconds waited before giving up.
        duration_secs: u64,
    },

    /// The provider answered with nothing usable.
    #[error("model returned an empty reply")]
    EmptyReply,
}

impl ModelError {
    /// Request-failed error from any message-ish input.
    #[inline]
    pub fn request_failed(message: impl Into<String>) -> Self {
        Self::RequestFailed(message.into())
    }
}

/// A text-in, text-out generative model.
///
/// Implementations must be cheap to share; the session stores one behind
/// an `Arc` and calls it for generation, refinement, and chat turns.
#[async_trait::async_trait]
pub trait TextModel: Send + Sync + std::fmt::Debug {
    /// Complete a prompt into reply text.
    async fn complete(&self, prompt: &str) -> Result<String, ModelError>;

    /// Human-readable provider/model name for logs.
    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct EchoModel;

    #[async_trait::async_trait]
    impl TextModel for EchoModel {
        async fn complete(&self, prompt: &str) -> Result<String, ModelError> {
            Ok(prompt.to_string())
        }

        fn name(&self) -> &str {
            "echo"
        }
    }

    #[tokio::test]
    async fn trait_object_is_callable() {
        let model: std::sync::Arc<dyn TextModel> = std::sync::Arc::new(EchoModel);
        let reply = model.complete("ping").await.unwrap();
        assert_eq!(reply, "ping");
        assert_eq!(model.name(), "echo");
    }

    #[test]
    fn error_messages_are_lowercase() {
        let err = ModelError::request_failed("socket closed");
        assert_eq!(err.to_string(), "model request failed: socket closed");
        assert_eq!(
            ModelError::Timeout { duration_secs: 30 }.to_string(),
            "model request timed out after 30s"
        );
    }
}
