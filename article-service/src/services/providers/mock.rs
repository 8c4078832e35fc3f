//! Mock provider implementation for testing.

use super::{ChatMessage, ChatProvider, Completion, CompletionParams, ProviderError};
use async_trait::async_trait;

/// Mock chat provider that returns a canned reply or a canned failure.
pub struct MockChatProvider {
    reply: Option<String>,
}

impl MockChatProvider {
    pub fn replying(text: impl Into<String>) -> Self {
        Self {
            reply: Some(text.into()),
        }
    }

    pub fn failing() -> Self {
        Self { reply: None }
    }
}

#[async_trait]
impl ChatProvider for MockChatProvider {
    async fn complete(
        &self,
        _messages: &[ChatMessage],
        _params: &CompletionParams,
    ) -> Result<Completion, ProviderError> {
        match &self.reply {
            Some(text) => Ok(Completion {
                content: text.clone(),
            }),
            None => Err(ProviderError::ApiError(
                "Mock provider configured to fail".to_string(),
            )),
        }
    }
}
