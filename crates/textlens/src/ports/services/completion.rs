//! Completion Service Port
//!
//! Abstract interface for chat-completion invocations against a hosted
//! model.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;

/// Role of a message in a conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

/// A message in a conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }
}

/// Options for a completion call
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CompletionOptions {
    /// Maximum tokens to generate
    pub max_tokens: u32,
    /// Sampling temperature
    pub temperature: f32,
}

impl Default for CompletionOptions {
    fn default() -> Self {
        Self {
            max_tokens: 256,
            temperature: 0.0,
        }
    }
}

/// Completion endpoint interface
///
/// # Example
///
/// ```rust,ignore
/// use textlens::ports::CompletionService;
///
/// struct AzureChat { /* ... */ }
///
/// #[async_trait]
/// impl CompletionService for AzureChat {
///     async fn complete(&self, messages: &[ChatMessage], options: &CompletionOptions)
///         -> Result<String, DomainError> {
///         // POST {messages, max_tokens, temperature}
///     }
/// }
/// ```
#[async_trait]
pub trait CompletionService: Send + Sync {
    /// Send the messages and return the first choice's content, trimmed
    async fn complete(
        &self,
        messages: &[ChatMessage],
        options: &CompletionOptions,
    ) -> Result<String, DomainError>;
}
