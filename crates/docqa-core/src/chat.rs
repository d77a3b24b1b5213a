//! Chat provider trait and message types

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::Result;

/// Role of a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// A single turn in a chat conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// Trait for hosted chat/completion services
///
/// One synchronous round-trip: an ordered message sequence in, the model's
/// text response out, verbatim. Failures propagate to the caller unmodified.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Send the messages and return the model's text response
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String>;
}

#[async_trait]
impl<T: ChatProvider + ?Sized> ChatProvider for std::sync::Arc<T> {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String> {
        (**self).complete(messages).await
    }
}
