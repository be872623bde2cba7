use async_trait::async_trait;

use crate::{
    domain::{ChatTarget, MessageId},
    Result,
};

/// Cross-messenger port.
///
/// The notifier only needs plain-text delivery; Telegram is the implementation.
#[async_trait]
pub trait MessagingPort: Send + Sync {
    async fn send_text(&self, chat: &ChatTarget, text: &str) -> Result<MessageId>;
}
