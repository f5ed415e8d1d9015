use anyhow::Result;
use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::{ChatId, Recipient};
use tracing::{debug, error};

use crate::error::SendMessageError;

/// Send-text primitive of a messaging transport.
#[async_trait]
pub trait MessageSink: Send + Sync {
    async fn send_text(&self, chat_id: &str, text: &str) -> Result<()>;
}

/// Numeric ids address users and groups, anything else is taken as `@channel`.
fn recipient(chat_id: &str) -> Recipient {
    match chat_id.parse::<i64>() {
        Ok(id) => Recipient::Id(ChatId(id)),
        Err(_) => Recipient::ChannelUsername(chat_id.to_string()),
    }
}

#[async_trait]
impl MessageSink for Bot {
    async fn send_text(&self, chat_id: &str, text: &str) -> Result<()> {
        self.send_message(recipient(chat_id), text).await?;
        Ok(())
    }
}

/// Delivers notifications to the configured chat.
pub struct Notifier {
    sink: Box<dyn MessageSink>,
    chat_id: String,
}

impl Notifier {
    pub fn new(sink: impl MessageSink + 'static, chat_id: impl Into<String>) -> Self {
        Self {
            sink: Box::new(sink),
            chat_id: chat_id.into(),
        }
    }

    pub async fn send_message(&self, message: &str) -> Result<(), SendMessageError> {
        match self.sink.send_text(&self.chat_id, message).await {
            Ok(()) => {
                debug!("Sent message to chat {}", self.chat_id);
                Ok(())
            }
            Err(e) => {
                error!("Could not send message to chat {}: {:#}", self.chat_id, e);
                Err(SendMessageError(e.into()))
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// Records every message instead of sending it.
    #[derive(Clone, Default)]
    pub struct RecordingSink {
        pub sent: Arc<Mutex<Vec<(String, String)>>>,
        pub fail: bool,
    }

    impl RecordingSink {
        pub fn failing() -> Self {
            Self {
                fail: true,
                ..Self::default()
            }
        }

        pub fn messages(&self) -> Vec<String> {
            self.sent
                .lock()
                .unwrap()
                .iter()
                .map(|(_, text)| text.clone())
                .collect()
        }
    }

    #[async_trait]
    impl MessageSink for RecordingSink {
        async fn send_text(&self, chat_id: &str, text: &str) -> Result<()> {
            if self.fail {
                anyhow::bail!("chat is unreachable");
            }
            self.sent
                .lock()
                .unwrap()
                .push((chat_id.to_string(), text.to_string()));
            Ok(())
        }
    }
}
