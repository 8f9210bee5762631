pub mod chat;
pub mod email;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use chat::ChatWebhook;
use email::SmtpMailer;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    InApp,
    Email,
    Slack,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub recipient: Option<String>,
    pub subject: Option<String>,
    pub body: String,
}

/// Result of one send. Notifiers report failures here instead of erroring.
#[derive(Debug, Clone, PartialEq)]
pub struct Delivery {
    pub success: bool,
    pub error: Option<String>,
}

impl Delivery {
    pub fn delivered() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
        }
    }
}

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, channel: Channel, message: &Message) -> Delivery;
}

/// Routes each channel to its transport. A channel without a configured
/// transport is logged and counted as delivered.
pub struct ChannelNotifier {
    mailer: Option<SmtpMailer>,
    chat: Option<ChatWebhook>,
}

impl ChannelNotifier {
    pub fn new(mailer: Option<SmtpMailer>, chat: Option<ChatWebhook>) -> Self {
        Self { mailer, chat }
    }

    /// A notifier with no transports; every message only goes to the log.
    pub fn log_only() -> Self {
        Self::new(None, None)
    }
}

#[async_trait]
impl Notifier for ChannelNotifier {
    async fn send(&self, channel: Channel, message: &Message) -> Delivery {
        let result = match channel {
            Channel::InApp => {
                tracing::info!(
                    recipient = message.recipient.as_deref().unwrap_or("team"),
                    "In-app notification: {}",
                    message.body
                );
                Ok(())
            }
            Channel::Email => match &self.mailer {
                Some(mailer) => mailer.send(message).await,
                None => {
                    tracing::info!(
                        to = message.recipient.as_deref().unwrap_or_default(),
                        "SMTP not configured, email not sent: {}",
                        message.subject.as_deref().unwrap_or_default()
                    );
                    Ok(())
                }
            },
            Channel::Slack => match &self.chat {
                Some(chat) => chat.post(message).await,
                None => {
                    tracing::info!("Chat webhook not configured, message not sent: {}", message.body);
                    Ok(())
                }
            },
        };

        match result {
            Ok(()) => Delivery::delivered(),
            Err(e) => {
                tracing::warn!("Notification via {channel:?} failed: {e}");
                Delivery::failed(e)
            }
        }
    }
}
