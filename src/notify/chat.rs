use serde_json::json;

use super::Message;

/// Posts messages to a Slack-compatible incoming webhook.
pub struct ChatWebhook {
    client: reqwest::Client,
    url: String,
}

impl ChatWebhook {
    pub fn new(url: String, timeout_secs: u64) -> Result<Self, String> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| format!("Failed to build HTTP client: {e}"))?;

        Ok(Self { client, url })
    }

    pub async fn post(&self, message: &Message) -> Result<(), String> {
        let mut body = json!({ "text": &message.body });
        if let Some(channel) = &message.recipient {
            body["channel"] = json!(channel);
        }

        let resp = self
            .client
            .post(&self.url)
            .json(&body)
            .send()
            .await
            .map_err(|e| format!("Chat webhook request failed: {e}"))?;

        let status = resp.status();
        if status.is_success() {
            Ok(())
        } else {
            let text = resp
                .text()
                .await
                .unwrap_or_default()
                .chars()
                .take(256)
                .collect::<String>();
            Err(format!("Chat webhook returned {}: {text}", status.as_u16()))
        }
    }
}
