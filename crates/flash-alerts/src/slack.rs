//! Slack `chat.postMessage` notifier.

use serde::Deserialize;

use crate::error::AlertError;

const DEFAULT_BASE_URL: &str = "https://slack.com";

pub struct SlackNotifier {
    client: reqwest::Client,
    token: String,
    channel: String,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct PostMessageResponse {
    ok: bool,
    #[serde(default)]
    error: Option<String>,
}

impl SlackNotifier {
    #[must_use]
    pub fn new(client: reqwest::Client, token: &str, channel: &str) -> Self {
        Self::with_base_url(client, token, channel, DEFAULT_BASE_URL)
    }

    /// Custom base URL for pointing at a mock server in tests.
    #[must_use]
    pub fn with_base_url(
        client: reqwest::Client,
        token: &str,
        channel: &str,
        base_url: &str,
    ) -> Self {
        Self {
            client,
            token: token.to_string(),
            channel: channel.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Post a message to the configured channel.
    ///
    /// # Errors
    ///
    /// Returns [`AlertError::Http`] on transport failure or
    /// [`AlertError::Slack`] when the API answers with `ok: false`.
    pub async fn post(&self, text: &str) -> Result<(), AlertError> {
        let resp = self
            .client
            .post(format!("{}/api/chat.postMessage", self.base_url))
            .bearer_auth(&self.token)
            .json(&serde_json::json!({ "channel": self.channel, "text": text }))
            .send()
            .await?
            .error_for_status()?;

        let body: PostMessageResponse = resp.json().await?;
        if body.ok {
            Ok(())
        } else {
            Err(AlertError::Slack(
                body.error.unwrap_or_else(|| "unknown error".to_string()),
            ))
        }
    }
}
