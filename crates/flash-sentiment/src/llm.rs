//! Messages-API client with ordered model fallback.

use serde::{Deserialize, Serialize};

use flash_core::{LlmConfig, Sentiment};

use crate::error::SentimentError;

const API_VERSION: &str = "2023-06-01";

/// Input is truncated to this many characters before prompting.
const CLASSIFY_INPUT_LIMIT: usize = 500;

/// Hosted-model client. Models are tried in the configured order; the first
/// one that answers wins, so an unavailable model only costs one request
/// per call.
pub struct LlmClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    models: Vec<String>,
}

impl LlmClient {
    #[must_use]
    pub fn new(client: reqwest::Client, config: &LlmConfig) -> Self {
        Self {
            client,
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            models: config.models.clone(),
        }
    }

    /// Label a single text with one of the six sentiment labels.
    ///
    /// A syntactically valid but unknown answer maps to `Neutral` rather
    /// than failing; the model was reachable, it just rambled.
    ///
    /// # Errors
    ///
    /// Returns the last model's error when every configured model fails,
    /// or [`SentimentError::NoModels`] when the model list is empty.
    pub async fn classify(&self, text: &str) -> Result<Sentiment, SentimentError> {
        let snippet: String = text.chars().take(CLASSIFY_INPUT_LIMIT).collect();
        let prompt = format!(
            "Analyze the sentiment of the following news headline or social media post.\n\
             Respond with only a single word: 'positive', 'negative', 'neutral', 'mixed', \
             'anger', or 'appreciation'.\n\n<text>\n{snippet}\n</text>"
        );
        let answer = self.invoke(&prompt, 10).await?;
        let label = answer.trim().to_lowercase();
        let label = label.trim_matches(|c: char| !c.is_alphabetic());
        Ok(label.parse::<Sentiment>().unwrap_or_else(|()| {
            tracing::debug!(answer = %answer, "unrecognized sentiment label, defaulting to neutral");
            Sentiment::Neutral
        }))
    }

    /// Two-bullet situation summary plus recommendations for the report.
    ///
    /// # Errors
    ///
    /// Returns the last model's error when every configured model fails.
    pub async fn summarize_report(
        &self,
        brand: &str,
        data_summary: &str,
    ) -> Result<String, SentimentError> {
        let prompt = format!(
            "You are a professional PR crisis manager. Based on the following data summary \
             for the brand '{brand}', write a 2-bullet point summary of the situation and \
             2-3 actionable recommendations.\n\
             Format your response exactly like this, using markdown:\n\n\
             **Summary:**\n* [bullet 1]\n* [bullet 2]\n\n\
             **Recommendations:**\n* [bullet 1]\n* [bullet 2]\n\n\
             <data>\n{data_summary}\n</data>"
        );
        self.invoke(&prompt, 500).await
    }

    /// Send the prompt to each model in order until one answers.
    async fn invoke(&self, prompt: &str, max_tokens: u32) -> Result<String, SentimentError> {
        let mut last_err = SentimentError::NoModels;
        for model in &self.models {
            match self.invoke_model(model, prompt, max_tokens).await {
                Ok(text) => return Ok(text),
                Err(e) => {
                    tracing::warn!(model = %model, error = %e, "model failed, trying next");
                    last_err = e;
                }
            }
        }
        Err(last_err)
    }

    async fn invoke_model(
        &self,
        model: &str,
        prompt: &str,
        max_tokens: u32,
    ) -> Result<String, SentimentError> {
        let request = MessagesRequest {
            model,
            max_tokens,
            messages: vec![MessageParam {
                role: "user",
                content: prompt,
            }],
        };

        let resp = self
            .client
            .post(format!("{}/v1/messages", self.base_url))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .json(&request)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(SentimentError::Api {
                model: model.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        let parsed: MessagesResponse = resp.json().await?;
        let text = parsed
            .content
            .into_iter()
            .map(|block| block.text)
            .collect::<Vec<_>>()
            .join("");
        if text.trim().is_empty() {
            return Err(SentimentError::EmptyResponse(model.to_string()));
        }
        Ok(text)
    }
}

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<MessageParam<'a>>,
}

#[derive(Debug, Serialize)]
struct MessageParam<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: String,
}
