use anyhow::{anyhow, Result};
use async_trait::async_trait;
use datespot_core::gateways::sentiment::SentimentGateway;
use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

const SYSTEM_PROMPT: &str = "You are a sentiment analysis bot. \
    Analyze the sentiment of the following text and respond with a single number \
    from -1 (very negative) to 1 (very positive). Do not include any other text.";

/// Scores sentiments with an OpenAI compatible chat completion API.
#[derive(Debug, Clone)]
pub struct OpenAiSentiment {
    api_key: String,
    model: String,
    base_url: String,
    http: reqwest::Client,
}

impl OpenAiSentiment {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_owned(),
            base_url: DEFAULT_BASE_URL.to_owned(),
            http: reqwest::Client::new(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_owned();
        self
    }

    fn request<'a>(&'a self, text: &'a str) -> ChatRequest<'a> {
        ChatRequest {
            model: &self.model,
            messages: vec![
                Message {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                Message {
                    role: "user",
                    content: text,
                },
            ],
            max_tokens: 5,
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

fn parse_score(response: ChatResponse) -> Result<f64> {
    let content = response
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .ok_or_else(|| anyhow!("No answer from the sentiment service"))?;
    content
        .trim()
        .parse()
        .map_err(|_| anyhow!("Unexpected answer from the sentiment service: '{content}'"))
}

#[async_trait]
impl SentimentGateway for OpenAiSentiment {
    async fn sentiment_score(&self, text: &str) -> Result<f64> {
        let url = format!("{}/chat/completions", self.base_url);
        log::debug!("Requesting sentiment score from {url} ({})", self.model);
        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&self.request(text))
            .send()
            .await?;
        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(anyhow!("Sentiment service error ({status}): {error_text}"));
        }
        let score = parse_score(response.json().await?)?;
        log::debug!("Sentiment score: {score}");
        Ok(score)
    }
}

/// Used if no sentiment service has been configured.
///
/// Every request fails, so no new spot passes the content check.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSentimentAnalysis;

#[async_trait]
impl SentimentGateway for NoSentimentAnalysis {
    async fn sentiment_score(&self, _: &str) -> Result<f64> {
        Err(anyhow!("No sentiment service configured"))
    }
}
