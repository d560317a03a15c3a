use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{FridayError, Result};
use crate::models::AISettings;

/// Text-classification service: one prompt in, raw model text out.
#[async_trait]
pub trait Classifier: Send + Sync {
    async fn classify(&self, prompt: &str) -> Result<String>;
}

// ─── OpenAI-compatible API types ───

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatSendMessage>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatSendMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatRecvMessage,
}

#[derive(Deserialize)]
struct ChatRecvMessage {
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    reasoning_content: Option<String>,
}

const SYSTEM_PROMPT: &str = "You are Friday, a desktop assistant's command parser. \
Follow the user's instructions exactly and respond ONLY with valid JSON (no markdown fences, no extra text).";

pub struct LlmClient {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl LlmClient {
    pub fn new(settings: &AISettings) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: settings.endpoint.clone(),
            api_key: settings.api_key.clone(),
            model: settings.model.clone(),
            temperature: settings.temperature,
            max_tokens: settings.max_tokens,
        }
    }
}

#[async_trait]
impl Classifier for LlmClient {
    async fn classify(&self, prompt: &str) -> Result<String> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatSendMessage {
                    role: "system".to_string(),
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatSendMessage {
                    role: "user".to_string(),
                    content: prompt.to_string(),
                },
            ],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| FridayError::Llm(format!("API request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(FridayError::Llm(format!("API returned error {}: {}", status, body)));
        }

        let body_text = response
            .text()
            .await
            .map_err(|e| FridayError::Llm(format!("Failed to read response: {}", e)))?;

        response_text(&body_text)
    }
}

/// Pulls the assistant text out of a chat-completions body.
///
/// Reasoning models sometimes leave `content` empty and answer in
/// `reasoning_content`, so that is used as a fallback.
fn response_text(body: &str) -> Result<String> {
    let chat_response: ChatResponse = serde_json::from_str(body)
        .map_err(|e| FridayError::Llm(format!("Failed to parse API response: {}", e)))?;

    let choice = chat_response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| FridayError::Llm("Empty AI response".to_string()))?;

    let content = choice
        .message
        .content
        .filter(|c| !c.trim().is_empty())
        .or(choice.message.reasoning_content)
        .unwrap_or_default();

    Ok(content.trim().to_string())
}
