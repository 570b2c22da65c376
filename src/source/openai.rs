use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::GenerationError;
use crate::models::Question;

use super::{error_message, parse_questions, QuestionSource};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

const SYSTEM_PROMPT: &str =
    "You are a helpful assistant that generates multiple choice questions.";
const TEMPERATURE: f32 = 0.7;

#[derive(Clone, Debug)]
pub struct OpenAiConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub model: String,
    pub timeout: Duration,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            api_key: None,
            model: DEFAULT_MODEL.into(),
            timeout: Duration::from_secs(60),
        }
    }
}

/// Calls a chat-completions endpoint directly.
#[derive(Clone)]
pub struct OpenAiSource {
    client: Client,
    config: OpenAiConfig,
}

impl OpenAiSource {
    pub fn new(config: OpenAiConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    pub fn enabled(&self) -> bool {
        self.api_key().is_some()
    }

    fn api_key(&self) -> Option<&str> {
        self.config
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        )
    }
}

#[async_trait]
impl QuestionSource for OpenAiSource {
    fn name(&self) -> &'static str {
        "openai"
    }

    async fn generate(&self, text: &str) -> Result<Vec<Question>, GenerationError> {
        let api_key = self.api_key().ok_or(GenerationError::MissingApiKey)?;

        let payload = ChatRequest {
            model: self.config.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: build_prompt(text),
                },
            ],
            temperature: TEMPERATURE,
        };

        tracing::debug!(model = %self.config.model, "sending chat completion request");
        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(api_key)
            .timeout(self.config.timeout)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = error_message(&body, "Failed to generate questions");
            tracing::error!(%status, %message, "chat completion request failed");
            return Err(GenerationError::Service { status, message });
        }

        let body: ChatResponse = response.json().await?;
        let content = body
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(GenerationError::EmptyResponse)?;

        let questions = parse_questions(&content)?;
        tracing::info!(count = questions.len(), "received generated questions");
        Ok(questions)
    }
}

fn build_prompt(text: &str) -> String {
    format!(
        r#"Generate multiple choice questions based on this text: "{text}".
Create questions that test understanding of key concepts.
Make sure to use simple, clear English.
Format your response as a JSON array with this exact structure:
[
  {{
    "question": "What is the main topic discussed?",
    "options": [
      {{"text": "correct answer", "isCorrect": true}},
      {{"text": "wrong answer 1", "isCorrect": false}},
      {{"text": "wrong answer 2", "isCorrect": false}},
      {{"text": "wrong answer 3", "isCorrect": false}}
    ]
  }}
]
Generate at least 5 questions, maximum 20 questions.
Ensure each question has exactly one correct answer.
Make the wrong answers plausible but clearly incorrect.
Respond with the JSON array only."#
    )
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessageResponse,
}

#[derive(Debug, Deserialize)]
struct ChatMessageResponse {
    content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::canned;

    fn source_for(url: &str) -> OpenAiSource {
        OpenAiSource::new(OpenAiConfig {
            base_url: format!("{}/v1", url),
            api_key: Some("test-key".into()),
            timeout: Duration::from_secs(5),
            ..OpenAiConfig::default()
        })
    }

    #[tokio::test]
    async fn test_error_status_carries_service_message() {
        let (url, request) = canned::serve_once(
            "401 Unauthorized",
            r#"{"error":{"message":"Invalid API key","type":"invalid_request_error"}}"#,
        )
        .await;

        let err = source_for(&url).generate("some text").await.unwrap_err();
        match err {
            GenerationError::Service { status, message } => {
                assert_eq!(status, reqwest::StatusCode::UNAUTHORIZED);
                assert_eq!(message, "Invalid API key");
            }
            other => panic!("expected a service error, got {:?}", other),
        }

        let request = request.await.unwrap();
        assert!(request.starts_with("POST /v1/chat/completions "));
        assert!(request.to_lowercase().contains("authorization: bearer test-key"));
        assert!(request.contains(r#""model":"gpt-4o-mini""#));
    }

    #[tokio::test]
    async fn test_missing_content_is_empty_response() {
        let (url, _request) = canned::serve_once(
            "200 OK",
            r#"{"choices":[{"message":{"role":"assistant"}}]}"#,
        )
        .await;

        let err = source_for(&url).generate("some text").await.unwrap_err();
        assert!(matches!(err, GenerationError::EmptyResponse));
    }

    #[tokio::test]
    async fn test_fenced_content_is_parsed() {
        let content = r#"```json [{"question":"Q1","options":[{"text":"a","isCorrect":false},{"text":"b","isCorrect":true}]}]```"#;
        let body = serde_json::json!({
            "choices": [{ "message": { "role": "assistant", "content": content } }]
        });
        let (url, _request) = canned::serve_once("200 OK", body.to_string()).await;

        let questions = source_for(&url).generate("some text").await.unwrap();
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].correct_index(), Some(1));
    }

    #[tokio::test]
    async fn test_missing_key_fails_before_any_request() {
        let source = OpenAiSource::new(OpenAiConfig {
            api_key: Some("   ".into()),
            // Unroutable, so a request attempt would surface as Http instead.
            base_url: "http://127.0.0.1:9".into(),
            ..OpenAiConfig::default()
        });
        assert!(!source.enabled());

        let err = source.generate("some text").await.unwrap_err();
        assert!(matches!(err, GenerationError::MissingApiKey));
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let source = OpenAiSource::new(OpenAiConfig {
            base_url: "https://example.test/v1/".into(),
            api_key: Some("key".into()),
            ..OpenAiConfig::default()
        });
        assert!(source.enabled());
        assert_eq!(source.endpoint(), "https://example.test/v1/chat/completions");
    }

    #[test]
    fn test_prompt_embeds_text_and_bounds() {
        let prompt = build_prompt("Photosynthesis converts light.");
        assert!(prompt.contains("\"Photosynthesis converts light.\""));
        assert!(prompt.contains("at least 5 questions, maximum 20 questions"));
        assert!(prompt.contains("\"isCorrect\": true"));
    }

    #[test]
    fn test_chat_response_without_content() {
        let body: ChatResponse =
            serde_json::from_str(r#"{"choices":[{"message":{"role":"assistant"}}]}"#).unwrap();
        assert!(body.choices[0].message.content.is_none());
    }
}
