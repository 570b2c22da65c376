use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

use crate::error::GenerationError;
use crate::models::Question;

use super::{error_message, parse_questions, QuestionSource};

/// Posts `{"text": ...}` to a relay function that forwards it to the
/// generation service and answers with the question array, or with
/// `{"error": ...}` and a non-2xx status.
#[derive(Clone)]
pub struct RelaySource {
    client: Client,
    url: String,
    timeout: Duration,
}

#[derive(Serialize)]
struct RelayRequest<'a> {
    text: &'a str,
}

impl RelaySource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: Client::new(),
            url: url.into(),
            timeout,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl QuestionSource for RelaySource {
    fn name(&self) -> &'static str {
        "relay"
    }

    async fn generate(&self, text: &str) -> Result<Vec<Question>, GenerationError> {
        tracing::debug!(url = %self.url, "posting text to relay");
        let response = self
            .client
            .post(&self.url)
            .timeout(self.timeout)
            .json(&RelayRequest { text })
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = error_message(&body, "Failed to generate questions");
            tracing::error!(%status, %message, "relay returned an error");
            return Err(GenerationError::Service { status, message });
        }

        parse_questions(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::canned;

    #[test]
    fn test_request_body() {
        let body = serde_json::to_string(&RelayRequest { text: "hello" }).unwrap();
        assert_eq!(body, r#"{"text":"hello"}"#);
    }

    #[tokio::test]
    async fn test_error_status_carries_relay_message() {
        let (url, request) = canned::serve_once(
            "500 Internal Server Error",
            r#"{"error":"No text provided"}"#,
        )
        .await;
        let source = RelaySource::new(format!("{}/generate-mcqs", url), Duration::from_secs(5));

        let err = source.generate("hello").await.unwrap_err();
        match err {
            GenerationError::Service { status, message } => {
                assert_eq!(status, reqwest::StatusCode::INTERNAL_SERVER_ERROR);
                assert_eq!(message, "No text provided");
            }
            other => panic!("expected a service error, got {:?}", other),
        }

        let request = request.await.unwrap();
        assert!(request.starts_with("POST /generate-mcqs "));
        assert!(request.ends_with(r#"{"text":"hello"}"#));
    }

    #[tokio::test]
    async fn test_success_returns_questions() {
        let (url, _request) = canned::serve_once(
            "200 OK",
            r#"[{"question":"Q1","options":[{"text":"a","isCorrect":true},{"text":"b","isCorrect":false}]}]"#,
        )
        .await;
        let source = RelaySource::new(url, Duration::from_secs(5));

        let questions = source.generate("hello").await.unwrap();
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].prompt, "Q1");
        assert_eq!(questions[0].correct_index(), Some(0));
    }

    #[tokio::test]
    async fn test_unreachable_relay_is_http_error() {
        let source = RelaySource::new("http://127.0.0.1:9/generate-mcqs", Duration::from_secs(2));
        assert_eq!(source.url(), "http://127.0.0.1:9/generate-mcqs");

        let err = source.generate("text").await.unwrap_err();
        assert!(matches!(err, GenerationError::Http(_)));
    }
}
