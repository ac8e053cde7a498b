//! Fake AI client for testing and offline development.
//!
//! Returns scripted replies based on prompt matching, so tests run without
//! network access or API costs. Every call is recorded in a shared log.

use async_trait::async_trait;
use std::sync::{Arc, Mutex, MutexGuard};

use super::client::{AiClient, AiError};
use super::types::{ChatRequest, ChatResponse};

/// A call received by a `FakeAiClient`.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub prompt_name: String,
    pub request: ChatRequest,
}

/// Shared handle to the calls a `FakeAiClient` has received.
///
/// Cloning the handle shares the underlying log, so tests can keep one after
/// the client itself has been moved into application state.
#[derive(Debug, Clone, Default)]
pub struct CallLog {
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl CallLog {
    fn lock(&self) -> MutexGuard<'_, Vec<RecordedCall>> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn record(&self, prompt_name: &str, request: &ChatRequest) {
        self.lock().push(RecordedCall {
            prompt_name: prompt_name.to_string(),
            request: request.clone(),
        });
    }

    pub fn count(&self) -> usize {
        self.lock().len()
    }

    pub fn prompt_names(&self) -> Vec<String> {
        self.lock().iter().map(|c| c.prompt_name.clone()).collect()
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.lock().clone()
    }
}

/// A fake AI client.
///
/// Replies are matched by checking whether the prompt name or any message
/// contains a registered substring (case-insensitive, first registered wins).
/// If nothing matches, the default reply is used; with no default the call
/// fails with `AiError::EmptyResponse`.
#[derive(Debug, Default)]
pub struct FakeAiClient {
    responses: Vec<(String, String)>,
    default_response: Option<String>,
    failures: Mutex<u32>,
    log: CallLog,
}

impl FakeAiClient {
    /// Create a new FakeAiClient with no registered responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a FakeAiClient that returns `response` for prompts containing `pattern`.
    pub fn with_response(pattern: &str, response: &str) -> Self {
        Self::new().and_response(pattern, response)
    }

    /// Register another reply.
    pub fn and_response(mut self, pattern: &str, response: &str) -> Self {
        self.responses
            .push((pattern.to_lowercase(), response.to_string()));
        self
    }

    /// Set the reply used when no pattern matches.
    pub fn with_default_response(mut self, response: &str) -> Self {
        self.default_response = Some(response.to_string());
        self
    }

    /// Make the first `count` calls fail with a retryable API error.
    pub fn with_failures(self, count: u32) -> Self {
        *self.failures.lock().unwrap_or_else(|e| e.into_inner()) = count;
        self
    }

    /// Handle to the log of received calls.
    pub fn call_log(&self) -> CallLog {
        self.log.clone()
    }

    /// A client with canned constraint-extraction and recipe replies.
    pub fn with_recipe_responses() -> Self {
        Self::new()
            .and_response(
                "extract_constraints",
                r#"{"protein": {"min": 30, "max": null}, "carbs": null, "fat": null, "calories": {"min": null, "max": 600}}"#,
            )
            .and_response(
                "generate_recipe",
                r#"{
                    "title": "Lemon Herb Chicken Bowl",
                    "ingredients": "150 g chicken breast, 1 cup cooked rice, 1 tbsp olive oil, 1/2 lemon",
                    "instructions": "1. Season the chicken.\n2. Pan-sear until cooked through.\n3. Serve over rice with lemon.",
                    "calories": 550,
                    "protein": 45,
                    "carbs": 50,
                    "fat": 15
                }"#,
            )
    }
}

#[async_trait]
impl AiClient for FakeAiClient {
    async fn complete(
        &self,
        prompt_name: &str,
        request: ChatRequest,
    ) -> Result<ChatResponse, AiError> {
        self.log.record(prompt_name, &request);

        {
            let mut failures = self.failures.lock().unwrap_or_else(|e| e.into_inner());
            if *failures > 0 {
                *failures -= 1;
                return Err(AiError::Api("FakeAiClient: scripted failure".to_string()));
            }
        }

        let name_lower = prompt_name.to_lowercase();
        let transcript_lower = request.transcript().to_lowercase();
        for (pattern, response) in &self.responses {
            if name_lower.contains(pattern) || transcript_lower.contains(pattern) {
                return Ok(ChatResponse::text(response.clone()));
            }
        }

        match &self.default_response {
            Some(response) => Ok(ChatResponse::text(response.clone())),
            None => Err(AiError::EmptyResponse),
        }
    }

    fn model_name(&self) -> &str {
        "fake-model"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::ChatMessage;

    fn request(text: &str) -> ChatRequest {
        ChatRequest {
            messages: vec![ChatMessage::user(text)],
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_fake_client_matching() {
        let client = FakeAiClient::with_response("hello", "world");
        let result = client
            .complete("greeting", request("Say hello to the user"))
            .await
            .unwrap();
        assert_eq!(result.content, "world");
    }

    #[tokio::test]
    async fn test_fake_client_matches_prompt_name() {
        let client = FakeAiClient::with_response("generate_recipe", "{}");
        let result = client
            .complete("generate_recipe", request("anything"))
            .await
            .unwrap();
        assert_eq!(result.content, "{}");
    }

    #[tokio::test]
    async fn test_fake_client_case_insensitive() {
        let client = FakeAiClient::with_response("HELLO", "world");
        let result = client.complete("x", request("hello there")).await.unwrap();
        assert_eq!(result.content, "world");
    }

    #[tokio::test]
    async fn test_fake_client_no_match() {
        let client = FakeAiClient::new();
        let result = client.complete("x", request("random prompt")).await;
        assert!(matches!(result, Err(AiError::EmptyResponse)));
    }

    #[tokio::test]
    async fn test_fake_client_records_calls() {
        let client = FakeAiClient::new().with_default_response("default");
        let log = client.call_log();

        client.complete("first", request("a")).await.unwrap();
        client.complete("second", request("b")).await.unwrap();

        assert_eq!(log.count(), 2);
        assert_eq!(log.prompt_names(), vec!["first", "second"]);
    }

    #[tokio::test]
    async fn test_scripted_failures() {
        let client = FakeAiClient::new()
            .with_default_response("ok")
            .with_failures(1);

        assert!(client.complete("x", request("a")).await.is_err());
        assert_eq!(client.complete("x", request("a")).await.unwrap().content, "ok");
    }
}
