//! Mock chat backend for deterministic testing.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use reel_core::{ChatBackend, ChatOptions, Error, Result};

/// One recorded chat call.
#[derive(Debug, Clone)]
pub struct ChatCall {
    pub system: String,
    pub user: String,
    pub options: ChatOptions,
}

#[derive(Debug, Clone)]
struct MockConfig {
    default_response: String,
    /// (user-prompt substring, response) pairs checked in order.
    mapped_responses: Vec<(String, String)>,
    failure: Option<String>,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            default_response: "{}".to_string(),
            mapped_responses: Vec::new(),
            failure: None,
        }
    }
}

/// Chat backend returning canned responses, with a call log for assertions.
#[derive(Clone)]
pub struct MockChatBackend {
    config: Arc<MockConfig>,
    call_log: Arc<Mutex<Vec<ChatCall>>>,
}

impl MockChatBackend {
    pub fn new() -> Self {
        Self {
            config: Arc::new(MockConfig::default()),
            call_log: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Set the response returned when no mapping matches.
    pub fn with_response(mut self, response: impl Into<String>) -> Self {
        Arc::make_mut(&mut self.config).default_response = response.into();
        self
    }

    /// Return `response` when the user prompt contains `needle`. Mappings
    /// are checked in insertion order before the default response.
    pub fn with_mapping(mut self, needle: impl Into<String>, response: impl Into<String>) -> Self {
        Arc::make_mut(&mut self.config)
            .mapped_responses
            .push((needle.into(), response.into()));
        self
    }

    /// Make every call fail with a provider error.
    pub fn with_failure(mut self, message: impl Into<String>) -> Self {
        Arc::make_mut(&mut self.config).failure = Some(message.into());
        self
    }

    /// Get all logged calls for assertion.
    pub fn calls(&self) -> Vec<ChatCall> {
        self.call_log.lock().unwrap().clone()
    }
}

impl Default for MockChatBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChatBackend for MockChatBackend {
    async fn chat(&self, system: &str, user: &str, options: ChatOptions) -> Result<String> {
        self.call_log.lock().unwrap().push(ChatCall {
            system: system.to_string(),
            user: user.to_string(),
            options,
        });

        if let Some(ref message) = self.config.failure {
            return Err(Error::Provider(message.clone()));
        }

        for (needle, response) in &self.config.mapped_responses {
            if user.contains(needle.as_str()) {
                return Ok(response.clone());
            }
        }
        Ok(self.config.default_response.clone())
    }

    fn model_name(&self) -> &str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> ChatOptions {
        ChatOptions {
            temperature: 0.2,
            max_tokens: 100,
        }
    }

    #[tokio::test]
    async fn returns_default_response() {
        let backend = MockChatBackend::new().with_response("hello");
        assert_eq!(backend.chat("sys", "user", options()).await.unwrap(), "hello");
    }

    #[tokio::test]
    async fn mapping_matches_on_substring() {
        let backend = MockChatBackend::new()
            .with_mapping("rank", "[]")
            .with_response("{}");
        assert_eq!(backend.chat("s", "please rank these", options()).await.unwrap(), "[]");
        assert_eq!(backend.chat("s", "analyze this", options()).await.unwrap(), "{}");
    }

    #[tokio::test]
    async fn failure_mode_errors_every_call() {
        let backend = MockChatBackend::new().with_failure("boom");
        let err = backend.chat("s", "u", options()).await.unwrap_err();
        assert!(err.to_string().contains("boom"));
    }

    #[tokio::test]
    async fn logs_calls_in_order() {
        let backend = MockChatBackend::new();
        backend.chat("s1", "u1", options()).await.unwrap();
        backend.chat("s2", "u2", options()).await.unwrap();

        let calls = backend.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].user, "u1");
        assert_eq!(calls[1].system, "s2");
    }
}
