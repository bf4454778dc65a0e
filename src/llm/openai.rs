use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};

use crate::core::config::Settings;
use crate::core::errors::ApiError;

use super::provider::LlmProvider;
use super::types::ChatMessage;
use super::EMBEDDING_DIMENSION;

/// Client for an OpenAI-compatible chat/embeddings API.
#[derive(Clone)]
pub struct OpenAiProvider {
    base_url: String,
    api_key: String,
    chat_model: String,
    embedding_model: String,
    temperature: f64,
    client: Client,
}

impl OpenAiProvider {
    pub fn new(settings: &Settings) -> Self {
        Self::with_base_url(
            settings.openai_base_url.clone(),
            settings.openai_api_key.clone(),
            settings.chat_model.clone(),
            settings.embedding_model.clone(),
            settings.temperature,
        )
    }

    pub fn with_base_url(
        base_url: String,
        api_key: String,
        chat_model: String,
        embedding_model: String,
        temperature: f64,
    ) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            chat_model,
            embedding_model,
            temperature,
            client: Client::new(),
        }
    }
}

#[async_trait]
impl LlmProvider for OpenAiProvider {
    fn name(&self) -> &str {
        "openai"
    }

    async fn chat(&self, messages: &[ChatMessage]) -> Result<String, ApiError> {
        let url = format!("{}/v1/chat/completions", self.base_url);

        let body = json!({
            "model": self.chat_model,
            "messages": messages,
            "temperature": self.temperature,
        });

        let res = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(ApiError::upstream)?;

        if !res.status().is_success() {
            let text = res.text().await.unwrap_or_default();
            return Err(ApiError::Upstream(format!("chat completion error: {}", text)));
        }

        let payload: Value = res.json().await.map_err(ApiError::upstream)?;

        payload["choices"][0]["message"]["content"]
            .as_str()
            .map(|content| content.to_string())
            .ok_or_else(|| ApiError::Upstream("chat completion reply had no content".to_string()))
    }

    async fn embed(&self, input: &str) -> Result<Vec<f32>, ApiError> {
        let url = format!("{}/v1/embeddings", self.base_url);

        let body = json!({
            "model": self.embedding_model,
            "input": input,
        });

        let res = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(ApiError::upstream)?;

        if !res.status().is_success() {
            let text = res.text().await.unwrap_or_default();
            return Err(ApiError::Upstream(format!("embedding error: {}", text)));
        }

        let payload: Value = res.json().await.map_err(ApiError::upstream)?;

        let values: Vec<f32> = payload["data"][0]["embedding"]
            .as_array()
            .map(|vals| {
                vals.iter()
                    .filter_map(|v| v.as_f64().map(|f| f as f32))
                    .collect()
            })
            .ok_or_else(|| ApiError::Upstream("embedding reply had no vector".to_string()))?;

        if values.len() != EMBEDDING_DIMENSION {
            return Err(ApiError::Upstream(format!(
                "unexpected embedding dimension {}",
                values.len()
            )));
        }

        Ok(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn provider(base_url: String) -> OpenAiProvider {
        OpenAiProvider::with_base_url(
            base_url,
            "test-key".to_string(),
            "gpt-3.5-turbo-16k".to_string(),
            "text-embedding-ada-002".to_string(),
            0.7,
        )
    }

    #[tokio::test]
    async fn chat_extracts_reply_content() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [{"message": {"role": "assistant", "content": "PS11752778 fits."}}]
            })))
            .mount(&server)
            .await;

        let reply = provider(server.uri())
            .chat(&[ChatMessage::user("does this fit?")])
            .await
            .unwrap();
        assert_eq!(reply, "PS11752778 fits.");
    }

    #[tokio::test]
    async fn chat_maps_api_failure_to_upstream() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let err = provider(server.uri())
            .chat(&[ChatMessage::user("hello")])
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Upstream(_)));
    }

    #[tokio::test]
    async fn embed_parses_vector_of_expected_dimension() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/embeddings"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [{"embedding": vec![0.25f32; EMBEDDING_DIMENSION]}]
            })))
            .mount(&server)
            .await;

        let vector = provider(server.uri()).embed("ice maker").await.unwrap();
        assert_eq!(vector.len(), EMBEDDING_DIMENSION);
    }

    #[tokio::test]
    async fn embed_rejects_truncated_vector() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/embeddings"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [{"embedding": [0.1, 0.2, 0.3]}]
            })))
            .mount(&server)
            .await;

        let err = provider(server.uri()).embed("ice maker").await.unwrap_err();
        assert!(matches!(err, ApiError::Upstream(_)));
    }
}
