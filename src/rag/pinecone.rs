use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};

use crate::core::config::Settings;
use crate::core::errors::ApiError;

use super::store::{ContextMatch, VectorStore};

/// Name of the product index on the control plane. The data-plane host in
/// `Settings::pinecone_index_host` belongs to this index.
pub const INDEX_NAME: &str = "product-index";

/// Client for the Pinecone data-plane API of a single index.
#[derive(Clone)]
pub struct PineconeIndex {
    host: String,
    api_key: String,
    client: Client,
}

impl PineconeIndex {
    pub fn new(settings: &Settings) -> Self {
        Self::with_host(
            settings.pinecone_index_host.clone(),
            settings.pinecone_api_key.clone(),
        )
    }

    pub fn with_host(host: String, api_key: String) -> Self {
        Self {
            host: host.trim_end_matches('/').to_string(),
            api_key,
            client: Client::new(),
        }
    }
}

#[async_trait]
impl VectorStore for PineconeIndex {
    async fn upsert(&self, id: &str, values: &[f32], text: &str) -> Result<(), ApiError> {
        let url = format!("{}/vectors/upsert", self.host);

        let body = json!({
            "vectors": [{
                "id": id,
                "values": values,
                "metadata": { "text": text },
            }]
        });

        let res = self
            .client
            .post(&url)
            .header("Api-Key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(ApiError::upstream)?;

        if !res.status().is_success() {
            let text = res.text().await.unwrap_or_default();
            return Err(ApiError::Upstream(format!("vector upsert error: {}", text)));
        }

        Ok(())
    }

    async fn query(&self, values: &[f32], top_k: usize) -> Result<Vec<ContextMatch>, ApiError> {
        let url = format!("{}/query", self.host);

        let body = json!({
            "vector": values,
            "topK": top_k,
            "includeMetadata": true,
        });

        let res = self
            .client
            .post(&url)
            .header("Api-Key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(ApiError::upstream)?;

        if !res.status().is_success() {
            let text = res.text().await.unwrap_or_default();
            return Err(ApiError::Upstream(format!("vector query error: {}", text)));
        }

        let payload: Value = res.json().await.map_err(ApiError::upstream)?;

        let mut matches = Vec::new();
        if let Some(entries) = payload["matches"].as_array() {
            for entry in entries {
                // Entries without text metadata are unusable as context.
                let Some(text) = entry["metadata"]["text"].as_str() else {
                    continue;
                };
                matches.push(ContextMatch {
                    text: text.to_string(),
                    score: entry["score"].as_f64().unwrap_or(0.0) as f32,
                });
            }
        }

        Ok(matches)
    }
}
