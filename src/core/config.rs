use std::env;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};

/// Filesystem locations used by the process (currently just logging).
#[derive(Debug, Clone)]
pub struct AppPaths {
    pub data_dir: PathBuf,
    pub log_dir: PathBuf,
}

impl AppPaths {
    pub fn new() -> Self {
        let data_dir = env::var("PARTCHAT_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("data"));
        let log_dir = data_dir.join("logs");

        for dir in [&data_dir, &log_dir] {
            let _ = fs::create_dir_all(dir);
        }

        AppPaths { data_dir, log_dir }
    }
}

impl Default for AppPaths {
    fn default() -> Self {
        Self::new()
    }
}

/// Runtime configuration, sourced from the environment.
///
/// Required: `OPENAI_API_KEY`, `PINECONE_API_KEY`, `PINECONE_INDEX_HOST`,
/// `SESSION_SECRET`. Everything else has a default matching the production
/// deployment.
#[derive(Debug, Clone)]
pub struct Settings {
    pub openai_api_key: String,
    pub openai_base_url: String,
    pub pinecone_api_key: String,
    /// Data-plane host of the Pinecone index, e.g.
    /// `https://product-index-xxxxxxx.svc.us-east-1-aws.pinecone.io`.
    pub pinecone_index_host: String,
    /// Reserved for signed-cookie support in the front-end proxy.
    pub session_secret: String,
    pub chat_model: String,
    pub embedding_model: String,
    pub temperature: f64,
    /// Number of nearest-neighbor matches retrieved per query.
    pub top_k: usize,
    pub port: u16,
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        Ok(Settings {
            openai_api_key: require("OPENAI_API_KEY")?,
            openai_base_url: env::var("OPENAI_BASE_URL")
                .unwrap_or_else(|_| "https://api.openai.com".to_string()),
            pinecone_api_key: require("PINECONE_API_KEY")?,
            pinecone_index_host: require("PINECONE_INDEX_HOST")?,
            session_secret: require("SESSION_SECRET")?,
            chat_model: env::var("PARTCHAT_CHAT_MODEL")
                .unwrap_or_else(|_| "gpt-3.5-turbo-16k".to_string()),
            embedding_model: env::var("PARTCHAT_EMBEDDING_MODEL")
                .unwrap_or_else(|_| "text-embedding-ada-002".to_string()),
            temperature: parse_or("PARTCHAT_TEMPERATURE", 0.7)?,
            top_k: parse_or("PARTCHAT_TOP_K", 1)?,
            port: parse_or("PORT", 8000)?,
        })
    }
}

fn require(key: &str) -> Result<String> {
    env::var(key).with_context(|| format!("missing required environment variable {}", key))
}

fn parse_or<T: std::str::FromStr>(key: &str, default: T) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .with_context(|| format!("invalid value for {}", key)),
        Err(_) => Ok(default),
    }
}
