//! Cohere configuration

use docqa_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::env;

/// Configuration for the Cohere API client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CohereConfig {
    pub api_key: String,
    pub api_url: String,
    pub embed_model: String,
    pub chat_model: String,
    pub rerank_model: String,
}

impl CohereConfig {
    /// Create configuration from environment variables
    ///
    /// Fails fast before any network call: a missing or empty `COHERE_API_KEY`
    /// is a configuration error, not a deferred authentication failure.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let api_key = Self::require_api_key(env::var("COHERE_API_KEY").ok())?;

        let api_url =
            env::var("COHERE_API_URL").unwrap_or_else(|_| "https://api.cohere.com".to_string());

        let embed_model = env::var("COHERE_EMBED_MODEL")
            .unwrap_or_else(|_| crate::CohereClient::EMBED_ENGLISH_V3.to_string());
        let chat_model = env::var("COHERE_CHAT_MODEL")
            .unwrap_or_else(|_| crate::CohereClient::COMMAND_R.to_string());
        let rerank_model = env::var("COHERE_RERANK_MODEL")
            .unwrap_or_else(|_| crate::CohereClient::RERANK_ENGLISH_V3.to_string());

        Ok(Self {
            api_key,
            api_url,
            embed_model,
            chat_model,
            rerank_model,
        })
    }

    /// Validate the credential value before any network call is attempted
    pub(crate) fn require_api_key(value: Option<String>) -> Result<String> {
        let api_key = value.ok_or_else(|| {
            Error::Configuration("COHERE_API_KEY environment variable not found".to_string())
        })?;

        if api_key.trim().is_empty() {
            return Err(Error::Configuration(
                "COHERE_API_KEY environment variable is empty".to_string(),
            ));
        }

        Ok(api_key)
    }

    /// Create configuration with explicit values
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            api_url: "https://api.cohere.com".to_string(),
            embed_model: crate::CohereClient::EMBED_ENGLISH_V3.to_string(),
            chat_model: crate::CohereClient::COMMAND_R.to_string(),
            rerank_model: crate::CohereClient::RERANK_ENGLISH_V3.to_string(),
        }
    }
}
