//! Cohere API client implementation

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use docqa_core::{
    ChatMessage, ChatProvider, EmbeddingProvider, Error, RankedDocument, RerankProvider, Result,
    Role,
};

use crate::config::CohereConfig;

/// Cohere API client
///
/// One `reqwest::Client` serves the embed, chat, and rerank endpoints; the
/// API key is sent as a bearer token on every request.
pub struct CohereClient {
    config: CohereConfig,
    client: Client,
}

#[derive(Serialize)]
struct EmbedRequest<'a> {
    model: &'a str,
    texts: &'a [String],
    input_type: &'a str,
    embedding_types: [&'a str; 1],
}

#[derive(Deserialize)]
struct EmbedResponse {
    embeddings: EmbedVectors,
}

#[derive(Deserialize)]
struct EmbedVectors {
    float: Vec<Vec<f32>>,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
}

#[derive(Serialize)]
struct WireMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    message: AssistantMessage,
}

#[derive(Deserialize)]
struct AssistantMessage {
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    text: String,
}

#[derive(Serialize)]
struct RerankRequest<'a> {
    model: &'a str,
    query: &'a str,
    documents: &'a [String],
    top_n: usize,
}

#[derive(Deserialize)]
struct RerankResponse {
    results: Vec<RerankResult>,
}

#[derive(Deserialize)]
struct RerankResult {
    index: usize,
    relevance_score: f32,
}

impl CohereClient {
    /// Model constants
    pub const EMBED_ENGLISH_V3: &'static str = "embed-english-v3.0";
    pub const COMMAND_R: &'static str = "command-r-08-2024";
    pub const RERANK_ENGLISH_V3: &'static str = "rerank-english-v3.0";

    /// Create a new Cohere client from configuration
    pub fn new(config: CohereConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|e| Error::Network(e.to_string()))?;

        Ok(Self { config, client })
    }

    /// Create a new Cohere client from environment variables
    pub fn from_env() -> Result<Self> {
        let config = CohereConfig::from_env()?;
        Self::new(config)
    }

    async fn post_json<T: Serialize>(&self, path: &str, body: &T) -> Result<reqwest::Response> {
        let url = format!("{}{}", self.config.api_url, path);

        let response = self
            .client
            .post(&url)
            .header("Accept", "application/json")
            .header("Content-Type", "application/json")
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .json(body)
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        Ok(response)
    }

    async fn error_from_response(path: &str, response: reqwest::Response) -> Error {
        let status = response.status();
        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Error::Authentication(format!(
                "Cohere API rejected the credential on {}: {} {}",
                path, status, error_text
            ));
        }

        Error::Network(format!(
            "Cohere API request to {} failed with status {}: {}",
            path, status, error_text
        ))
    }

    async fn embed(&self, texts: &[String], input_type: &str) -> Result<Vec<Vec<f32>>> {
        let request_body = EmbedRequest {
            model: &self.config.embed_model,
            texts,
            input_type,
            embedding_types: ["float"],
        };

        let response = self.post_json("/v2/embed", &request_body).await?;

        if !response.status().is_success() {
            return Err(Self::error_from_response("/v2/embed", response).await);
        }

        let embed_response: EmbedResponse = response
            .json()
            .await
            .map_err(|e| Error::Serialization(e.to_string()))?;

        let vectors = embed_response.embeddings.float;
        if vectors.len() != texts.len() {
            return Err(Error::EmbeddingProvider(format!(
                "Expected {} embeddings, got {}",
                texts.len(),
                vectors.len()
            )));
        }

        Ok(vectors)
    }
}

#[async_trait]
impl EmbeddingProvider for CohereClient {
    async fn embed_documents(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        self.embed(texts, "search_document").await
    }

    async fn embed_query(&self, text: &str) -> Result<Vec<f32>> {
        let texts = [text.to_string()];
        let mut vectors = self.embed(&texts, "search_query").await?;
        vectors
            .pop()
            .ok_or_else(|| Error::EmbeddingProvider("Empty embedding response".to_string()))
    }
}

#[async_trait]
impl ChatProvider for CohereClient {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String> {
        let wire_messages: Vec<WireMessage<'_>> = messages
            .iter()
            .map(|m| WireMessage {
                role: match m.role {
                    Role::System => "system",
                    Role::User => "user",
                    Role::Assistant => "assistant",
                },
                content: &m.content,
            })
            .collect();

        let request_body = ChatRequest {
            model: &self.config.chat_model,
            messages: wire_messages,
        };

        let response = self.post_json("/v2/chat", &request_body).await?;

        if !response.status().is_success() {
            return Err(Self::error_from_response("/v2/chat", response).await);
        }

        let chat_response: ChatResponse = response
            .json()
            .await
            .map_err(|e| Error::Serialization(e.to_string()))?;

        let text = chat_response
            .message
            .content
            .iter()
            .map(|block| block.text.as_str())
            .collect::<Vec<_>>()
            .join("");

        if text.trim().is_empty() {
            return Err(Error::ChatProvider(
                "Empty response from Cohere chat API".to_string(),
            ));
        }

        Ok(text)
    }
}

#[async_trait]
impl RerankProvider for CohereClient {
    async fn rerank(
        &self,
        query: &str,
        documents: &[String],
        top_n: usize,
    ) -> Result<Vec<RankedDocument>> {
        let request_body = RerankRequest {
            model: &self.config.rerank_model,
            query,
            documents,
            top_n,
        };

        let response = self.post_json("/v2/rerank", &request_body).await?;

        if !response.status().is_success() {
            return Err(Self::error_from_response("/v2/rerank", response).await);
        }

        let rerank_response: RerankResponse = response
            .json()
            .await
            .map_err(|e| Error::Serialization(e.to_string()))?;

        let ranked = rerank_response
            .results
            .into_iter()
            .map(|r| RankedDocument {
                index: r.index,
                relevance_score: r.relevance_score,
            })
            .collect();

        Ok(ranked)
    }
}
