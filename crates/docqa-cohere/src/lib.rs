//! Cohere API integration for docqa
//!
//! One hosted provider covers all three collaborator contracts (embedding,
//! chat, reranking) behind a single API key.

mod client;
mod config;


pub use client::CohereClient;
pub use config::CohereConfig;

// Re-export core types for convenience
pub use docqa_core::{
    ChatMessage, ChatProvider, EmbeddingProvider, Error, RankedDocument, RerankProvider, Result,
    Role,
};
