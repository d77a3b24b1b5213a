//! Core traits and types for docqa
//!
//! This crate defines the fundamental traits and types used across the docqa
//! system. It provides capability-facing interfaces for the hosted embedding,
//! chat, and reranking collaborators, plus the shared chunk and error types,
//! making the pipeline test-friendly and extensible.

pub mod chat;
pub mod chunk;
pub mod embedding;
pub mod error;
pub mod rerank;

pub use chat::{ChatMessage, ChatProvider, Role};
pub use chunk::{Chunk, ScoredChunk};
pub use embedding::EmbeddingProvider;
pub use error::{Error, Result};
pub use rerank::{RankedDocument, RerankProvider};
