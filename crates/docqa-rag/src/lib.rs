//! Retrieval-augmented generation pipeline for docqa
//!
//! This crate provides the pipeline itself: document ingestion, chunking, a
//! JSON-persisted vector index, retrieval, an optional rerank stage, and the
//! answer pipeline that feeds retrieved context to a chat model.

mod chunker;
mod index;
mod ingest;
mod pipeline;
mod prompt;
mod rerank;
mod retriever;


pub use chunker::Chunker;
pub use index::{IndexEntry, VectorIndex};
pub use ingest::{SourceLine, read_documents};
pub use pipeline::{AnswerPipeline, RerankedAnswerPipeline, build_context};
pub use prompt::PromptTemplate;
pub use rerank::RerankStage;
pub use retriever::{DEFAULT_TOP_K, Retriever};

// Re-export core types for convenience
pub use docqa_core::{
    ChatMessage, ChatProvider, Chunk, EmbeddingProvider, Error, RankedDocument, RerankProvider,
    Result, Role, ScoredChunk,
};
