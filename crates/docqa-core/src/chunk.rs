//! Chunk types shared across the pipeline

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A bounded-length piece of a source document, the unit of retrieval.
///
/// Chunks are immutable once created. Duplicate text across chunks is allowed;
/// the source path is the only metadata a chunk carries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    pub text: String,
    pub source: PathBuf,
}

impl Chunk {
    pub fn new(text: impl Into<String>, source: impl Into<PathBuf>) -> Self {
        Self {
            text: text.into(),
            source: source.into(),
        }
    }
}

/// A chunk paired with a relevance score from retrieval or reranking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredChunk {
    pub chunk: Chunk,
    pub score: f32,
}
