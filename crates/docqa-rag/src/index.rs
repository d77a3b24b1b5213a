//! JSON-persisted flat vector index with exhaustive cosine search

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use docqa_core::{Chunk, EmbeddingProvider, Error, Result, ScoredChunk};

/// One indexed chunk: its text, source path, and embedding.
///
/// Entries are created at build time and never mutated; changing the corpus
/// means rebuilding the whole index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexEntry {
    pub text: String,
    pub source: std::path::PathBuf,
    pub embedding: Vec<f32>,
}

/// A snapshot of embedded chunks supporting similarity search
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorIndex {
    entries: Vec<IndexEntry>,
    dimension: usize,
}

impl VectorIndex {
    /// Build an index from chunks: one batch embed call for all chunk texts,
    /// entries stored in insertion order.
    pub async fn build<E: EmbeddingProvider>(embedder: &E, chunks: &[Chunk]) -> Result<Self> {
        let texts: Vec<String> = chunks.iter().map(|c| c.text.clone()).collect();
        let vectors = embedder.embed_documents(&texts).await?;

        if vectors.len() != chunks.len() {
            return Err(Error::Index(format!(
                "Embedder returned {} vectors for {} chunks",
                vectors.len(),
                chunks.len()
            )));
        }

        let dimension = vectors.first().map(|v| v.len()).unwrap_or(0);
        for vector in &vectors {
            if vector.len() != dimension {
                return Err(Error::Index(format!(
                    "Inconsistent embedding dimensions: expected {}, got {}",
                    dimension,
                    vector.len()
                )));
            }
        }

        let entries = chunks
            .iter()
            .zip(vectors)
            .map(|(chunk, embedding)| IndexEntry {
                text: chunk.text.clone(),
                source: chunk.source.clone(),
                embedding,
            })
            .collect();

        Ok(Self { entries, dimension })
    }

    /// Persist the index as JSON
    pub fn save(&self, path: &Path) -> Result<()> {
        let content =
            serde_json::to_string_pretty(self).map_err(|e| Error::Serialization(e.to_string()))?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Load a previously persisted index.
    ///
    /// The caller is responsible for querying it with an embedder of the same
    /// dimensionality used at build time; `search_by_vector` rejects
    /// mismatched query vectors.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let index: Self =
            serde_json::from_str(&content).map_err(|e| Error::Serialization(e.to_string()))?;
        Ok(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Exhaustive cosine similarity search, top `k` in descending score order.
    ///
    /// The sort is stable, so equal-score entries keep index-insertion order.
    /// Fewer than `k` entries returns all of them.
    pub fn search_by_vector(&self, vector: &[f32], k: usize) -> Result<Vec<ScoredChunk>> {
        if !self.entries.is_empty() && vector.len() != self.dimension {
            return Err(Error::Index(format!(
                "Query vector dimension {} does not match index dimension {}",
                vector.len(),
                self.dimension
            )));
        }

        let mut scored: Vec<ScoredChunk> = self
            .entries
            .iter()
            .map(|entry| ScoredChunk {
                chunk: Chunk::new(entry.text.clone(), entry.source.clone()),
                score: cosine_similarity(vector, &entry.embedding),
            })
            .collect();

        scored.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        scored.truncate(k);

        Ok(scored)
    }
}

/// Calculate cosine similarity between two vectors
fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return 0.0;
    }

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let magnitude_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let magnitude_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if magnitude_a == 0.0 || magnitude_b == 0.0 {
        return 0.0;
    }

    dot_product / (magnitude_a * magnitude_b)
}
