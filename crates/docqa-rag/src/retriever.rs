//! Query-time retrieval: embed the query, search the index

use docqa_core::{EmbeddingProvider, Error, Result, ScoredChunk};

use crate::index::VectorIndex;

/// Default number of chunks to retrieve when the caller does not say
pub const DEFAULT_TOP_K: usize = 10;

/// Binds a loaded index to the embedder used for query embedding.
///
/// Chunk embeddings were computed once at build time; only the query is
/// embedded fresh per request. The embedder must produce vectors of the same
/// dimensionality the index was built with.
pub struct Retriever<E: EmbeddingProvider> {
    index: VectorIndex,
    embedder: E,
}

impl<E: EmbeddingProvider> Retriever<E> {
    pub fn new(index: VectorIndex, embedder: E) -> Self {
        Self { index, embedder }
    }

    pub fn index(&self) -> &VectorIndex {
        &self.index
    }

    /// Return the top `k` chunks by similarity, descending.
    ///
    /// `k` must be >= 1; an index with fewer than `k` entries returns all of
    /// them.
    pub async fn retrieve(&self, query: &str, k: usize) -> Result<Vec<ScoredChunk>> {
        if k == 0 {
            return Err(Error::InvalidInput("k must be >= 1".to_string()));
        }

        let query_vector = self.embedder.embed_query(query).await?;
        self.index.search_by_vector(&query_vector, k)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::doubles::HashEmbedder;
    use docqa_core::Chunk;

    #[tokio::test]
    async fn test_k_zero_is_invalid() {
        let embedder = HashEmbedder::new(64);
        let index = VectorIndex::build(&embedder, &[Chunk::new("text", "a.txt")])
            .await
            .unwrap();

        let retriever = Retriever::new(index, embedder);
        assert!(retriever.retrieve("query", 0).await.is_err());
    }

    #[tokio::test]
    async fn test_results_are_descending() {
        let embedder = HashEmbedder::new(128);
        let chunks = vec![
            Chunk::new("rust is a systems programming language", "a.txt"),
            Chunk::new("the weather in paris is mild", "b.txt"),
            Chunk::new("rust programs manage memory with ownership", "c.txt"),
        ];
        let index = VectorIndex::build(&embedder, &chunks).await.unwrap();
        let retriever = Retriever::new(index, embedder);

        let results = retriever.retrieve("rust programming", 3).await.unwrap();
        assert_eq!(results.len(), 3);
        for pair in results.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }
}
