//! Embedding provider trait

use async_trait::async_trait;

use crate::Result;

/// Trait for hosted embedding services
///
/// Implementations map text to fixed-dimension float vectors. Document and
/// query embedding are separate operations because hosted APIs distinguish the
/// two input types, but both must come from the same model and produce vectors
/// of the same dimension, or similarity search is undefined.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Embed a batch of document texts, one vector per input, order-preserving
    async fn embed_documents(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;

    /// Embed a single query string
    async fn embed_query(&self, text: &str) -> Result<Vec<f32>>;
}

#[async_trait]
impl<T: EmbeddingProvider + ?Sized> EmbeddingProvider for std::sync::Arc<T> {
    async fn embed_documents(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        (**self).embed_documents(texts).await
    }

    async fn embed_query(&self, text: &str) -> Result<Vec<f32>> {
        (**self).embed_query(text).await
    }
}
