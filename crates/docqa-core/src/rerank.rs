//! Rerank provider trait and types

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::Result;

/// A reranked document reference: the position of the document in the
/// candidate list that was sent, plus its relevance score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedDocument {
    pub index: usize,
    pub relevance_score: f32,
}

/// Trait for hosted reranking services
///
/// A cross-encoder relevance model scores each candidate against the query and
/// returns at most `top_n` references in descending relevance order.
/// Candidates not selected are dropped.
#[async_trait]
pub trait RerankProvider: Send + Sync {
    async fn rerank(
        &self,
        query: &str,
        documents: &[String],
        top_n: usize,
    ) -> Result<Vec<RankedDocument>>;
}

#[async_trait]
impl<T: RerankProvider + ?Sized> RerankProvider for std::sync::Arc<T> {
    async fn rerank(
        &self,
        query: &str,
        documents: &[String],
        top_n: usize,
    ) -> Result<Vec<RankedDocument>> {
        (**self).rerank(query, documents, top_n).await
    }
}
