//! Second-pass relevance reranking of retrieved candidates

use docqa_core::{Error, RerankProvider, Result, ScoredChunk};

/// Narrows a coarse candidate set with a cross-encoder relevance model.
///
/// Embedding-similarity retrieval is a weaker relevance signal than a
/// dedicated reranker, so the intended shape is: retrieve wide (say K=100),
/// then rerank down to a small `top_n` before spending model context.
pub struct RerankStage<R: RerankProvider> {
    provider: R,
    top_n: usize,
}

impl<R: RerankProvider> RerankStage<R> {
    pub fn new(provider: R, top_n: usize) -> Result<Self> {
        if top_n == 0 {
            return Err(Error::InvalidInput("top_n must be >= 1".to_string()));
        }
        Ok(Self { provider, top_n })
    }

    pub fn top_n(&self) -> usize {
        self.top_n
    }

    /// Rerank `candidates`, returning at most `top_n` of them in descending
    /// relevance order with the reranker's scores. Unselected candidates are
    /// dropped. Candidates are matched back by position, so duplicate texts
    /// survive correctly.
    pub async fn apply(
        &self,
        query: &str,
        candidates: Vec<ScoredChunk>,
    ) -> Result<Vec<ScoredChunk>> {
        if candidates.is_empty() {
            return Ok(Vec::new());
        }

        let texts: Vec<String> = candidates.iter().map(|c| c.chunk.text.clone()).collect();
        let top_n = self.top_n.min(candidates.len());
        let ranked = self.provider.rerank(query, &texts, top_n).await?;

        ranked
            .into_iter()
            .map(|r| {
                candidates
                    .get(r.index)
                    .map(|c| ScoredChunk {
                        chunk: c.chunk.clone(),
                        score: r.relevance_score,
                    })
                    .ok_or_else(|| {
                        Error::RerankProvider(format!(
                            "Reranker returned index {} for {} candidates",
                            r.index,
                            candidates.len()
                        ))
                    })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::doubles::OverlapReranker;
    use docqa_core::Chunk;

    fn candidates(texts: &[&str]) -> Vec<ScoredChunk> {
        texts
            .iter()
            .map(|t| ScoredChunk {
                chunk: Chunk::new(*t, "a.txt"),
                score: 0.5,
            })
            .collect()
    }

    #[tokio::test]
    async fn test_output_is_topn_subset_in_descending_order() {
        let stage = RerankStage::new(OverlapReranker, 2).unwrap();
        let input = candidates(&[
            "cats sleep all day",
            "the capital of sweden is stockholm",
            "sweden has a capital city",
            "bread is made from flour",
        ]);
        let input_texts: Vec<String> = input.iter().map(|c| c.chunk.text.clone()).collect();

        let out = stage
            .apply("what is the capital of sweden", input)
            .await
            .unwrap();

        assert_eq!(out.len(), 2);
        assert!(out[0].score >= out[1].score);
        for result in &out {
            assert!(input_texts.contains(&result.chunk.text));
        }
    }

    #[tokio::test]
    async fn test_empty_candidates_yield_empty_result() {
        let stage = RerankStage::new(OverlapReranker, 3).unwrap();
        let out = stage.apply("anything", Vec::new()).await.unwrap();
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn test_topn_larger_than_candidates_is_capped() {
        let stage = RerankStage::new(OverlapReranker, 10).unwrap();
        let out = stage
            .apply("query", candidates(&["one", "two"]))
            .await
            .unwrap();
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn test_topn_zero_is_invalid() {
        assert!(RerankStage::new(OverlapReranker, 0).is_err());
    }
}
