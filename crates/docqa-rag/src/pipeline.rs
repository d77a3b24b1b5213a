//! The answer pipelines: retrieve, optionally rerank, prompt, complete

use docqa_core::{ChatProvider, EmbeddingProvider, RerankProvider, Result, ScoredChunk};

use crate::prompt::PromptTemplate;
use crate::rerank::RerankStage;
use crate::retriever::Retriever;

/// Join chunk texts, in ranked order, into a single context block
pub fn build_context(chunks: &[ScoredChunk]) -> String {
    chunks
        .iter()
        .map(|c| c.chunk.text.as_str())
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// The basic pipeline: retrieve -> build context -> render prompt -> complete.
///
/// Providers are constructed once by the caller and passed in; no ambient
/// state. Collaborator failures propagate unmodified, with no retry.
pub struct AnswerPipeline<E: EmbeddingProvider, C: ChatProvider> {
    retriever: Retriever<E>,
    chat: C,
    template: PromptTemplate,
    top_k: usize,
}

impl<E: EmbeddingProvider, C: ChatProvider> AnswerPipeline<E, C> {
    pub fn new(retriever: Retriever<E>, chat: C, template: PromptTemplate, top_k: usize) -> Self {
        Self {
            retriever,
            chat,
            template,
            top_k,
        }
    }

    /// Answer a query from the indexed corpus, returning the model's text
    /// verbatim
    pub async fn answer(&self, query: &str) -> Result<String> {
        let retrieved = self.retriever.retrieve(query, self.top_k).await?;
        let context = build_context(&retrieved);
        let messages = self.template.render(&context, query);
        self.chat.complete(&messages).await
    }
}

/// The reranked variant: retrieve a coarse candidate set, narrow it with the
/// rerank stage, then prompt and complete as the basic pipeline does.
pub struct RerankedAnswerPipeline<E, C, R>
where
    E: EmbeddingProvider,
    C: ChatProvider,
    R: RerankProvider,
{
    retriever: Retriever<E>,
    rerank: RerankStage<R>,
    chat: C,
    template: PromptTemplate,
    retrieve_k: usize,
}

impl<E, C, R> RerankedAnswerPipeline<E, C, R>
where
    E: EmbeddingProvider,
    C: ChatProvider,
    R: RerankProvider,
{
    pub fn new(
        retriever: Retriever<E>,
        rerank: RerankStage<R>,
        chat: C,
        template: PromptTemplate,
        retrieve_k: usize,
    ) -> Self {
        Self {
            retriever,
            rerank,
            chat,
            template,
            retrieve_k,
        }
    }

    pub async fn answer(&self, query: &str) -> Result<String> {
        let candidates = self.retriever.retrieve(query, self.retrieve_k).await?;
        let reranked = self.rerank.apply(query, candidates).await?;
        let context = build_context(&reranked);
        let messages = self.template.render(&context, query);
        self.chat.complete(&messages).await
    }
}
