use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::*;
use std::path::PathBuf;
use std::sync::Arc;

// Import from our modular crates
use docqa_cohere::CohereClient;
use docqa_rag::{
    AnswerPipeline, Chunker, DEFAULT_TOP_K, PromptTemplate, RerankStage, RerankedAnswerPipeline,
    Retriever, VectorIndex, read_documents,
};

#[derive(Parser)]
#[command(name = "docqa")]
#[command(about = "Retrieval-augmented question answering over local text files", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Ingest, chunk, and embed a directory of text files into a local index
    Index {
        /// Directory containing .txt files to index
        #[arg(long)]
        docs: PathBuf,

        /// Where to persist the index
        #[arg(long, default_value = "docqa_index.json")]
        index: PathBuf,

        /// Maximum chunk size in characters
        #[arg(long, default_value_t = 300)]
        chunk_size: usize,

        /// Overlap between consecutive chunks in characters
        #[arg(long, default_value_t = 40)]
        overlap: usize,
    },
    /// Answer a question from a previously built index
    Ask {
        /// The question to answer
        question: String,

        /// Path of the persisted index
        #[arg(long, default_value = "docqa_index.json")]
        index: PathBuf,

        /// Number of chunks to retrieve
        #[arg(short, long, default_value_t = DEFAULT_TOP_K)]
        k: usize,

        /// Rerank the retrieved chunks before answering
        #[arg(long)]
        rerank: bool,

        /// Number of chunks to keep after reranking
        #[arg(long, default_value_t = 5)]
        top_n: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    // Fail fast on a missing or empty credential, before any network call
    let client = Arc::new(CohereClient::from_env()?);

    match cli.command {
        Commands::Index {
            docs,
            index,
            chunk_size,
            overlap,
        } => {
            let lines = read_documents(&docs)?;
            println!(
                "{} Read {} non-empty lines from {}",
                "📄".blue(),
                lines.len(),
                docs.display()
            );

            let chunker = Chunker::new(chunk_size, overlap, ' ')?;
            let chunks = chunker.chunk_lines(&lines);
            println!("{} Split into {} chunks", "✂️".blue(), chunks.len());

            let vector_index = VectorIndex::build(client.as_ref(), &chunks).await?;
            vector_index.save(&index)?;
            println!(
                "{} Indexed {} chunks ({}-dim) to {}",
                "✅".green(),
                vector_index.len(),
                vector_index.dimension(),
                index.display()
            );
        }
        Commands::Ask {
            question,
            index,
            k,
            rerank,
            top_n,
        } => {
            let vector_index = VectorIndex::load(&index)?;
            println!(
                "{} Loaded index with {} chunks from {}",
                "📚".blue(),
                vector_index.len(),
                index.display()
            );

            let retriever = Retriever::new(vector_index, client.clone());
            let template = PromptTemplate::default();

            println!("{} Answering...", "🤖".blue());
            let answer = if rerank {
                let stage = RerankStage::new(client.clone(), top_n)?;
                let pipeline =
                    RerankedAnswerPipeline::new(retriever, stage, client.clone(), template, k);
                pipeline.answer(&question).await?
            } else {
                let pipeline = AnswerPipeline::new(retriever, client.clone(), template, k);
                pipeline.answer(&question).await?
            };

            println!();
            println!("{}", answer.bold());
        }
    }

    Ok(())
}
