//! Quarry CLI - hybrid search over a JSON knowledge corpus.
//!
//! # Usage
//!
//! ```bash
//! # Hybrid search (default mode)
//! quarry "breast cancer prognosis" --corpus knowledge.json
//! quarry "rust embeddings" -n 5 --mode bm25
//! quarry "query" --json
//!
//! # Use a local Ollama server instead of the offline embedder
//! quarry "query" --ollama-url http://localhost:11434 --model nomic-embed-text
//!
//! # Index statistics
//! quarry --stats --corpus knowledge.json
//! ```

mod corpus;
mod output;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use quarry_core::config::EMBEDDING_DIM;
use quarry_core::embedding::{Embedder, HashingEmbedder, OllamaEmbedder};
use quarry_core::{SearchEngine, SearchMode};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Search mode selector on the command line.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum Mode {
    /// Fused semantic + lexical ranking
    Hybrid,
    /// Semantic ranking only
    Vector,
    /// Lexical BM25 ranking only
    Bm25,
}

/// Quarry hybrid search CLI.
///
/// Ranks passages from a JSON corpus with BM25, embedding cosine
/// similarity, or a weighted fusion of both.
#[derive(Parser)]
#[command(name = "quarry", version, about)]
struct Cli {
    /// Search query
    query: Option<String>,

    /// Maximum number of results to return
    #[arg(short = 'n', long, default_value = "10")]
    limit: usize,

    /// Search mode
    #[arg(long, value_enum, default_value = "hybrid")]
    mode: Mode,

    /// Weight of the semantic component in hybrid mode
    #[arg(long, default_value_t = quarry_core::config::DEFAULT_VECTOR_WEIGHT)]
    vector_weight: f32,

    /// Weight of the lexical component in hybrid mode
    #[arg(long, default_value_t = quarry_core::config::DEFAULT_BM25_WEIGHT)]
    bm25_weight: f32,

    /// Path to the JSON corpus file
    #[arg(long, default_value = "knowledge.json")]
    corpus: PathBuf,

    /// Base URL of an Ollama server; without it a deterministic
    /// offline embedder is used
    #[arg(long)]
    ollama_url: Option<String>,

    /// Embedding model name for the Ollama server
    #[arg(long, default_value = "nomic-embed-text")]
    model: String,

    /// Output results as JSON
    #[arg(long)]
    json: bool,

    /// Print index statistics instead of searching
    #[arg(long)]
    stats: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn embedder(cli: &Cli) -> Result<Arc<dyn Embedder>> {
    match &cli.ollama_url {
        Some(url) => {
            let embedder = OllamaEmbedder::new(url.clone(), cli.model.clone(), EMBEDDING_DIM)
                .context("failed to construct Ollama embedding client")?;
            Ok(Arc::new(embedder))
        }
        None => Ok(Arc::new(HashingEmbedder::new(EMBEDDING_DIM))),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let documents = corpus::load_corpus(&cli.corpus)?;
    let engine = SearchEngine::build(documents, embedder(&cli)?)
        .await
        .context("failed to build search index")?;

    if cli.stats {
        let stats = engine.stats().await;
        let rendered = if cli.json {
            output::format_stats_json(&stats)
        } else {
            output::format_stats_human(&stats)
        };
        println!("{rendered}");
        return Ok(());
    }

    let Some(query) = &cli.query else {
        bail!("no search query provided; use --help for usage information");
    };

    let mode = match cli.mode {
        Mode::Hybrid => SearchMode::Hybrid {
            vector_weight: cli.vector_weight,
            bm25_weight: cli.bm25_weight,
        },
        Mode::Vector => SearchMode::Vector,
        Mode::Bm25 => SearchMode::Bm25,
    };

    let results = engine
        .search(query, cli.limit, mode)
        .await
        .context("search failed")?;

    let rendered = if cli.json {
        output::format_json(query, &results)
    } else {
        output::format_human(query, &results)
    };
    println!("{rendered}");

    Ok(())
}
