use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use dochat_core::EmbeddingProvider;
use dochat_openai::OpenAiClient;
use dochat_rag::{AnswerEngine, Chunker, FsIngestor, HashEmbedder, IndexPipeline, MemoryBuffer};

#[derive(Parser)]
#[command(name = "dochat")]
#[command(about = "Chat with a local directory of documents", long_about = None)]
struct Cli {
    /// Directory of documents to index
    #[arg(short, long, default_value = "data")]
    data_dir: String,

    /// Glob pattern selecting which files to index
    #[arg(short, long, default_value = FsIngestor::DEFAULT_PATTERN)]
    glob: String,

    /// Chunk size in characters
    #[arg(long, default_value_t = Chunker::DEFAULT_CHUNK_SIZE)]
    chunk_size: usize,

    /// Overlap between neighboring chunks in characters
    #[arg(long, default_value_t = Chunker::DEFAULT_CHUNK_OVERLAP)]
    chunk_overlap: usize,

    /// Number of chunks retrieved per question
    #[arg(short = 'k', long, default_value_t = dochat_core::DEFAULT_TOP_K)]
    top_k: usize,

    /// Use local hash embeddings instead of the OpenAI embeddings API
    #[arg(long)]
    local_embeddings: bool,

    /// Serve the HTTP API instead of the interactive loop
    #[arg(long)]
    serve: bool,

    /// Address for the HTTP API
    #[arg(long, default_value = "127.0.0.1:8080")]
    addr: SocketAddr,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dochat=info".into()),
        )
        .init();

    let cli = Cli::parse();

    let openai = Arc::new(OpenAiClient::from_env().context("OpenAI configuration")?);

    let embedder: Arc<dyn EmbeddingProvider> = if cli.local_embeddings {
        Arc::new(HashEmbedder::new())
    } else {
        openai.clone()
    };

    // Index build is the startup barrier: nothing is served until it
    // completes, and a failure here aborts the process.
    let pipeline = IndexPipeline::new(
        Arc::new(FsIngestor::new(&cli.data_dir, &cli.glob)),
        Chunker::new(cli.chunk_size, cli.chunk_overlap)?,
        embedder,
    );
    let retriever = pipeline.build().await.context("index build failed")?;

    let memory = Arc::new(MemoryBuffer::new());
    let engine = Arc::new(
        AnswerEngine::new(Arc::new(retriever), openai, memory).with_top_k(cli.top_k),
    );

    if cli.serve {
        dochat_server::serve(cli.addr, engine).await?;
    } else {
        dochat_cli::run_loop(engine).await?;
    }

    Ok(())
}
