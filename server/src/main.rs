use anyhow::Result;
use axum::Router;
use boolret_core::CorpusConfig;
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};
use boolret_server::build_app;
use tokio::net::TcpListener;

#[derive(Parser)]
struct Args {
    /// Directory of plain-text documents (repeatable)
    #[arg(long, required = true)]
    corpus: Vec<PathBuf>,
    /// Stopword file, one word per line
    #[arg(long)]
    stopwords: Option<PathBuf>,
    /// Frequency-ordered word list for splitting long tokens
    #[arg(long)]
    words: Option<PathBuf>,
    /// Host to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,
    /// Port to bind
    #[arg(long, default_value_t = 8080)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Args::parse();
    let corpus = CorpusConfig { dirs: args.corpus, stopwords: args.stopwords, words: args.words };
    let admin_token = std::env::var("ADMIN_TOKEN").ok();
    let app: Router = build_app(corpus, admin_token)?;

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
