use anyhow::Result;
use boolret_core::{CorpusConfig, Engine};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::{EnvFilter, fmt};

use std::collections::BTreeMap;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "boolret-indexer")]
#[command(about = "Build boolean and positional indexes over a text collection and query them", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct CorpusArgs {
    /// Directory of plain-text documents (repeatable)
    #[arg(long, required = true)]
    corpus: Vec<PathBuf>,
    /// Stopword file, one word per line, used on top of the built-in English list
    #[arg(long)]
    stopwords: Option<PathBuf>,
    /// Frequency-ordered word list for splitting long tokens
    #[arg(long)]
    words: Option<PathBuf>,
}

impl CorpusArgs {
    fn config(self) -> CorpusConfig {
        CorpusConfig { dirs: self.corpus, stopwords: self.stopwords, words: self.words }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate one boolean (`a and b or not c`) or proximity (`a b /k`) query
    Query {
        #[command(flatten)]
        corpus: CorpusArgs,
        /// Raw query string
        query: String,
    },
    /// Print document and term counts
    Stats {
        #[command(flatten)]
        corpus: CorpusArgs,
    },
    /// Print both indexes as JSON
    Dump {
        #[command(flatten)]
        corpus: CorpusArgs,
    },
}

#[derive(Serialize)]
struct Dump<'a> {
    built_at: String,
    num_docs: usize,
    num_terms: usize,
    inverted: BTreeMap<&'a str, Vec<&'a str>>,
    positional: BTreeMap<&'a str, BTreeMap<&'a str, &'a [u32]>>,
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Query { corpus, query } => {
            let engine = corpus.config().load_engine()?;
            run_query(&engine, &query)
        }
        Commands::Stats { corpus } => {
            let engine = corpus.config().load_engine()?;
            println!("documents: {}", engine.num_docs());
            println!("terms: {}", engine.num_terms());
            Ok(())
        }
        Commands::Dump { corpus } => {
            let engine = corpus.config().load_engine()?;
            dump(&engine)
        }
    }
}

fn run_query(engine: &Engine, query: &str) -> Result<()> {
    let outcome = engine.search(query)?;
    tracing::info!(kind = ?outcome.kind, hits = outcome.docs.len(), "query evaluated");
    if outcome.docs.is_empty() {
        println!("No documents found.");
    } else {
        println!("Query Result:");
        for doc in &outcome.docs {
            println!("{doc}");
        }
    }
    Ok(())
}

fn dump(engine: &Engine) -> Result<()> {
    let ix = engine.indexes();
    let inverted = ix
        .inverted
        .terms()
        .map(|t| {
            let docs = ix
                .inverted
                .postings(t)
                .map(|d| d.iter().map(String::as_str).collect())
                .unwrap_or_default();
            (t, docs)
        })
        .collect();
    let positional = ix
        .positional
        .terms()
        .map(|t| {
            let docs = ix
                .positional
                .postings(t)
                .map(|d| d.iter().map(|(id, pos)| (id.as_str(), pos.as_slice())).collect())
                .unwrap_or_default();
            (t, docs)
        })
        .collect();
    let out = Dump {
        built_at: time::OffsetDateTime::now_utc().format(&time::format_description::well_known::Rfc3339)?,
        num_docs: engine.num_docs(),
        num_terms: engine.num_terms(),
        inverted,
        positional,
    };
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}
