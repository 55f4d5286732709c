//! Reading a document collection and stopword list from disk.

use crate::engine::Engine;
use crate::error::DocumentReadError;
use crate::segment::Segmenter;
use crate::tokenizer::Normalizer;
use crate::DocId;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// One entry from a document source: its id and either its text or why it
/// could not be read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDocument {
    pub id: DocId,
    pub content: Result<String, DocumentReadError>,
}

impl SourceDocument {
    pub fn text(id: impl Into<DocId>, text: impl Into<String>) -> Self {
        Self { id: id.into(), content: Ok(text.into()) }
    }

    /// Decode raw bytes; invalid UTF-8 becomes a read error.
    pub fn from_bytes(id: impl Into<DocId>, bytes: Vec<u8>) -> Self {
        let id = id.into();
        let content = String::from_utf8(bytes).map_err(|_| DocumentReadError::InvalidUtf8 { id: id.clone() });
        Self { id, content }
    }
}

/// List the regular files directly inside `dir` (no recursion), sorted by file
/// name. Each file becomes one document identified by its file name.
pub fn load_directory<P: AsRef<Path>>(dir: P) -> Result<Vec<SourceDocument>> {
    let dir = dir.as_ref();
    let mut docs = Vec::new();
    let walker = WalkDir::new(dir).min_depth(1).max_depth(1).sort_by_file_name();
    for entry in walker {
        let entry = entry.with_context(|| format!("listing corpus directory {}", dir.display()))?;
        if !entry.file_type().is_file() { continue; }
        let id = entry.file_name().to_string_lossy().into_owned();
        let doc = match std::fs::read(entry.path()) {
            Ok(bytes) => SourceDocument::from_bytes(id, bytes),
            Err(e) => SourceDocument { content: Err(DocumentReadError::Io { id: id.clone(), message: e.to_string() }), id },
        };
        docs.push(doc);
    }
    tracing::debug!(dir = %dir.display(), count = docs.len(), "listed corpus directory");
    Ok(docs)
}

/// Load every directory in order, concatenating their documents.
pub fn load_directories<P: AsRef<Path>>(dirs: &[P]) -> Result<Vec<SourceDocument>> {
    let mut all = Vec::new();
    for dir in dirs {
        all.extend(load_directory(dir)?);
    }
    Ok(all)
}

/// One stopword per line; blank lines ignored.
pub fn load_stopwords<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading stopword file {}", path.display()))?;
    Ok(text
        .lines()
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty())
        .collect())
}

/// Where a collection and its normalization resources live on disk.
#[derive(Debug, Clone, Default)]
pub struct CorpusConfig {
    pub dirs: Vec<PathBuf>,
    pub stopwords: Option<PathBuf>,
    /// Frequency-ordered word list for splitting long tokens; built-in list if unset.
    pub words: Option<PathBuf>,
}

impl CorpusConfig {
    pub fn normalizer(&self) -> Result<Normalizer> {
        let stopwords = match &self.stopwords {
            Some(path) => load_stopwords(path)?,
            None => Vec::new(),
        };
        let segmenter = match &self.words {
            Some(path) => std::sync::Arc::new(Segmenter::from_file(path)?),
            None => Segmenter::english(),
        };
        Ok(Normalizer::with_segmenter(stopwords, segmenter))
    }

    /// Read everything and build a fresh engine.
    pub fn load_engine(&self) -> Result<Engine> {
        let normalizer = self.normalizer()?;
        let docs = load_directories(self.dirs.as_slice())?;
        Ok(Engine::build(&docs, normalizer))
    }
}
