//! Splits run-together words ("informationretrieval") into dictionary words.
//!
//! Words are costed by their rank in a frequency-ordered list following Zipf's
//! law, `cost = ln((rank + 1) * ln(N))`, and the cheapest full segmentation is
//! found by dynamic programming over character offsets.

use anyhow::{Context, Result};
use lazy_static::lazy_static;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

const BUILTIN_WORDS: &str = include_str!("../data/words.txt");

lazy_static! {
    static ref DEFAULT_SEGMENTER: Arc<Segmenter> = Arc::new(Segmenter::from_words(BUILTIN_WORDS.lines()));
}

#[derive(Debug, Clone)]
pub struct Segmenter {
    costs: HashMap<String, f64>,
    max_word: usize,
}

impl Segmenter {
    /// Build from words ordered most-frequent first. Blank lines are ignored and
    /// a repeated word keeps its first (best) rank.
    pub fn from_words<'a, I>(words: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut ranked: Vec<String> = Vec::new();
        let mut seen = std::collections::HashSet::new();
        for w in words {
            let w = w.trim().to_lowercase();
            if w.is_empty() || !seen.insert(w.clone()) { continue; }
            ranked.push(w);
        }
        let log_n = (ranked.len().max(2) as f64).ln();
        let mut costs = HashMap::with_capacity(ranked.len());
        let mut max_word = 0;
        for (rank, w) in ranked.into_iter().enumerate() {
            max_word = max_word.max(w.chars().count());
            costs.insert(w, ((rank + 1) as f64 * log_n).ln());
        }
        Self { costs, max_word }
    }

    /// Load a word list file, one word per line, most frequent first.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading segmentation dictionary {}", path.display()))?;
        Ok(Self::from_words(text.lines()))
    }

    /// Shared segmenter over the built-in English word list.
    pub fn english() -> Arc<Segmenter> {
        DEFAULT_SEGMENTER.clone()
    }

    pub fn len(&self) -> usize { self.costs.len() }

    pub fn is_empty(&self) -> bool { self.costs.is_empty() }

    /// Split `token` into its cheapest sequence of known words. A token that
    /// cannot be covered entirely by known words comes back unchanged.
    pub fn split(&self, token: &str) -> Vec<String> {
        let chars: Vec<char> = token.chars().collect();
        let n = chars.len();
        if n == 0 || self.max_word == 0 {
            return vec![token.to_string()];
        }

        // best[i] = (cost of the best split of chars[..i], length of its last word)
        let mut best: Vec<(f64, usize)> = vec![(f64::INFINITY, 0); n + 1];
        best[0] = (0.0, 0);
        let mut piece = String::new();
        for i in 1..=n {
            for k in 1..=i.min(self.max_word) {
                let (prev, _) = best[i - k];
                if prev.is_infinite() { continue; }
                piece.clear();
                piece.extend(&chars[i - k..i]);
                if let Some(c) = self.costs.get(piece.as_str()) {
                    let total = prev + c;
                    if total < best[i].0 {
                        best[i] = (total, k);
                    }
                }
            }
        }

        if best[n].0.is_infinite() {
            return vec![token.to_string()];
        }
        let mut out = Vec::new();
        let mut i = n;
        while i > 0 {
            let k = best[i].1;
            out.push(chars[i - k..i].iter().collect::<String>());
            i -= k;
        }
        out.reverse();
        out
    }
}
