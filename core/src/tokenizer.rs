use crate::segment::Segmenter;
use lazy_static::lazy_static;
use regex::Regex;
use rust_stemmers::{Algorithm, Stemmer};
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;
use unicode_normalization::UnicodeNormalization;

/// Tokens longer than this many characters are handed to the segmenter.
pub const MAX_TOKEN_CHARS: usize = 10;

lazy_static! {
    // URLs first so they stay atomic, then word runs, then runs of anything else.
    static ref RE: Regex = Regex::new(r"(?u)https?://\S+|[\p{L}\p{N}\p{M}_]+|[^\s\p{L}\p{N}\p{M}_]+").expect("valid regex");
    static ref STOPWORDS: HashSet<&'static str> = {
        let words: &[&str] = &[
            "i","me","my","myself","we","our","ours","ourselves","you","you're","you've","you'll","you'd","your","yours","yourself","yourselves",
            "he","him","his","himself","she","she's","her","hers","herself","it","it's","its","itself",
            "they","them","their","theirs","themselves","what","which","who","whom","this","that","that'll","these","those",
            "am","is","are","was","were","be","been","being","have","has","had","having","do","does","did","doing",
            "a","an","the","and","but","if","or","because","as","until","while","of","at","by","for","with","about","against",
            "between","into","through","during","before","after","above","below","to","from","up","down","in","out","on","off",
            "over","under","again","further","then","once","here","there","when","where","why","how","all","any","both","each",
            "few","more","most","other","some","such","no","nor","not","only","own","same","so","than","too","very",
            "s","t","can","will","just","don","don't","should","should've","now","d","ll","m","o","re","ve","y",
            "ain","aren","aren't","couldn","couldn't","didn","didn't","doesn","doesn't","hadn","hadn't","hasn","hasn't",
            "haven","haven't","isn","isn't","ma","mightn","mightn't","mustn","mustn't","needn","needn't","shan","shan't",
            "shouldn","shouldn't","wasn","wasn't","weren","weren't","won","won't","wouldn","wouldn't"
        ];
        words.iter().copied().collect()
    };
}

/// True if `token` is in the built-in English stopword list.
pub fn is_builtin_stopword(token: &str) -> bool { STOPWORDS.contains(token) }

/// Lowercase and split raw text into word-ish units, keeping URLs atomic.
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.nfkc().collect::<String>().to_lowercase();
    RE.find_iter(&lowered).map(|m| m.as_str().to_string()).collect()
}

fn is_url(token: &str) -> bool {
    token.starts_with("http://") || token.starts_with("https://")
}

fn is_alphabetic(token: &str) -> bool {
    !token.is_empty() && token.chars().all(char::is_alphabetic)
}

/// Text-to-terms pipeline: tokenize, drop URLs and non-alphabetic tokens,
/// split long tokens, drop stopwords, stem.
///
/// Stemming is Snowball English (Porter2) from `rust-stemmers`.
#[derive(Clone)]
pub struct Normalizer {
    stopwords: HashSet<String>,
    segmenter: Arc<Segmenter>,
    stemmer: Arc<Stemmer>,
}

impl fmt::Debug for Normalizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Normalizer")
            .field("custom_stopwords", &self.stopwords.len())
            .field("segmenter_words", &self.segmenter.len())
            .finish()
    }
}

impl Default for Normalizer {
    fn default() -> Self { Self::new(std::iter::empty::<String>()) }
}

impl Normalizer {
    /// `custom_stopwords` are used in addition to the built-in English list.
    pub fn new<I, S>(custom_stopwords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::with_segmenter(custom_stopwords, Segmenter::english())
    }

    pub fn with_segmenter<I, S>(custom_stopwords: I, segmenter: Arc<Segmenter>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let stopwords = custom_stopwords
            .into_iter()
            .map(|s| s.as_ref().trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect();
        Self { stopwords, segmenter, stemmer: Arc::new(Stemmer::create(Algorithm::English)) }
    }

    pub fn is_stopword(&self, token: &str) -> bool {
        is_builtin_stopword(token) || self.stopwords.contains(token)
    }

    /// NFKC-fold, lowercase, then stem a single word, with no other filtering.
    pub fn stem(&self, word: &str) -> String {
        let folded = word.nfkc().collect::<String>().to_lowercase();
        self.stemmer.stem(&folded).into_owned()
    }

    /// Normalize raw text into index terms, preserving order and duplicates.
    pub fn normalize(&self, text: &str) -> Vec<String> {
        let mut kept = Vec::new();
        for token in tokenize(text) {
            if is_url(&token) || !is_alphabetic(&token) { continue; }
            if token.chars().count() > MAX_TOKEN_CHARS {
                kept.extend(self.segmenter.split(&token));
            } else {
                kept.push(token);
            }
        }
        kept.into_iter()
            .filter(|t| !self.is_stopword(t))
            .map(|t| self.stemmer.stem(&t).into_owned())
            .collect()
    }
}

/// One-shot form of [`Normalizer::normalize`].
pub fn normalize<S: AsRef<str>>(text: &str, stopwords: &[S]) -> Vec<String> {
    Normalizer::new(stopwords).normalize(text)
}
