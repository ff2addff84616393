//! Stop-word filtering backed by the `stop-words` crate.

use rustc_hash::FxHashSet;
use stop_words::get;

use super::language::Language;

/// Lower-cased stop words for one language.
#[derive(Debug, Clone)]
pub struct StopwordFilter {
    stopwords: FxHashSet<String>,
}

impl StopwordFilter {
    pub fn new(language: Language) -> Self {
        let stopwords = get(language.stopword_list())
            .iter()
            .map(|s| s.to_lowercase())
            .collect();
        Self { stopwords }
    }

    /// `word` is expected to be lower-cased already.
    pub fn is_stopword(&self, word: &str) -> bool {
        self.stopwords.contains(word)
    }
}
