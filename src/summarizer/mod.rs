//! Extractive summarization
//!
//! Picks the most central sentences of a text with LexRank and returns them
//! in their original order.

pub mod language;
pub mod lexrank;
pub mod stopwords;
pub mod tokenizer;

use tracing::debug;

use crate::errors::BriefError;

use self::language::Language;
use self::lexrank::LexRank;
use self::tokenizer::{TermNormalizer, split_sentences};

/// Below this many words a text carries too little signal to rank.
pub const MIN_WORDS: usize = 20;

#[derive(Debug, Clone)]
pub struct SummarizerConfig {
    pub language: String,
    pub sentence_count: usize,
    pub min_words: usize,
    pub similarity_threshold: f64,
    pub damping: f64,
    pub max_iterations: usize,
    pub convergence: f64,
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        let ranker = LexRank::default();
        Self {
            language: "english".to_string(),
            sentence_count: 3,
            min_words: MIN_WORDS,
            similarity_threshold: ranker.threshold,
            damping: ranker.damping,
            max_iterations: ranker.max_iterations,
            convergence: ranker.convergence,
        }
    }
}

pub struct Summarizer {
    sentence_count: usize,
    min_words: usize,
    normalizer: TermNormalizer,
    ranker: LexRank,
}

impl Summarizer {
    pub fn new(config: &SummarizerConfig) -> Result<Self, BriefError> {
        let language = Language::from_name(&config.language).ok_or_else(|| {
            BriefError::ConfigError(format!("unsupported language '{}'", config.language))
        })?;

        if config.sentence_count == 0 {
            return Err(BriefError::ConfigError(
                "sentence_count must be positive".to_string(),
            ));
        }

        Ok(Self {
            sentence_count: config.sentence_count,
            min_words: config.min_words,
            normalizer: TermNormalizer::new(language),
            ranker: LexRank {
                threshold: config.similarity_threshold,
                damping: config.damping,
                max_iterations: config.max_iterations,
                convergence: config.convergence,
            },
        })
    }

    /// Summarize `text` into at most `sentence_count` sentences.
    ///
    /// # Errors
    ///
    /// Returns `SummarizationError` when the text has fewer than `min_words`
    /// words, contains no sentences, or ranking yields no usable scores.
    pub fn summarize(&self, text: &str) -> Result<String, BriefError> {
        let words = word_count(text);
        if words < self.min_words {
            return Err(BriefError::SummarizationError(format!(
                "text has {} words, need at least {}",
                words, self.min_words
            )));
        }

        let sentences = split_sentences(text);
        if sentences.is_empty() {
            return Err(BriefError::SummarizationError(
                "no sentences found".to_string(),
            ));
        }

        let terms: Vec<Vec<String>> = sentences
            .iter()
            .map(|sentence| self.normalizer.terms(sentence))
            .collect();

        let ranking = self.ranker.rank(&terms);
        debug!(
            sentences = sentences.len(),
            iterations = ranking.iterations,
            converged = ranking.converged,
            "Ranked sentences"
        );
        if ranking.scores.len() != sentences.len()
            || ranking.scores.iter().any(|score| !score.is_finite())
        {
            return Err(BriefError::SummarizationError(
                "sentence ranking produced no usable scores".to_string(),
            ));
        }

        let summary = ranking
            .top_in_document_order(self.sentence_count)
            .into_iter()
            .map(|index| sentences[index].as_str())
            .collect::<Vec<_>>()
            .join(" ");

        if summary.is_empty() {
            return Err(BriefError::SummarizationError(
                "summary came out empty".to_string(),
            ));
        }

        Ok(summary)
    }
}

/// Whitespace-separated word count.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    const ARTICLE: &str = "The central bank raised interest rates by a quarter point on Wednesday. \
        Officials said inflation remained well above the bank's target. \
        A local football team won its match in overtime. \
        Higher interest rates are expected to cool inflation over the coming year. \
        Markets had widely expected the bank to raise rates this week.";

    fn summarizer(sentence_count: usize) -> Summarizer {
        Summarizer::new(&SummarizerConfig {
            sentence_count,
            ..SummarizerConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn rejects_short_text() {
        let err = summarizer(3).summarize("Too short to rank.").unwrap_err();
        assert!(matches!(err, BriefError::SummarizationError(_)));
    }

    #[test]
    fn returns_requested_number_of_sentences_in_order() {
        let summary = summarizer(2).summarize(ARTICLE).unwrap();

        let picked = split_sentences(&summary);
        assert_eq!(picked.len(), 2);

        let all = split_sentences(ARTICLE);
        let positions: Vec<usize> = picked
            .iter()
            .map(|s| all.iter().position(|a| a == s).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn most_connected_sentence_wins() {
        let text = "Volcano eruption forced lava evacuation. \
            Volcano lava reached the village. \
            Eruption ash covered the village. \
            Evacuation buses departed overnight. \
            Football stadium crowds cheered loudly.";
        let summary = summarizer(1).summarize(text).unwrap();
        assert_eq!(summary, "Volcano eruption forced lava evacuation.");
    }

    #[test]
    fn short_documents_return_every_sentence() {
        let text = "Rates rose again today across the country. \
            Lenders said mortgage rates will stay high for the rest of the year and beyond.";
        let summary = summarizer(3).summarize(text).unwrap();
        assert_eq!(summary, text.split_whitespace().collect::<Vec<_>>().join(" "));
    }

    #[test]
    fn unknown_language_is_a_config_error() {
        let result = Summarizer::new(&SummarizerConfig {
            language: "klingon".to_string(),
            ..SummarizerConfig::default()
        });
        assert!(matches!(result, Err(BriefError::ConfigError(_))));
    }
}
