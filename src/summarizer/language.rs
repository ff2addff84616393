//! Languages with both a Snowball stemmer and a stop-word list.

use rust_stemmers::Algorithm;
use stop_words::LANGUAGE;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Arabic,
    Danish,
    Dutch,
    English,
    Finnish,
    French,
    German,
    Hungarian,
    Italian,
    Norwegian,
    Portuguese,
    Russian,
    Spanish,
    Swedish,
    Turkish,
}

impl Language {
    /// Resolve a language from its English name or ISO 639-1 code.
    pub fn from_name(name: &str) -> Option<Self> {
        let lang = match name.trim().to_lowercase().as_str() {
            "ar" | "arabic" => Language::Arabic,
            "da" | "danish" => Language::Danish,
            "nl" | "dutch" => Language::Dutch,
            "en" | "english" => Language::English,
            "fi" | "finnish" => Language::Finnish,
            "fr" | "french" => Language::French,
            "de" | "german" => Language::German,
            "hu" | "hungarian" => Language::Hungarian,
            "it" | "italian" => Language::Italian,
            "no" | "norwegian" => Language::Norwegian,
            "pt" | "portuguese" => Language::Portuguese,
            "ru" | "russian" => Language::Russian,
            "es" | "spanish" => Language::Spanish,
            "sv" | "swedish" => Language::Swedish,
            "tr" | "turkish" => Language::Turkish,
            _ => return None,
        };
        Some(lang)
    }

    pub fn stemmer_algorithm(self) -> Algorithm {
        match self {
            Language::Arabic => Algorithm::Arabic,
            Language::Danish => Algorithm::Danish,
            Language::Dutch => Algorithm::Dutch,
            Language::English => Algorithm::English,
            Language::Finnish => Algorithm::Finnish,
            Language::French => Algorithm::French,
            Language::German => Algorithm::German,
            Language::Hungarian => Algorithm::Hungarian,
            Language::Italian => Algorithm::Italian,
            Language::Norwegian => Algorithm::Norwegian,
            Language::Portuguese => Algorithm::Portuguese,
            Language::Russian => Algorithm::Russian,
            Language::Spanish => Algorithm::Spanish,
            Language::Swedish => Algorithm::Swedish,
            Language::Turkish => Algorithm::Turkish,
        }
    }

    pub fn stopword_list(self) -> LANGUAGE {
        match self {
            Language::Arabic => LANGUAGE::Arabic,
            Language::Danish => LANGUAGE::Danish,
            Language::Dutch => LANGUAGE::Dutch,
            Language::English => LANGUAGE::English,
            Language::Finnish => LANGUAGE::Finnish,
            Language::French => LANGUAGE::French,
            Language::German => LANGUAGE::German,
            Language::Hungarian => LANGUAGE::Hungarian,
            Language::Italian => LANGUAGE::Italian,
            Language::Norwegian => LANGUAGE::Norwegian,
            Language::Portuguese => LANGUAGE::Portuguese,
            Language::Russian => LANGUAGE::Russian,
            Language::Spanish => LANGUAGE::Spanish,
            Language::Swedish => LANGUAGE::Swedish,
            Language::Turkish => LANGUAGE::Turkish,
        }
    }
}
