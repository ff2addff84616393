//! Sentence splitting and term normalization.
//!
//! Paragraphs are separated by blank lines. Within a paragraph a sentence ends
//! at `.`, `!` or `?` (plus any closing quotes or brackets) followed by
//! whitespace and something that can start a sentence. A trailing period on a
//! known abbreviation or a single-letter initial is not a boundary.

use once_cell::sync::Lazy;
use regex::Regex;
use rust_stemmers::Stemmer;

use super::language::Language;
use super::stopwords::StopwordFilter;

static PARAGRAPH_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n[ \t\r]*\n").expect("static regex compile"));

static BOUNDARY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"[.!?]+["'”’)\]]*\s+"#).expect("static regex compile"));

static WORD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\W\d_](?:[^\W\d_]|['’-])*").expect("static regex compile"));

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("static regex compile"));

const ABBREVIATIONS: &[&str] = &[
    "mr", "mrs", "ms", "dr", "prof", "sr", "jr", "st", "vs", "mt", "gen", "gov", "sen", "rep",
    "lt", "col", "capt", "sgt", "fig", "approx", "dept", "est", "e.g", "i.e", "u.s",
    "u.k", "u.n", "a.m", "p.m", "jan", "feb", "mar", "apr", "jun", "jul", "aug", "sep", "sept",
    "oct", "nov", "dec",
];

/// Split plain text into sentences with internal whitespace collapsed.
pub fn split_sentences(text: &str) -> Vec<String> {
    PARAGRAPH_RE
        .split(text)
        .flat_map(split_paragraph)
        .collect()
}

fn split_paragraph(paragraph: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut start = 0;

    for boundary in BOUNDARY_RE.find_iter(paragraph) {
        let next = paragraph[boundary.end()..].chars().next();
        if !next.is_some_and(can_start_sentence) {
            continue;
        }

        let punctuation_is_period = boundary.as_str().starts_with('.')
            && !boundary.as_str().starts_with("..");
        if punctuation_is_period
            && ends_with_abbreviation(&paragraph[start..boundary.start()], next)
        {
            continue;
        }

        push_sentence(&mut sentences, &paragraph[start..boundary.end()]);
        start = boundary.end();
    }

    push_sentence(&mut sentences, &paragraph[start..]);
    sentences
}

fn push_sentence(sentences: &mut Vec<String>, raw: &str) {
    let collapsed = collapse_whitespace(raw);
    if !collapsed.is_empty() {
        sentences.push(collapsed);
    }
}

fn can_start_sentence(c: char) -> bool {
    c.is_uppercase() || c.is_ascii_digit() || matches!(c, '"' | '\'' | '“' | '‘' | '(' | '[')
}

/// `next` is the first character after the boundary whitespace.
fn ends_with_abbreviation(before_period: &str, next: Option<char>) -> bool {
    let Some(last) = before_period.split_whitespace().last() else {
        return false;
    };
    let trimmed = last.trim_start_matches(|c: char| !c.is_alphanumeric());

    let mut letters = trimmed.chars();
    if let (Some(initial), None) = (letters.next(), letters.next()) {
        return initial.is_uppercase();
    }

    let word = trimmed.to_lowercase();
    // "No. 5" but not "voted no. Shares".
    if word == "no" {
        return next.is_some_and(|c| c.is_ascii_digit());
    }
    ABBREVIATIONS.contains(&word.as_str())
}

/// Replace every whitespace run with a single space and trim the ends.
pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_RE.replace_all(text, " ").trim().to_string()
}

/// Word tokens of a sentence, in order, as they appear in the text.
pub fn words(sentence: &str) -> impl Iterator<Item = &str> {
    WORD_RE.find_iter(sentence).map(|m| m.as_str())
}

/// Turns sentences into stemmed, stop-word-free terms for one language.
pub struct TermNormalizer {
    stemmer: Stemmer,
    stopwords: StopwordFilter,
}

impl TermNormalizer {
    pub fn new(language: Language) -> Self {
        Self {
            stemmer: Stemmer::create(language.stemmer_algorithm()),
            stopwords: StopwordFilter::new(language),
        }
    }

    pub fn terms(&self, sentence: &str) -> Vec<String> {
        words(sentence)
            .map(str::to_lowercase)
            .filter(|word| !self.stopwords.is_stopword(word))
            .map(|word| self.stemmer.stem(&word).into_owned())
            .collect()
    }
}
