//! HTML to plain text.
//!
//! Article pages are parsed with html5ever (via `scraper`), boilerplate
//! subtrees are ignored, and substantial paragraphs are preferred over a full
//! page text dump.

use scraper::{ElementRef, Html, Selector};

use crate::errors::BriefError;
use crate::summarizer::tokenizer::collapse_whitespace;

/// Elements whose whole subtree is ignored during extraction.
const BOILERPLATE_TAGS: &[&str] = &["script", "style", "noscript", "header", "footer", "nav"];

/// A paragraph must be longer than this (in characters, after trimming) to count.
pub const MIN_PARAGRAPH_CHARS: usize = 50;

/// Extract readable article text from an HTML document.
///
/// Paragraphs longer than [`MIN_PARAGRAPH_CHARS`] are joined with single
/// spaces. When none qualify, all visible text of the cleaned document is
/// returned with whitespace collapsed.
///
/// # Errors
///
/// Returns `ExtractionError` when the cleaned document has no text at all.
pub fn extract_article_text(html: &str) -> Result<String, BriefError> {
    let document = Html::parse_document(html);

    let paragraphs = substantial_paragraphs(&document);
    if !paragraphs.is_empty() {
        return Ok(paragraphs.join(" "));
    }

    let mut text = String::new();
    visible_text(document.root_element(), &mut text);
    let text = collapse_whitespace(&text);

    if text.is_empty() {
        return Err(BriefError::ExtractionError(
            "document is empty after removing boilerplate".to_string(),
        ));
    }
    Ok(text)
}

/// Remove markup and keep every text node, in document order.
#[must_use]
pub fn strip_tags(html: &str) -> String {
    Html::parse_fragment(html)
        .root_element()
        .text()
        .collect()
}

fn substantial_paragraphs(document: &Html) -> Vec<String> {
    let Ok(selector) = Selector::parse("p") else {
        return Vec::new();
    };

    document
        .select(&selector)
        .filter(|p| !inside_boilerplate(*p))
        .filter_map(|p| {
            let mut text = String::new();
            visible_text(p, &mut text);
            let text = text.trim();
            (text.chars().count() > MIN_PARAGRAPH_CHARS).then(|| text.to_string())
        })
        .collect()
}

fn is_boilerplate(element: ElementRef<'_>) -> bool {
    BOILERPLATE_TAGS.contains(&element.value().name())
}

fn inside_boilerplate(element: ElementRef<'_>) -> bool {
    element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .any(is_boilerplate)
}

/// Append the text under `element`, skipping boilerplate subtrees.
fn visible_text(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            out.push_str(text);
        } else if let Some(child) = ElementRef::wrap(child)
            && !is_boilerplate(child)
        {
            visible_text(child, out);
        }
    }
}
