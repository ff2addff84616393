//! Response builders for the API handler.

use serde_json::{Value, json};

use crate::core::models::ResolvedEntry;

/// Returns a response with a JSON body and the given status code.
#[must_use]
pub fn json_response(status_code: u16, body: &Value) -> Value {
    json!({
        "statusCode": status_code,
        "headers": { "Content-Type": "application/json" },
        "body": body.to_string()
    })
}

/// Returns an error response with the given status code and message.
#[must_use]
pub fn err_response(status_code: u16, message: &str) -> Value {
    json_response(status_code, &json!({ "error": message }))
}

/// Public JSON shape of one article.
#[must_use]
pub fn article_json(resolved: &ResolvedEntry) -> Value {
    json!({
        "source": resolved.source_name,
        "title": resolved.entry.title,
        "link": resolved.entry.link,
        "published_at": resolved.entry.published_at.map(|at| at.to_rfc3339()),
        "summary": resolved.summary,
        "summary_source": resolved.summary_source,
    })
}

#[must_use]
pub fn articles_json(entries: &[ResolvedEntry]) -> Vec<Value> {
    entries.iter().map(article_json).collect()
}
