use serde_json::Value;

/// Request path from an API Gateway event (`rawPath` for HTTP APIs, `path` for REST).
pub fn request_path(payload: &Value) -> &str {
    payload
        .get("rawPath")
        .and_then(|v| v.as_str())
        .or_else(|| payload.get("path").and_then(|v| v.as_str()))
        .unwrap_or("/")
}

/// HTTP method of the request, upper-cased. Defaults to `GET` when absent.
pub fn request_method(payload: &Value) -> String {
    payload
        .pointer("/requestContext/http/method")
        .or_else(|| payload.get("httpMethod"))
        .and_then(|v| v.as_str())
        .unwrap_or("GET")
        .to_ascii_uppercase()
}

/// Look up a query parameter, preferring the decoded `queryStringParameters`
/// map and falling back to `rawQueryString`.
pub fn query_param(payload: &Value, name: &str) -> Option<String> {
    if let Some(value) = payload
        .get("queryStringParameters")
        .and_then(|params| params.get(name))
        .and_then(|v| v.as_str())
    {
        return Some(value.to_string());
    }

    let raw = payload.get("rawQueryString").and_then(|q| q.as_str())?;
    raw.split('&').find_map(|pair| {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        (decode_component(key) == name).then(|| decode_component(value))
    })
}

fn decode_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    urlencoding::decode(&spaced)
        .map(|s| s.into_owned())
        .unwrap_or(spaced)
}

/// Page number from a raw query value: unparsable means 1, below 1 is clamped to 1.
#[must_use]
pub fn parse_page(raw: Option<&str>) -> usize {
    raw.and_then(|s| s.trim().parse::<i64>().ok())
        .map_or(1, |page| usize::try_from(page.max(1)).unwrap_or(1))
}
