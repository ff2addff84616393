//! API Lambda handler - routes the two read operations.
//!
//! - `GET /` or `/recent`: newest entries, paged with `page`
//! - `GET /search?q=...`: entries whose title contains `q`

use lambda_runtime::{Error, LambdaEvent};
use serde_json::{Value, json};
use tracing::{error, info};
use uuid::Uuid;

use super::{helpers, parsing};
use crate::core::config::AppConfig;
use crate::features::{Aggregator, build_aggregator};

pub use self::function_handler as handler;

/// Lambda handler for the API entrypoint.
///
/// # Errors
///
/// Returns an error when configuration cannot be loaded or the HTTP clients
/// cannot be built; request-level problems become 4xx responses.
#[tracing::instrument(level = "info", skip(event))]
pub async fn function_handler(event: LambdaEvent<Value>) -> Result<Value, Error> {
    let config = AppConfig::from_env().map_err(|e| {
        error!("Config error: {}", e);
        Error::from(e)
    })?;

    let aggregator = build_aggregator(&config).map_err(|e| {
        error!("Failed to build aggregator: {}", e);
        Error::from(e)
    })?;

    Ok(route(&aggregator, config.per_page, &event.payload).await)
}

/// Dispatch one API Gateway event to the matching operation.
pub async fn route(aggregator: &Aggregator, per_page: usize, payload: &Value) -> Value {
    let request_id = Uuid::new_v4();
    let path = parsing::request_path(payload);
    let method = parsing::request_method(payload);
    info!(request_id = %request_id, path = %path, method = %method, "API request");

    if method != "GET" {
        return helpers::err_response(405, "Method not allowed");
    }

    match path.trim_end_matches('/') {
        "" | "/recent" => recent(aggregator, per_page, payload).await,
        "/search" => search(aggregator, payload).await,
        other => {
            info!(request_id = %request_id, path = %other, "No route");
            helpers::err_response(404, "Not found")
        }
    }
}

async fn recent(aggregator: &Aggregator, per_page: usize, payload: &Value) -> Value {
    let page = parsing::parse_page(parsing::query_param(payload, "page").as_deref());
    let listing = aggregator.list_recent(page, per_page).await;

    helpers::json_response(
        200,
        &json!({
            "page": listing.page,
            "per_page": listing.per_page,
            "total_pages": listing.total_pages,
            "total_articles": listing.total_entries,
            "articles": helpers::articles_json(&listing.entries),
        }),
    )
}

async fn search(aggregator: &Aggregator, payload: &Value) -> Value {
    let Some(query) = parsing::query_param(payload, "q") else {
        return helpers::err_response(400, "Missing query parameter 'q'");
    };

    let matches = aggregator.search(&query).await;

    helpers::json_response(
        200,
        &json!({
            "query": query,
            "count": matches.len(),
            "articles": helpers::articles_json(&matches),
        }),
    )
}
