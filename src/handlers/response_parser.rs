use log::{debug, warn};
use serde_json::Value;

use crate::config::MalformedItemPolicy;
use crate::error::{AppError, Result};
use crate::models::{CatalogItem, CatalogKind, SearchResult};

/// Decodes a response body. The top level must be a JSON object.
pub fn decode_response(body: &str) -> Result<Value> {
    let value: Value = serde_json::from_str(body)?;
    if value.is_object() {
        Ok(value)
    } else {
        Err(AppError::UnexpectedShape(format!(
            "expected a JSON object, got {}",
            json_type_name(&value)
        )))
    }
}

/// Turns the `results` array into records, in response order.
///
/// A missing or non-array `results` is an empty result set. Elements that are
/// not objects, or that match no known variant, contribute nothing. A known
/// variant with a missing mandatory field is handled according to `policy`.
pub fn parse_response(response: &Value, policy: MalformedItemPolicy) -> Result<Vec<SearchResult>> {
    let items = match response.get("results").and_then(Value::as_array) {
        Some(items) => items,
        None => {
            debug!("Response has no results array");
            return Ok(Vec::new());
        }
    };

    let mut results = Vec::with_capacity(items.len());
    for (position, item) in items.iter().enumerate() {
        if !item.is_object() {
            continue;
        }

        let Some(kind) = CatalogKind::classify(item) else {
            debug!("Skipping unrecognized item at position {}", position);
            continue;
        };

        match CatalogItem::from_value(kind, item) {
            Ok(parsed) => results.push(parsed.into_result()),
            Err(e) => match policy {
                MalformedItemPolicy::Skip => {
                    warn!("Skipping item at position {}: {}", position, e);
                }
                MalformedItemPolicy::Abort => return Err(e),
            },
        }
    }

    Ok(results)
}

/// Like [`parse_response`] with malformed items skipped; never fails.
pub fn parse_results(response: &Value) -> Vec<SearchResult> {
    parse_response(response, MalformedItemPolicy::Skip).unwrap_or_default()
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
