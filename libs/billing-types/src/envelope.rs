use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Pagination metadata carried next to list payloads.
///
/// Every field is optional: the platform API sends `{total, page, total_pages}`,
/// Stripe-style list objects only carry `has_more`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageMeta {
    pub total: Option<u64>,
    pub page: Option<u64>,
    pub total_pages: Option<u64>,
    pub per_page: Option<u64>,
    pub has_more: Option<bool>,
}

/// Returns true when the body explicitly reports `success: false`.
pub fn is_failure(body: &Value) -> bool {
    body.get("success").and_then(Value::as_bool) == Some(false)
}

/// Extracts the list rows and pagination metadata from a response body.
///
/// Accepted shapes, in order:
/// - `{"data": [...]}`
/// - `{"data": {"items": [...]}}` or `{"data": {"data": [...]}}`
/// - `{"items": [...]}`
/// - a bare `[...]`
///
/// Anything else, including a missing `data`, yields no rows.
pub fn unwrap_items(body: &Value) -> (Vec<Value>, Option<PageMeta>) {
    let meta = page_meta(body);
    let items = match body {
        Value::Array(items) => items.clone(),
        Value::Object(map) => match map.get("data") {
            Some(Value::Array(items)) => items.clone(),
            Some(Value::Object(inner)) => inner
                .get("items")
                .or_else(|| inner.get("data"))
                .and_then(Value::as_array)
                .cloned()
                .unwrap_or_default(),
            _ => map
                .get("items")
                .and_then(Value::as_array)
                .cloned()
                .unwrap_or_default(),
        },
        _ => Vec::new(),
    };
    (items, meta)
}

/// Extracts a single object from a response body.
///
/// An enveloped body yields its `data` object; a body without envelope keys is
/// taken as the object itself.
pub fn unwrap_object(body: &Value) -> Option<Value> {
    let map = body.as_object()?;
    match map.get("data") {
        Some(Value::Object(inner)) => Some(Value::Object(inner.clone())),
        Some(_) => None,
        None if is_enveloped(map) => None,
        None => Some(body.clone()),
    }
}

/// Best human-readable error message carried by a body.
pub fn error_message(body: &Value) -> Option<String> {
    let map = body.as_object()?;

    if let Some(message) = map.get("message").and_then(Value::as_str)
        && !message.trim().is_empty()
    {
        return Some(message.to_string());
    }

    match map.get("error") {
        Some(Value::String(message)) if !message.trim().is_empty() => {
            return Some(message.clone());
        }
        Some(Value::Object(error)) => {
            if let Some(message) = error.get("message").and_then(Value::as_str) {
                return Some(message.to_string());
            }
        }
        _ => {}
    }

    let parts = map.get("errors").map(collect_strings).unwrap_or_default();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join("; "))
    }
}

fn is_enveloped(map: &Map<String, Value>) -> bool {
    map.contains_key("success") || map.contains_key("meta")
}

fn page_meta(body: &Value) -> Option<PageMeta> {
    let map = body.as_object()?;
    let parse = |value: &Value| serde_json::from_value::<PageMeta>(value.clone()).ok();

    if let Some(meta) = map.get("meta").and_then(parse) {
        return Some(meta);
    }
    if let Some(data) = map.get("data").and_then(Value::as_object) {
        if let Some(meta) = data.get("meta").and_then(parse) {
            return Some(meta);
        }
        if let Some(meta) = list_object_meta(data) {
            return Some(meta);
        }
    }
    list_object_meta(map)
}

fn list_object_meta(map: &Map<String, Value>) -> Option<PageMeta> {
    let has_more = map.get("has_more").and_then(Value::as_bool);
    let total = map.get("total_count").and_then(Value::as_u64);
    if has_more.is_none() && total.is_none() {
        return None;
    }
    Some(PageMeta {
        total,
        has_more,
        ..PageMeta::default()
    })
}

fn collect_strings(value: &Value) -> Vec<String> {
    match value {
        Value::String(s) => vec![s.clone()],
        Value::Array(values) => values.iter().flat_map(collect_strings).collect(),
        Value::Object(map) => map.values().flat_map(collect_strings).collect(),
        _ => Vec::new(),
    }
}
