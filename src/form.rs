use serde::{Deserialize, Deserializer};
use serde_json::map::Entry;
use serde_json::{Map, Value};

use crate::company::hydration::parse_flag;

/// Parse a request body into a flat key-value object based on Content-Type.
///
/// Repeated urlencoded keys (and `key[]` keys) are collected into arrays.
pub fn parse_body(content_type: Option<&str>, body: &[u8]) -> Result<Map<String, Value>, String> {
    let ct = content_type.unwrap_or("application/json");

    let value = if ct.contains("application/x-www-form-urlencoded") {
        parse_form_urlencoded(body)?
    } else {
        serde_json::from_slice(body).map_err(|e| format!("Invalid JSON: {e}"))?
    };

    match value {
        Value::Object(map) => Ok(map),
        _ => Err("Expected an object".to_string()),
    }
}

fn parse_form_urlencoded(body: &[u8]) -> Result<Value, String> {
    let body_str = std::str::from_utf8(body).map_err(|e| format!("Invalid UTF-8: {e}"))?;

    let mut map = Map::new();
    for (key, value) in form_urlencoded::parse(body_str.as_bytes()) {
        let mut key = key.into_owned();
        let is_list = key.ends_with("[]");
        if is_list {
            key.truncate(key.len() - 2);
        }
        let value = Value::String(value.into_owned());

        match map.entry(key) {
            Entry::Occupied(mut slot) => match slot.get_mut() {
                Value::Array(items) => items.push(value),
                existing => {
                    let first = existing.take();
                    *existing = Value::Array(vec![first, value]);
                }
            },
            Entry::Vacant(slot) => {
                slot.insert(if is_list { Value::Array(vec![value]) } else { value });
            }
        }
    }
    Ok(Value::Object(map))
}

/// Deserialize an optional boolean from JSON booleans or form checkbox strings.
/// Unrecognized values deserialize to `None`.
pub fn optional_flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(parse_flag(&value))
}
