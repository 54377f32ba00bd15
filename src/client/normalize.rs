//! Turns whatever JSON a webhook sends back into one display string.
//!
//! Automation webhooks answer in a few shapes: nothing at all, a single
//! object, or an array of items. The reply text can live under any of four
//! field names, and the lookup order depends on the shape.

use serde_json::Value;

/// Shown when the webhook answered with an empty body.
pub const EMPTY_REPLY_TEXT: &str = "Webhook triggered successfully (no response data)";

/// Lookup order for the first item of an array reply.
pub const ARRAY_ITEM_FIELDS: [&str; 4] = ["text", "response", "message", "output"];

/// Lookup order for a single object reply.
pub const OBJECT_FIELDS: [&str; 4] = ["response", "message", "output", "text"];

#[derive(Debug, thiserror::Error)]
pub enum DisplayTextError {
    #[error("reply is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("reply is null")]
    Null,
}

pub fn extract_display_text(raw: &str) -> Result<String, DisplayTextError> {
    if raw.is_empty() {
        return Ok(EMPTY_REPLY_TEXT.to_string());
    }

    let data: Value = serde_json::from_str(raw)?;
    if data.is_null() {
        return Err(DisplayTextError::Null);
    }

    if let Value::Array(items) = &data
        && let Some(first) = items.first()
    {
        if first.is_null() {
            return Err(DisplayTextError::Null);
        }
        return Ok(first_present(first, &ARRAY_ITEM_FIELDS).unwrap_or_else(|| first.to_string()));
    }

    Ok(first_present(&data, &OBJECT_FIELDS).unwrap_or_else(|| data.to_string()))
}

/// First field in `fields` holding a non-blank value. `null`, `false`, `0`
/// and `""` count as absent.
fn first_present(value: &Value, fields: &[&str]) -> Option<String> {
    let object = value.as_object()?;
    fields
        .iter()
        .filter_map(|field| object.get(*field))
        .find(|candidate| is_present(candidate))
        .map(display)
}

fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn display(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
