//! Payload checks applied before a record is written.

use serde_json::Value;

use crate::error::CoreError;
use crate::types::Row;

/// JSON truthiness: `null`, `false`, `0`, and `""` are falsy; everything
/// else (including empty arrays and objects) is truthy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Every entry of `required` that is absent or falsy in `data`, in order.
pub fn missing_required_fields<'a>(data: &Row, required: &[&'a str]) -> Vec<&'a str> {
    required
        .iter()
        .copied()
        .filter(|field| !data.get(*field).is_some_and(is_truthy))
        .collect()
}

/// Fail with one message naming all missing fields.
pub fn require_fields(data: &Row, required: &[&str]) -> Result<(), CoreError> {
    let missing = missing_required_fields(data, required);
    if missing.is_empty() {
        Ok(())
    } else {
        Err(CoreError::missing_fields(&missing))
    }
}
