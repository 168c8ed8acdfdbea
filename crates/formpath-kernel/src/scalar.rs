//! Text view over scalar leaves.

use serde_json::Value;
use std::borrow::Cow;

/// The text a scalar presents to matching rules.
///
/// Strings are themselves, numbers and booleans render as JSON text, and
/// `null` is empty. Containers have no scalar text and render empty.
pub fn scalar_text(value: &Value) -> Cow<'_, str> {
    match value {
        Value::String(s) => Cow::Borrowed(s.as_str()),
        Value::Number(n) => Cow::Owned(n.to_string()),
        Value::Bool(b) => Cow::Borrowed(if *b { "true" } else { "false" }),
        Value::Null | Value::Array(_) | Value::Object(_) => Cow::Borrowed(""),
    }
}

/// Whether a scalar's text trims to nothing.
pub fn is_blank(value: &Value) -> bool {
    scalar_text(value).trim().is_empty()
}

/// Boolean-as-string flags such as `isRequired`.
pub fn is_truthy_flag(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::String(s) => s.trim().eq_ignore_ascii_case("true"),
        _ => false,
    }
}
