//! Internal helpers for boundary coercion of loosely typed payloads.
//!
//! These utilities are **not** part of the public API. They turn a raw JSON
//! object into the typed `*Input` structs, coercing numbers the way the
//! stored documents and command line hand them over (numbers or numeric
//! strings).

use serde_json::{Map, Value};

use crate::{EngineError, ResultEngine, store};

pub(crate) fn object(value: &Value) -> ResultEngine<&Map<String, Value>> {
    value
        .as_object()
        .ok_or_else(|| EngineError::validation("formato inválido"))
}

/// Text value of `field`; numbers are stringified, anything else is empty.
pub(crate) fn text_field(map: &Map<String, Value>, field: &str) -> String {
    match map.get(field) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

/// Float value of `field`. Missing or null counts as 0.
pub(crate) fn float_field(map: &Map<String, Value>, field: &str) -> ResultEngine<f64> {
    let not_numeric = || EngineError::validation(format!("{field} debe ser numérico"));
    match map.get(field) {
        None | Some(Value::Null) => Ok(0.0),
        Some(Value::Number(n)) => n.as_f64().ok_or_else(not_numeric),
        Some(Value::String(s)) => s.trim().parse::<f64>().map_err(|_| not_numeric()),
        Some(_) => Err(not_numeric()),
    }
}

/// Integer value of `text`. Decimal text truncates (`"30.9"` is 30).
pub(crate) fn parse_int(text: &str) -> Option<i64> {
    let text = text.trim();
    text.parse::<i64>().ok().or_else(|| {
        text.parse::<f64>()
            .ok()
            .filter(|f| f.is_finite() && f.abs() < i64::MAX as f64)
            .map(|f| f.trunc() as i64)
    })
}

/// Caller supplied id, if any and non empty.
pub(crate) fn optional_id(map: &Map<String, Value>) -> Option<String> {
    map.get(store::ID_FIELD)
        .and_then(store::id_string)
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn float_field_coerces_strings_and_defaults_to_zero() {
        let value = json!({"a": "12.5", "b": 3, "c": null, "d": true, "e": "x"});
        let map = object(&value).unwrap();
        assert_eq!(float_field(map, "a").unwrap(), 12.5);
        assert_eq!(float_field(map, "b").unwrap(), 3.0);
        assert_eq!(float_field(map, "c").unwrap(), 0.0);
        assert_eq!(float_field(map, "missing").unwrap(), 0.0);
        assert_eq!(
            float_field(map, "d").unwrap_err().to_string(),
            "d debe ser numérico"
        );
        assert!(float_field(map, "e").is_err());
    }

    #[test]
    fn parse_int_truncates_decimals() {
        assert_eq!(parse_int(" 28 "), Some(28));
        assert_eq!(parse_int("30.9"), Some(30));
        assert_eq!(parse_int("-3"), Some(-3));
        assert_eq!(parse_int("diez"), None);
        assert_eq!(parse_int(""), None);
        assert_eq!(parse_int("inf"), None);
    }

    #[test]
    fn non_objects_are_rejected() {
        assert_eq!(
            object(&json!([1, 2])).unwrap_err().to_string(),
            "formato inválido"
        );
    }

    #[test]
    fn optional_id_ignores_blank_values() {
        let value = json!({"id": "  "});
        assert_eq!(optional_id(object(&value).unwrap()), None);
        let value = json!({"id": 4});
        assert_eq!(optional_id(object(&value).unwrap()), Some("4".to_string()));
    }
}
