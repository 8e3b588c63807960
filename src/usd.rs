//! Deriving a USD amount from provider records whose schemas differ.
//!
//! Each provider supplies an ordered list of extractors. The first one that
//! yields a number wins, so the fallback policy reads as a plain slice.

use serde_json::Value;

/// Pull a USD amount out of one record, or `None` when the field is absent/null.
pub type UsdExtractor = fn(&Value) -> Option<f64>;

/// Try `extractors` in order, returning the first amount found.
pub fn derive_usd(record: &Value, extractors: &[UsdExtractor]) -> Option<f64> {
    extractors.iter().find_map(|extract| extract(record))
}

/// Numeric field at a JSON pointer. Accepts numbers and numeric strings.
pub fn number_at(record: &Value, pointer: &str) -> Option<f64> {
    let n = match record.pointer(pointer)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    n.is_finite().then_some(n)
}

/// Display-formatted money such as `"$1,234.50"`.
pub fn money_at(record: &Value, pointer: &str) -> Option<f64> {
    let raw = record.pointer(pointer)?.as_str()?;
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| *c != '$' && *c != ',')
        .collect();
    cleaned.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// String or number at a JSON pointer, rendered as text.
pub fn text_at(record: &Value, pointer: &str) -> Option<String> {
    match record.pointer(pointer)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn primary(r: &Value) -> Option<f64> {
        number_at(r, "/primary")
    }

    fn secondary(r: &Value) -> Option<f64> {
        number_at(r, "/secondary")
    }

    const CHAIN: &[UsdExtractor] = &[primary, secondary];

    #[test]
    fn first_present_field_wins() {
        assert_eq!(derive_usd(&json!({ "primary": 3.5, "secondary": 9 }), CHAIN), Some(3.5));
        assert_eq!(derive_usd(&json!({ "primary": null, "secondary": 9 }), CHAIN), Some(9.0));
        assert_eq!(derive_usd(&json!({ "secondary": "12.25" }), CHAIN), Some(12.25));
        assert_eq!(derive_usd(&json!({ "other": 1 }), CHAIN), None);
    }

    #[test]
    fn zero_is_a_value_not_a_miss() {
        assert_eq!(derive_usd(&json!({ "primary": 0, "secondary": 9 }), CHAIN), Some(0.0));
    }

    #[test]
    fn rejects_non_numeric_and_non_finite() {
        assert_eq!(number_at(&json!({ "v": "abc" }), "/v"), None);
        assert_eq!(number_at(&json!({ "v": "NaN" }), "/v"), None);
        assert_eq!(number_at(&json!({ "v": true }), "/v"), None);
    }

    #[test]
    fn parses_pretty_money() {
        assert_eq!(money_at(&json!({ "p": "$1,234.50" }), "/p"), Some(1234.5));
        assert_eq!(money_at(&json!({ "p": "n/a" }), "/p"), None);
    }

    #[test]
    fn text_handles_numbers() {
        assert_eq!(text_at(&json!({ "t": 1700000000 }), "/t").as_deref(), Some("1700000000"));
        assert_eq!(text_at(&json!({ "t": null }), "/t"), None);
    }
}
