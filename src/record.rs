//! Record shaping helpers.
//!
//! A [`Record`] is the unit both the validator and the endpoint modules
//! operate on: an ordered field-name → JSON value mapping, created fresh per
//! call and never persisted. The helpers here are pure: each returns a new
//! record instead of mutating through references.

use serde_json::{Map, Value};

/// Ordered mapping from field name to JSON value.
///
/// Backed by `serde_json`'s map with `preserve_order` enabled, so iteration
/// follows insertion order.
pub type Record = Map<String, Value>;

/// Projects a record onto a key whitelist.
///
/// The output contains exactly the keys present in both `record` and
/// `allowed`, values unchanged, insertion order preserved. Missing whitelist
/// keys are simply absent; there are no error cases.
#[must_use]
pub fn pick(record: &Record, allowed: &[&str]) -> Record {
    record
        .iter()
        .filter(|(key, _)| allowed.contains(&key.as_str()))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

/// Overlays `overrides` onto `defaults`.
///
/// Keys from `defaults` keep their position; keys only present in
/// `overrides` are appended in their own order.
#[must_use]
pub fn merged(defaults: Record, overrides: Record) -> Record {
    let mut out = defaults;
    for (key, value) in overrides {
        out.insert(key, value);
    }
    out
}

/// Wraps a single object into a one-element collection.
///
/// Arrays pass through element-wise; a bare object (or scalar) becomes a
/// singleton list. Import-style endpoints use this to accept either one
/// item or many.
#[must_use]
pub fn ensure_collection(value: Value) -> Vec<Value> {
    match value {
        Value::Array(items) => items,
        other => vec![other],
    }
}

/// Drops entries whose value is empty or zero-like.
///
/// Removes `null`, `false`, `0`, `0.0`, `""`, `[]` and `{}`, the loose
/// falsiness the wire contract treats as "not provided".
#[must_use]
pub fn compact(record: Record) -> Record {
    record.into_iter().filter(|(_, value)| !is_falsy(value)).collect()
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn record(pairs: &[(&str, Value)]) -> Record {
        pairs.iter().map(|(k, v)| ((*k).to_owned(), v.clone())).collect()
    }

    #[test]
    fn test_pick_keeps_intersection_in_order() {
        let input = record(&[
            ("offer_id", json!("A1")),
            ("name", json!("Mug")),
            ("internal", json!(true)),
            ("price", json!("10")),
        ]);
        let out = pick(&input, &["price", "offer_id"]);
        let keys: Vec<&str> = out.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["offer_id", "price"]);
        assert_eq!(out["offer_id"], json!("A1"));
        assert_eq!(out["price"], json!("10"));
    }

    #[test]
    fn test_pick_missing_whitelist_keys_are_absent() {
        let input = record(&[("a", json!(1))]);
        let out = pick(&input, &["a", "b", "c"]);
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn test_pick_empty_whitelist() {
        let input = record(&[("a", json!(1))]);
        assert!(pick(&input, &[]).is_empty());
    }

    #[test]
    fn test_merged_overrides_win() {
        let defaults = record(&[("limit", json!(10)), ("offset", json!(0))]);
        let overrides = record(&[("limit", json!(50)), ("dir", json!("desc"))]);
        let out = merged(defaults, overrides);
        let keys: Vec<&str> = out.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["limit", "offset", "dir"]);
        assert_eq!(out["limit"], json!(50));
    }

    #[test]
    fn test_ensure_collection_wraps_object() {
        let items = ensure_collection(json!({"offer_id": "A1"}));
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["offer_id"], "A1");
    }

    #[test]
    fn test_ensure_collection_passes_array_through() {
        let items = ensure_collection(json!([{"a": 1}, {"b": 2}]));
        assert_eq!(items.len(), 2);
    }

    #[test]
    fn test_compact_drops_falsy_values() {
        let input = record(&[
            ("page", json!(1)),
            ("filter", json!({})),
            ("query", json!("")),
            ("flag", json!(false)),
            ("zero", json!(0)),
            ("list", json!([])),
            ("none", Value::Null),
        ]);
        let out = compact(input);
        assert_eq!(out.len(), 1);
        assert_eq!(out["page"], json!(1));
    }
}
