//! Resolver for the `with` optional-section flags of posting endpoints.
//!
//! Posting responses can embed optional detail sections (analytics data,
//! barcodes, financial data). Which sections exist depends on the endpoint
//! version and fulfillment scheme; this module computes the applicable key
//! set, all-off defaults, and the merge of caller-supplied flags over those
//! defaults.

use serde_json::Value;

use crate::enums::PostingScheme;
use crate::record::{self, Record};

/// Optional-section keys applicable to a version/scheme combination.
///
/// `unfulfilled` selects the narrower set the v2 seller-fulfilled
/// unfulfilled-list endpoint supports.
#[must_use]
pub fn keys(version: u32, scheme: PostingScheme, unfulfilled: bool) -> &'static [&'static str] {
    match (version, scheme, unfulfilled) {
        (2, PostingScheme::Fbs, true) => &["barcodes"],
        (2, PostingScheme::Fbo, false) => &["analytics_data", "financial_data"],
        _ => &["analytics_data", "barcodes", "financial_data"],
    }
}

/// All applicable sections switched off.
#[must_use]
pub fn defaults(version: u32, scheme: PostingScheme, unfulfilled: bool) -> Record {
    keys(version, scheme, unfulfilled)
        .iter()
        .map(|key| ((*key).to_owned(), Value::Bool(false)))
        .collect()
}

/// Merges caller-supplied flags over the defaults.
///
/// Accepts either the flags themselves or a whole request mapping with a
/// nested `with` object. Unknown flags are dropped; flags outside the
/// `unfulfilled` subset are still honored when explicitly supplied, matching
/// the upstream contract.
#[must_use]
pub fn resolve(
    options: &Record,
    version: u32,
    scheme: PostingScheme,
    unfulfilled: bool,
) -> Record {
    let flags = match options.get("with") {
        Some(Value::Object(nested)) => nested.clone(),
        _ => options.clone(),
    };

    record::merged(
        defaults(version, scheme, unfulfilled),
        record::pick(&flags, keys(version, scheme, false)),
    )
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn record(value: Value) -> Record {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn test_keys_v2_fbs_unfulfilled_is_barcodes_only() {
        assert_eq!(keys(2, PostingScheme::Fbs, true), &["barcodes"]);
    }

    #[test]
    fn test_keys_v2_fbo_has_no_barcodes() {
        assert_eq!(keys(2, PostingScheme::Fbo, false), &["analytics_data", "financial_data"]);
    }

    #[test]
    fn test_keys_default_set() {
        let all = &["analytics_data", "barcodes", "financial_data"];
        assert_eq!(keys(2, PostingScheme::Fbs, false), all);
        assert_eq!(keys(3, PostingScheme::Fbs, false), all);
        assert_eq!(keys(3, PostingScheme::Fbs, true), all);
        assert_eq!(keys(2, PostingScheme::Crossborder, false), all);
    }

    #[test]
    fn test_defaults_all_false() {
        let defaults = defaults(2, PostingScheme::Fbo, false);
        assert_eq!(defaults.len(), 2);
        assert!(defaults.values().all(|v| v == &json!(false)));
    }

    #[test]
    fn test_resolve_merges_flags_over_defaults() {
        let options = record(json!({"barcodes": true}));
        let out = resolve(&options, 2, PostingScheme::Fbs, false);
        assert_eq!(out["barcodes"], json!(true));
        assert_eq!(out["analytics_data"], json!(false));
        assert_eq!(out["financial_data"], json!(false));
    }

    #[test]
    fn test_resolve_unwraps_nested_with() {
        let options = record(json!({"with": {"analytics_data": true}, "limit": 5}));
        let out = resolve(&options, 3, PostingScheme::Fbs, false);
        assert_eq!(out["analytics_data"], json!(true));
        assert!(!out.contains_key("limit"));
    }

    #[test]
    fn test_resolve_drops_unknown_flags() {
        let options = record(json!({"telemetry": true}));
        let out = resolve(&options, 2, PostingScheme::Fbs, false);
        assert!(!out.contains_key("telemetry"));
    }

    #[test]
    fn test_resolve_unfulfilled_defaults_narrow_but_picks_wide() {
        // The default section set narrows to barcodes, yet an explicitly
        // supplied wider flag is still honored.
        let options = record(json!({"analytics_data": true}));
        let out = resolve(&options, 2, PostingScheme::Fbs, true);
        assert_eq!(out["barcodes"], json!(false));
        assert_eq!(out["analytics_data"], json!(true));
    }
}
