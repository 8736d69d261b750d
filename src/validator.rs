//! Schema-driven validation and normalization of product records.

use serde_json::Value;
use tracing::warn;

use crate::cast::{self, CastType};
use crate::error::{OzonError, Result, ValidationError};
use crate::record::Record;
use crate::schema::{self, FieldSchema};

/// Upper bound on the `images` list; longer lists are truncated, not
/// rejected.
const MAX_IMAGES_COUNT: usize = 10;

/// Validation mode: which `required*` flag of the schema applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationMode {
    /// Creating a new product: `required_create` fields are mandatory.
    Create,
    /// Updating an existing product: `required_update` fields are mandatory.
    Update,
}

/// Validator/normalizer for product records, fixed to one mode and one
/// schema version at construction.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use ozon_seller::{ProductValidator, ValidationMode};
///
/// # fn example() -> ozon_seller::Result<()> {
/// let validator = ProductValidator::new(ValidationMode::Update, 1)?;
/// let record = json!({"offer_id": 123}).as_object().unwrap().clone();
/// let normalized = validator.validate(record)?;
/// assert_eq!(normalized["offer_id"], json!("123"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ProductValidator {
    schema: &'static [(&'static str, FieldSchema)],
    required: Vec<&'static str>,
    options: Vec<(&'static str, &'static [&'static str])>,
    types: Vec<(&'static str, &'static str)>,
}

impl ProductValidator {
    /// Builds a validator from the embedded schema document for `version`.
    ///
    /// # Errors
    ///
    /// Returns [`OzonError::Config`] when no schema document exists for
    /// `version` (known versions: 1 and 2).
    pub fn new(mode: ValidationMode, version: u32) -> Result<Self> {
        let Some(schema) = schema::document(version) else {
            return Err(OzonError::Config(format!(
                "no product schema document for version {version}"
            )));
        };

        let required = schema
            .iter()
            .filter(|(_, field)| match mode {
                ValidationMode::Create => field.required_create,
                ValidationMode::Update => field.required_update,
            })
            .map(|(key, _)| *key)
            .collect();

        let options = schema
            .iter()
            .filter(|(_, field)| !field.options.is_empty())
            .map(|(key, field)| (*key, field.options))
            .collect();

        let types: Vec<_> = schema.iter().map(|(key, field)| (*key, field.value_type)).collect();

        // A document with a bad tag is a packaging defect; surface it here
        // rather than on first cast.
        for (_, tag) in &types {
            CastType::normalize(tag).map_err(|e| OzonError::Config(e.to_string()))?;
        }

        Ok(Self { schema, required, options, types })
    }

    /// Validates and normalizes one record.
    ///
    /// In order: unknown keys are dropped with a warning; required keys are
    /// checked for presence (and, for string-typed fields, non-emptiness);
    /// constrained keys are checked against their option sets by strict
    /// equality; an over-long `images` list is truncated to the first
    /// `10` entries; finally the record is type-cast against the schema's
    /// type table.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] describing the first violated rule.
    pub fn validate(&self, mut item: Record) -> Result<Record> {
        let unknown: Vec<String> = item
            .keys()
            .filter(|key| !self.schema.iter().any(|(name, _)| *name == key.as_str()))
            .cloned()
            .collect();
        for key in unknown {
            warn!(key = %key, "unexpected item key, dropping");
            item.remove(&key);
        }

        for key in &self.required {
            match item.get(*key) {
                None => {
                    return Err(ValidationError::MissingRequired((*key).to_owned()).into());
                }
                Some(Value::String(s)) if s.is_empty() && self.is_string_typed(key) => {
                    return Err(ValidationError::EmptyValue((*key).to_owned()).into());
                }
                Some(_) => {}
            }
        }

        for (key, options) in &self.options {
            let Some(value) = item.get(*key) else { continue };
            if value.is_null() {
                continue;
            }
            let allowed = matches!(value, Value::String(s) if options.contains(&s.as_str()));
            if !allowed {
                return Err(ValidationError::InvalidOption {
                    key: (*key).to_owned(),
                    value: value.clone(),
                }
                .into());
            }
        }

        if let Some(Value::Array(images)) = item.get_mut("images") {
            images.truncate(MAX_IMAGES_COUNT);
        }

        Ok(cast::cast_record(item, &self.types, false)?)
    }

    fn is_string_typed(&self, key: &str) -> bool {
        self.types
            .iter()
            .find(|(name, _)| *name == key)
            .is_some_and(|(_, tag)| CastType::normalize(tag) == Ok(CastType::String))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn record(value: Value) -> Record {
        value.as_object().expect("object literal").clone()
    }

    fn complete_v1_item() -> Record {
        record(json!({
            "description": "Ceramic mug, 300 ml",
            "category_id": 17_036_076,
            "name": "Mug",
            "offer_id": "MUG-300",
            "price": "590",
            "vat": "0.2",
            "height": 95,
            "depth": 85,
            "width": 85,
            "dimension_unit": "mm",
            "weight": 320,
            "weight_unit": "g",
            "images": ["https://img.example.com/mug.jpg"],
        }))
    }

    #[test]
    fn test_unknown_version_is_config_error() {
        let err = ProductValidator::new(ValidationMode::Create, 3).unwrap_err();
        assert!(matches!(err, OzonError::Config(_)));
    }

    #[test]
    fn test_complete_item_passes() {
        let validator = ProductValidator::new(ValidationMode::Create, 1).unwrap();
        let out = validator.validate(complete_v1_item()).unwrap();
        assert_eq!(out["name"], json!("Mug"));
    }

    #[test]
    fn test_missing_required_key() {
        let validator = ProductValidator::new(ValidationMode::Create, 1).unwrap();
        let mut item = complete_v1_item();
        item.remove("name");
        let err = validator.validate(item).unwrap_err();
        assert!(matches!(
            err,
            OzonError::Validation(ValidationError::MissingRequired(ref key)) if key == "name"
        ));
    }

    #[test]
    fn test_empty_string_for_required_string_field() {
        let validator = ProductValidator::new(ValidationMode::Create, 1).unwrap();
        let mut item = complete_v1_item();
        item.insert("name".to_owned(), json!(""));
        let err = validator.validate(item).unwrap_err();
        assert!(matches!(
            err,
            OzonError::Validation(ValidationError::EmptyValue(ref key)) if key == "name"
        ));
    }

    #[test]
    fn test_update_mode_requires_only_offer_id() {
        let validator = ProductValidator::new(ValidationMode::Update, 1).unwrap();
        let out = validator.validate(record(json!({"offer_id": "MUG-300"}))).unwrap();
        assert_eq!(out["offer_id"], json!("MUG-300"));

        let err = validator.validate(record(json!({"name": "Mug"}))).unwrap_err();
        assert!(matches!(
            err,
            OzonError::Validation(ValidationError::MissingRequired(ref key)) if key == "offer_id"
        ));
    }

    #[test]
    fn test_invalid_option_value() {
        let validator = ProductValidator::new(ValidationMode::Create, 1).unwrap();
        let mut item = complete_v1_item();
        item.insert("vat".to_owned(), json!("0.3"));
        let err = validator.validate(item).unwrap_err();
        assert!(matches!(
            err,
            OzonError::Validation(ValidationError::InvalidOption { ref key, .. }) if key == "vat"
        ));
    }

    #[test]
    fn test_option_check_is_strict_about_types() {
        // Numeric 0 is not the string "0".
        let validator = ProductValidator::new(ValidationMode::Create, 1).unwrap();
        let mut item = complete_v1_item();
        item.insert("vat".to_owned(), json!(0));
        assert!(validator.validate(item).is_err());
    }

    #[test]
    fn test_unknown_keys_dropped_before_required_check() {
        let validator = ProductValidator::new(ValidationMode::Update, 1).unwrap();
        let out = validator
            .validate(record(json!({"offer_id": "A", "fancy_extra": 1})))
            .unwrap();
        assert!(!out.contains_key("fancy_extra"));
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn test_images_truncated_to_ten() {
        let validator = ProductValidator::new(ValidationMode::Create, 1).unwrap();
        let mut item = complete_v1_item();
        let images: Vec<Value> = (0..15).map(|i| json!(format!("img-{i}.jpg"))).collect();
        item.insert("images".to_owned(), Value::Array(images));
        let out = validator.validate(item).unwrap();
        let images = out["images"].as_array().unwrap();
        assert_eq!(images.len(), 10);
        assert_eq!(images[0], json!("img-0.jpg"));
        assert_eq!(images[9], json!("img-9.jpg"));
    }

    #[test]
    fn test_types_cast_after_validation() {
        let validator = ProductValidator::new(ValidationMode::Create, 1).unwrap();
        let mut item = complete_v1_item();
        item.insert("category_id".to_owned(), json!("17036076"));
        item.insert("weight".to_owned(), json!("320"));
        let out = validator.validate(item).unwrap();
        assert_eq!(out["category_id"], json!(17_036_076));
        assert_eq!(out["weight"], json!(320));
    }

    #[test]
    fn test_v2_accepts_v2_only_fields() {
        let validator = ProductValidator::new(ValidationMode::Update, 2).unwrap();
        let out = validator
            .validate(record(json!({"offer_id": "A", "color_image": "c.jpg"})))
            .unwrap();
        assert_eq!(out["color_image"], json!("c.jpg"));
    }
}
