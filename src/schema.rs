//! Versioned product schema documents.
//!
//! One document per product-import API version, embedded as static data and
//! loaded once per validator instance. Each entry declares whether a field
//! is mandatory for create/update, its allowed option set, and the type tag
//! used for coercion.

/// Per-field validation rules.
#[derive(Debug, Clone, Copy)]
pub struct FieldSchema {
    /// Field must be present when creating a product.
    pub required_create: bool,
    /// Field must be present when updating a product.
    pub required_update: bool,
    /// Exhaustive allowed values; empty means unconstrained.
    pub options: &'static [&'static str],
    /// Type tag understood by [`crate::cast::CastType::normalize`].
    pub value_type: &'static str,
}

const OPTIONAL_STR: FieldSchema = FieldSchema {
    required_create: false,
    required_update: false,
    options: &[],
    value_type: "str",
};

const OPTIONAL_ARR: FieldSchema = FieldSchema { value_type: "arr", ..OPTIONAL_STR };

const CREATE_STR: FieldSchema = FieldSchema { required_create: true, ..OPTIONAL_STR };

const CREATE_INT: FieldSchema = FieldSchema { value_type: "int", ..CREATE_STR };

static DOCUMENT_V1: &[(&str, FieldSchema)] = &[
    ("barcode", OPTIONAL_STR),
    ("description", CREATE_STR),
    ("category_id", CREATE_INT),
    ("name", CREATE_STR),
    (
        "offer_id",
        FieldSchema { required_create: true, required_update: true, ..OPTIONAL_STR },
    ),
    ("price", CREATE_STR),
    ("old_price", OPTIONAL_STR),
    ("premium_price", OPTIONAL_STR),
    ("vat", FieldSchema { options: &["0", "0.1", "0.2"], ..CREATE_STR }),
    ("vendor", OPTIONAL_STR),
    ("vendor_code", OPTIONAL_STR),
    ("height", CREATE_INT),
    ("depth", CREATE_INT),
    ("width", CREATE_INT),
    ("dimension_unit", FieldSchema { options: &["mm", "cm", "in"], ..CREATE_STR }),
    ("weight", CREATE_INT),
    ("weight_unit", FieldSchema { options: &["g", "kg", "lb"], ..CREATE_STR }),
    ("images", FieldSchema { required_create: true, ..OPTIONAL_ARR }),
    ("primary_image", OPTIONAL_STR),
    ("images360", OPTIONAL_ARR),
    ("pdf_list", OPTIONAL_ARR),
    ("attributes", OPTIONAL_ARR),
    ("complex_attributes", OPTIONAL_ARR),
];

static DOCUMENT_V2: &[(&str, FieldSchema)] = &[
    ("barcode", OPTIONAL_STR),
    ("description", CREATE_STR),
    ("category_id", CREATE_INT),
    ("name", CREATE_STR),
    (
        "offer_id",
        FieldSchema { required_create: true, required_update: true, ..OPTIONAL_STR },
    ),
    ("price", CREATE_STR),
    ("old_price", OPTIONAL_STR),
    ("premium_price", OPTIONAL_STR),
    ("vat", FieldSchema { options: &["0", "0.1", "0.2"], ..CREATE_STR }),
    ("vendor", OPTIONAL_STR),
    ("vendor_code", OPTIONAL_STR),
    ("height", CREATE_INT),
    ("depth", CREATE_INT),
    ("width", CREATE_INT),
    ("dimension_unit", FieldSchema { options: &["mm", "cm", "in"], ..CREATE_STR }),
    ("weight", CREATE_INT),
    ("weight_unit", FieldSchema { options: &["g", "kg", "lb"], ..CREATE_STR }),
    ("image_group_id", OPTIONAL_STR),
    ("images", FieldSchema { required_create: true, ..OPTIONAL_ARR }),
    ("primary_image", OPTIONAL_STR),
    ("images360", OPTIONAL_ARR),
    ("color_image", OPTIONAL_STR),
    ("pdf_list", OPTIONAL_ARR),
    ("attributes", OPTIONAL_ARR),
    ("complex_attributes", OPTIONAL_ARR),
];

/// The schema document for an API version, `None` for unknown versions.
#[must_use]
pub fn document(version: u32) -> Option<&'static [(&'static str, FieldSchema)]> {
    match version {
        1 => Some(DOCUMENT_V1),
        2 => Some(DOCUMENT_V2),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use crate::cast::CastType;

    use super::*;

    #[test]
    fn test_known_versions_present() {
        assert!(document(1).is_some());
        assert!(document(2).is_some());
        assert!(document(0).is_none());
        assert!(document(3).is_none());
    }

    #[test]
    fn test_all_type_tags_normalize() {
        for version in [1, 2] {
            for (key, field) in document(version).unwrap() {
                assert!(
                    CastType::normalize(field.value_type).is_ok(),
                    "v{version} field {key} has bad tag {}",
                    field.value_type
                );
            }
        }
    }

    #[test]
    fn test_option_sets_only_on_string_fields() {
        for version in [1, 2] {
            for (key, field) in document(version).unwrap() {
                if !field.options.is_empty() {
                    assert_eq!(field.value_type, "str", "v{version} field {key}");
                }
            }
        }
    }

    #[test]
    fn test_offer_id_required_for_both_modes() {
        for version in [1, 2] {
            let (_, field) = document(version)
                .unwrap()
                .iter()
                .find(|(key, _)| *key == "offer_id")
                .unwrap();
            assert!(field.required_create);
            assert!(field.required_update);
        }
    }

    #[test]
    fn test_v2_extends_v1() {
        let v1: Vec<&str> = document(1).unwrap().iter().map(|(k, _)| *k).collect();
        let v2: Vec<&str> = document(2).unwrap().iter().map(|(k, _)| *k).collect();
        for key in v1 {
            assert!(v2.contains(&key), "v2 lost field {key}");
        }
        assert!(v2.contains(&"image_group_id"));
        assert!(v2.contains(&"color_image"));
    }
}
