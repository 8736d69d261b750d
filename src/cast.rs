//! Declarative type coercion for outbound records.
//!
//! The wire contract is picky about scalar representations (prices travel
//! as strings, identifiers as integers), so records are force-cast against a
//! per-key type table before being sent. Tables use short tags (`"int"`,
//! `"str"`, …) the way the schema documents spell them.

use serde_json::Value;

use crate::error::UnsupportedTypeError;
use crate::record::Record;

/// Canonical value types a table entry can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CastType {
    /// Truthiness cast.
    Boolean,
    /// Scalar stringification.
    String,
    /// Numeric truncation.
    Integer,
    /// Numeric widening.
    Float,
    /// No cast is defined; values pass through untouched.
    Array,
}

impl CastType {
    /// Normalizes a type tag to its canonical type.
    ///
    /// Recognized aliases: `arr`/`array`, `bool`/`boolean`, `str`/`string`,
    /// `int`/`integer`, `float`/`double`.
    ///
    /// # Errors
    ///
    /// Returns [`UnsupportedTypeError`] for any other tag.
    pub fn normalize(tag: &str) -> Result<Self, UnsupportedTypeError> {
        match tag {
            "arr" | "array" => Ok(Self::Array),
            "bool" | "boolean" => Ok(Self::Boolean),
            "str" | "string" => Ok(Self::String),
            "int" | "integer" => Ok(Self::Integer),
            "float" | "double" => Ok(Self::Float),
            _ => Err(UnsupportedTypeError { tag: tag.to_owned() }),
        }
    }
}

/// Casts every table-listed, non-null value in `record` to its canonical
/// type.
///
/// Keys absent from the table and `null` values are left untouched; the key
/// set of the output always equals the input's. Entries tagged `array` (or
/// with an unrecognized tag) are left unchanged when `force` is false.
/// The operation is idempotent.
///
/// # Errors
///
/// With `force` set, returns [`UnsupportedTypeError`] for `array`-tagged or
/// unrecognized entries that would otherwise be skipped.
pub fn cast_record(
    mut record: Record,
    table: &[(&str, &str)],
    force: bool,
) -> Result<Record, UnsupportedTypeError> {
    for (key, value) in &mut record {
        let Some(tag) = lookup(table, key) else { continue };
        if value.is_null() {
            continue;
        }

        match CastType::normalize(tag) {
            Ok(CastType::Boolean) => *value = Value::Bool(truthy(value)),
            Ok(CastType::String) => {
                if let Some(text) = stringify(value) {
                    *value = Value::String(text);
                }
            }
            Ok(CastType::Integer) => *value = Value::from(as_integer(value)),
            Ok(CastType::Float) => *value = Value::from(as_float(value)),
            Ok(CastType::Array) => {
                if force {
                    return Err(UnsupportedTypeError { tag: tag.to_owned() });
                }
            }
            Err(err) => {
                if force {
                    return Err(err);
                }
            }
        }
    }

    Ok(record)
}

fn lookup<'t>(table: &[(&str, &'t str)], key: &str) -> Option<&'t str> {
    table.iter().find(|(name, _)| *name == key).map(|(_, tag)| *tag)
}

/// Loose truthiness: empty strings, `"0"`, zero numbers, and empty
/// containers are false.
fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64() != Some(0.0),
        Value::String(s) => !s.is_empty() && s != "0",
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

/// Scalar stringification; containers have no string form and yield `None`.
fn stringify(value: &Value) -> Option<String> {
    match value {
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) => Some(s.clone()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Numeric truncation; non-numeric strings collapse to 0.
fn as_integer(value: &Value) -> i64 {
    match value {
        Value::Bool(b) => i64::from(*b),
        Value::Number(n) => {
            n.as_i64().unwrap_or_else(|| n.as_f64().unwrap_or(0.0).trunc() as i64)
        }
        Value::String(s) => s.trim().parse::<f64>().unwrap_or(0.0).trunc() as i64,
        _ => 0,
    }
}

/// Numeric widening; non-numeric strings collapse to 0.0.
fn as_float(value: &Value) -> f64 {
    match value {
        Value::Bool(b) => f64::from(u8::from(*b)),
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    }
}
