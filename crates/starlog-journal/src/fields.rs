//! Tolerant field extraction
//!
//! The journal schema has drifted for years: fields appear, vanish, get
//! renamed, and occasionally change encoding (old builds wrote distances as
//! `"292929 LY"` strings). Decoders therefore never index the raw map
//! directly; they go through these accessors, which absorb a wrong-shaped or
//! absent value by handing back the caller's default. Nothing in this module
//! panics or returns an error.

use serde_json::{Map, Value};

use crate::record::RawRecord;

/// Conversion from a raw JSON value into a typed field.
///
/// Implementations return `None` for an incompatible shape; the accessors
/// turn that into the caller's default.
pub trait FromField: Sized {
    fn from_field(value: &Value) -> Option<Self>;
}

impl FromField for String {
    fn from_field(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(s.clone()),
            // a few legacy fields flip-flopped between text and numeric
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}

impl FromField for f64 {
    fn from_field(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => coerce_number(s),
            _ => None,
        }
    }
}

impl FromField for i64 {
    fn from_field(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
            Value::String(s) => coerce_number(s).map(|f| f as i64),
            _ => None,
        }
    }
}

impl FromField for u64 {
    fn from_field(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n.as_u64().or_else(|| n.as_f64().map(|f| f as u64)),
            Value::String(s) => coerce_number(s).filter(|f| *f >= 0.0).map(|f| f as u64),
            _ => None,
        }
    }
}

impl FromField for i32 {
    fn from_field(value: &Value) -> Option<Self> {
        i64::from_field(value).and_then(|n| i32::try_from(n).ok())
    }
}

impl FromField for u32 {
    fn from_field(value: &Value) -> Option<Self> {
        i64::from_field(value).and_then(|n| u32::try_from(n).ok())
    }
}

impl FromField for bool {
    fn from_field(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(b) => Some(*b),
            // older builds wrote flags as 0/1
            Value::Number(n) => n.as_i64().map(|i| i != 0),
            Value::String(s) => match s.to_ascii_lowercase().as_str() {
                "true" => Some(true),
                "false" => Some(false),
                _ => None,
            },
            _ => None,
        }
    }
}

/// Parse a number out of a string, tolerating legacy unit-suffix encodings
/// like `"292929 LY"` or `"14.2t"`.
pub fn coerce_number(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(n) = trimmed.parse::<f64>() {
        return Some(n);
    }

    let numeric: String = trimmed
        .chars()
        .take_while(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '+'))
        .collect();
    numeric.parse::<f64>().ok()
}

/// Extract `key` from a field map, or the default when absent/wrong-shaped.
pub fn get<T: FromField>(fields: &Map<String, Value>, key: &str, default: T) -> T {
    get_opt(fields, key).unwrap_or(default)
}

/// Extract the first present key of `keys`, or the default when none match.
///
/// Alias chains handle renames across schema eras; a record containing only
/// the old name decodes identically to one containing only the new name.
pub fn get_alias<T: FromField>(fields: &Map<String, Value>, keys: &[&str], default: T) -> T {
    get_alias_opt(fields, keys).unwrap_or(default)
}

/// Extract `key`, distinguishing "field omitted" from "present with zero".
pub fn get_opt<T: FromField>(fields: &Map<String, Value>, key: &str) -> Option<T> {
    fields.get(key).and_then(T::from_field)
}

/// Optional variant of [`get_alias`].
pub fn get_alias_opt<T: FromField>(fields: &Map<String, Value>, keys: &[&str]) -> Option<T> {
    keys.iter().find_map(|key| get_opt(fields, key))
}

/// Borrow a nested array field.
pub fn array<'a>(fields: &'a Map<String, Value>, key: &str) -> Option<&'a Vec<Value>> {
    fields.get(key).and_then(Value::as_array)
}

/// Borrow a nested object field.
pub fn object<'a>(fields: &'a Map<String, Value>, key: &str) -> Option<&'a Map<String, Value>> {
    fields.get(key).and_then(Value::as_object)
}

impl RawRecord {
    /// See [`get`].
    pub fn get<T: FromField>(&self, key: &str, default: T) -> T {
        get(self.fields(), key, default)
    }

    /// See [`get_alias`].
    pub fn get_alias<T: FromField>(&self, keys: &[&str], default: T) -> T {
        get_alias(self.fields(), keys, default)
    }

    /// See [`get_opt`].
    pub fn get_opt<T: FromField>(&self, key: &str) -> Option<T> {
        get_opt(self.fields(), key)
    }

    /// See [`get_alias_opt`].
    pub fn get_alias_opt<T: FromField>(&self, keys: &[&str]) -> Option<T> {
        get_alias_opt(self.fields(), keys)
    }

    /// Boolean flag; absence means false.
    pub fn flag(&self, key: &str) -> bool {
        self.get(key, false)
    }

    /// Boolean flag with an explicit absence default.
    ///
    /// The rare absent-means-true call sites ("wanted" markers, where absence
    /// is the unmarked common case) pass `true` here.
    pub fn flag_or(&self, key: &str, default: bool) -> bool {
        self.get(key, default)
    }

    /// See [`array`].
    pub fn array(&self, key: &str) -> Option<&Vec<Value>> {
        array(self.fields(), key)
    }

    /// See [`object`].
    pub fn object(&self, key: &str) -> Option<&Map<String, Value>> {
        object(self.fields(), key)
    }
}
