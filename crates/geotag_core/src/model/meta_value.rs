//! Untyped metadata scalar.
//!
//! # Responsibility
//! - Carry whatever a schemaless meta row holds (text, numbers, flags, null).
//! - Define the truthiness and numeric-cast rules the sanitizers build on.
//!
//! # Invariants
//! - `Null`, `Bool(false)`, `Integer(0)`, `Real(0.0)`, `Text("")` and
//!   `Text("0")` are the only falsy values.
//! - Numeric casts never fail; text without a numeric prefix casts to zero.

use once_cell::sync::Lazy;
use regex::Regex;
use rusqlite::types::{FromSql, FromSqlResult, ToSql, ToSqlOutput, Value, ValueRef};

static NUMERIC_PREFIX_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*([+-]?(?:\d+(?:\.\d*)?|\.\d+)(?:[eE][+-]?\d+)?)")
        .expect("valid numeric prefix regex")
});

/// One raw value read from, or written to, the generic meta store.
#[derive(Debug, Clone, PartialEq)]
pub enum MetaValue {
    Null,
    Bool(bool),
    Integer(i64),
    Real(f64),
    Text(String),
}

impl MetaValue {
    /// Loose truthiness used by stored-flag and coordinate checks.
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Null => false,
            Self::Bool(value) => *value,
            Self::Integer(value) => *value != 0,
            Self::Real(value) => *value != 0.0,
            Self::Text(value) => !(value.is_empty() || value == "0"),
        }
    }

    /// Returns the numeric reading of this value, if it has one.
    ///
    /// Text is read by its leading numeric prefix, so `"12.5km"` gives
    /// `12.5` and `"north"` gives `None`.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Null => None,
            Self::Bool(value) => Some(if *value { 1.0 } else { 0.0 }),
            Self::Integer(value) => Some(*value as f64),
            Self::Real(value) => Some(*value),
            Self::Text(value) => leading_number(value),
        }
    }

    /// Float cast; values without a numeric reading become `0.0`.
    pub fn to_float(&self) -> f64 {
        self.as_number().unwrap_or(0.0)
    }

    /// Integer cast clamped at zero.
    ///
    /// Fractions are truncated toward zero and negative readings become `0`.
    pub fn to_non_negative_int(&self) -> u64 {
        match self {
            Self::Integer(value) => u64::try_from(*value).unwrap_or(0),
            other => {
                let number = other.to_float();
                if number.is_finite() && number >= 1.0 {
                    // `as` saturates for values above u64::MAX.
                    number.trunc() as u64
                } else {
                    0
                }
            }
        }
    }

    /// Text view of the value, `""` for null and `false`.
    pub fn to_text(&self) -> String {
        match self {
            Self::Null | Self::Bool(false) => String::new(),
            Self::Bool(true) => "1".to_string(),
            Self::Integer(value) => value.to_string(),
            Self::Real(value) => value.to_string(),
            Self::Text(value) => value.clone(),
        }
    }
}

fn leading_number(text: &str) -> Option<f64> {
    let captures = NUMERIC_PREFIX_RE.captures(text)?;
    captures.get(1)?.as_str().parse::<f64>().ok()
}

impl From<&str> for MetaValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for MetaValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for MetaValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for MetaValue {
    fn from(value: f64) -> Self {
        Self::Real(value)
    }
}

impl From<bool> for MetaValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl<T: Into<MetaValue>> From<Option<T>> for MetaValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

impl ToSql for MetaValue {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self {
            Self::Null => ToSqlOutput::Owned(Value::Null),
            Self::Bool(value) => ToSqlOutput::Owned(Value::Integer(i64::from(*value))),
            Self::Integer(value) => ToSqlOutput::Owned(Value::Integer(*value)),
            Self::Real(value) => ToSqlOutput::Owned(Value::Real(*value)),
            Self::Text(value) => ToSqlOutput::Borrowed(ValueRef::Text(value.as_bytes())),
        })
    }
}

impl FromSql for MetaValue {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        Ok(match value {
            ValueRef::Null => Self::Null,
            ValueRef::Integer(value) => Self::Integer(value),
            ValueRef::Real(value) => Self::Real(value),
            // Blobs only show up from foreign writers; read them as text.
            ValueRef::Text(bytes) | ValueRef::Blob(bytes) => {
                Self::Text(String::from_utf8_lossy(bytes).into_owned())
            }
        })
    }
}
