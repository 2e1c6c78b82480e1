//! Call argument values and their redacted summaries

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::utils::{char_len, escape_html};

/// Default maximum length (in characters) of a string argument summary
pub const DEFAULT_MAX_ARG_LENGTH: usize = 64;

/// Replaces the whole string when it exceeds the maximum length
pub const TRUNCATION_MARKER: &str = "...";

/// Summary token for a missing value
pub const NULL_MARKER: &str = "NULL";

/// A call argument as recorded on a stack frame.
///
/// Only the shape needed for a summary is kept: collections remember their
/// size, objects their type name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ArgValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Array(usize),
    Object(String),
}

impl ArgValue {
    /// Record an arbitrary value by its type name
    pub fn object<T: ?Sized>(_value: &T) -> Self {
        Self::Object(std::any::type_name::<T>().to_string())
    }

    /// Summarize for display, replacing strings longer than `max_len` characters
    pub fn summarize(&self, max_len: usize) -> ArgSummary {
        let text = match self {
            Self::Null => NULL_MARKER.to_string(),
            Self::Bool(true) => "TRUE".to_string(),
            Self::Bool(false) => "FALSE".to_string(),
            Self::Array(len) => format!("Array[{}]", len),
            Self::Object(type_name) => format!("Object: {}", type_name),
            Self::Int(value) => quoted(&value.to_string(), max_len),
            Self::Float(value) => quoted(&value.to_string(), max_len),
            Self::Str(value) => quoted(value, max_len),
        };
        ArgSummary(text)
    }
}

fn quoted(raw: &str, max_len: usize) -> String {
    if char_len(raw) > max_len {
        format!("\"{}\"", TRUNCATION_MARKER)
    } else {
        format!("\"{}\"", escape_html(raw))
    }
}

/// Rendered, already-escaped summary of one argument
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArgSummary(String);

impl ArgSummary {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ArgSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<bool> for ArgValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

macro_rules! int_arg {
    ($($ty:ty),*) => {
        $(impl From<$ty> for ArgValue {
            fn from(value: $ty) -> Self {
                Self::Int(i64::from(value))
            }
        })*
    };
}

int_arg!(i8, i16, i32, i64, u8, u16, u32);

macro_rules! wide_int_arg {
    ($($ty:ty),*) => {
        $(impl From<$ty> for ArgValue {
            fn from(value: $ty) -> Self {
                i64::try_from(value)
                    .map(Self::Int)
                    .unwrap_or_else(|_| Self::Str(value.to_string()))
            }
        })*
    };
}

wide_int_arg!(u64, usize, isize, i128, u128);

impl From<f32> for ArgValue {
    fn from(value: f32) -> Self {
        Self::Float(f64::from(value))
    }
}

impl From<f64> for ArgValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<char> for ArgValue {
    fn from(value: char) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<&str> for ArgValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for ArgValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<&String> for ArgValue {
    fn from(value: &String) -> Self {
        Self::Str(value.clone())
    }
}

impl From<()> for ArgValue {
    fn from(_: ()) -> Self {
        Self::Null
    }
}

impl<T: Into<ArgValue>> From<Option<T>> for ArgValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Self::Null)
    }
}

impl<T> From<Vec<T>> for ArgValue {
    fn from(value: Vec<T>) -> Self {
        Self::Array(value.len())
    }
}

impl<T> From<&Vec<T>> for ArgValue {
    fn from(value: &Vec<T>) -> Self {
        Self::Array(value.len())
    }
}

impl<T> From<&[T]> for ArgValue {
    fn from(value: &[T]) -> Self {
        Self::Array(value.len())
    }
}

impl<K, V, S> From<&HashMap<K, V, S>> for ArgValue {
    fn from(value: &HashMap<K, V, S>) -> Self {
        Self::Array(value.len())
    }
}

impl<K, V> From<&BTreeMap<K, V>> for ArgValue {
    fn from(value: &BTreeMap<K, V>) -> Self {
        Self::Array(value.len())
    }
}

impl From<&serde_json::Value> for ArgValue {
    fn from(value: &serde_json::Value) -> Self {
        use serde_json::Value;
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(*b),
            Value::Number(n) => n
                .as_i64()
                .map(Self::Int)
                .or_else(|| n.as_f64().map(Self::Float))
                .unwrap_or_else(|| Self::Str(n.to_string())),
            Value::String(s) => Self::Str(s.clone()),
            Value::Array(items) => Self::Array(items.len()),
            Value::Object(map) => Self::Array(map.len()),
        }
    }
}

impl From<serde_json::Value> for ArgValue {
    fn from(value: serde_json::Value) -> Self {
        Self::from(&value)
    }
}
