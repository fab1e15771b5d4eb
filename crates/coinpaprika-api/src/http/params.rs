/*
[INPUT]:  Caller-supplied request parameters (strings, numbers, booleans)
[OUTPUT]: Query-string text and JSON/form body projections
[POS]:    HTTP layer - heterogeneous parameter values
[UPDATE]: When adding parameter value kinds
*/

use std::collections::BTreeMap;
use std::fmt;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde_json::{Map, Number, Value};

/// Escapes everything except RFC 3986 unreserved characters
const FORM_VALUE: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'.').remove(b'_').remove(b'~');

/// Parameter mapping attached to a request
pub type Params = BTreeMap<String, ParamValue>;

/// A single parameter value
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    String(String),
    Int(i64),
    UInt(u64),
    Float(f64),
    Bool(bool),
}

impl ParamValue {
    /// JSON projection. `None` when the value has no JSON representation
    /// (NaN and infinities).
    pub fn to_json(&self) -> Option<Value> {
        match self {
            ParamValue::String(value) => Some(Value::String(value.clone())),
            ParamValue::Int(value) => Some(Value::Number((*value).into())),
            ParamValue::UInt(value) => Some(Value::Number((*value).into())),
            ParamValue::Float(value) => Number::from_f64(*value).map(Value::Number),
            ParamValue::Bool(value) => Some(Value::Bool(*value)),
        }
    }
}

/// Text projection used for query strings and form bodies
impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::String(value) => f.write_str(value),
            ParamValue::Int(value) => write!(f, "{value}"),
            ParamValue::UInt(value) => write!(f, "{value}"),
            ParamValue::Float(value) => write!(f, "{value}"),
            ParamValue::Bool(value) => write!(f, "{value}"),
        }
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::String(value)
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::String(value.to_string())
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Bool(value)
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        ParamValue::Float(value)
    }
}

impl From<f32> for ParamValue {
    fn from(value: f32) -> Self {
        ParamValue::Float(value.into())
    }
}

macro_rules! impl_from_signed {
    ($($ty:ty),*) => {
        $(impl From<$ty> for ParamValue {
            fn from(value: $ty) -> Self {
                ParamValue::Int(value.into())
            }
        })*
    };
}

macro_rules! impl_from_unsigned {
    ($($ty:ty),*) => {
        $(impl From<$ty> for ParamValue {
            fn from(value: $ty) -> Self {
                ParamValue::UInt(value.into())
            }
        })*
    };
}

impl_from_signed!(i8, i16, i32, i64);
impl_from_unsigned!(u8, u16, u32, u64);

/// Serialize a parameter mapping as a JSON object.
/// Returns `None` if any value cannot be represented in JSON.
pub(crate) fn params_to_json(params: &Params) -> Option<Value> {
    let mut object = Map::with_capacity(params.len());
    for (key, value) in params {
        object.insert(key.clone(), value.to_json()?);
    }
    Some(Value::Object(object))
}

/// Render a parameter mapping as `key=value&key=value` with percent-encoded values
pub(crate) fn params_to_form(params: &Params) -> String {
    params
        .iter()
        .map(|(key, value)| {
            let text = value.to_string();
            format!("{key}={}", utf8_percent_encode(&text, FORM_VALUE))
        })
        .collect::<Vec<_>>()
        .join("&")
}
