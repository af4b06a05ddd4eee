use serde::{Deserialize, Deserializer};
use std::fmt;
use std::sync::Arc;

use crate::FormatError;

/// A value living in the REPL namespace.
///
/// The renderer only needs two things from a value: the name of its type and
/// a textual representation. Producing the representation may fail, in which
/// case the renderer shows a placeholder instead.
pub trait ReplValue: fmt::Debug + Send + Sync {
    /// Name of the value's type as the REPL language spells it (`int`, `str`, ...)
    fn type_name(&self) -> String;

    /// Default textual representation of the value
    fn describe(&self) -> Result<String, FormatError>;
}

/// Dynamically typed REPL value with Python-like display semantics
#[derive(Debug, Clone)]
pub enum Value {
    None,
    Bool(bool),
    /// Wide enough for every integer JSON can carry (`i64` and `u64`)
    Int(i128),
    Float(f64),
    Str(String),
    List(Vec<Value>),
    /// Ordered key/value pairs
    Dict(Vec<(String, Value)>),
    /// A value only known by its type name and, when available, its representation
    Opaque {
        type_name: String,
        repr: Option<String>,
    },
    /// Embedder-defined value
    Custom(Arc<dyn ReplValue>),
}

impl Value {
    /// Opaque value whose representation is known
    pub fn opaque(type_name: impl Into<String>, repr: impl Into<String>) -> Self {
        Value::Opaque {
            type_name: type_name.into(),
            repr: Some(repr.into()),
        }
    }

    /// Opaque value whose representation cannot be produced
    pub fn unrepresentable(type_name: impl Into<String>) -> Self {
        Value::Opaque {
            type_name: type_name.into(),
            repr: None,
        }
    }

    pub fn custom(value: impl ReplValue + 'static) -> Self {
        Value::Custom(Arc::new(value))
    }
}

impl ReplValue for Value {
    fn type_name(&self) -> String {
        match self {
            Value::None => "NoneType".to_string(),
            Value::Bool(_) => "bool".to_string(),
            Value::Int(_) => "int".to_string(),
            Value::Float(_) => "float".to_string(),
            Value::Str(_) => "str".to_string(),
            Value::List(_) => "list".to_string(),
            Value::Dict(_) => "dict".to_string(),
            Value::Opaque { type_name, .. } => type_name.clone(),
            Value::Custom(inner) => inner.type_name(),
        }
    }

    fn describe(&self) -> Result<String, FormatError> {
        match self {
            Value::None => Ok("None".to_string()),
            Value::Bool(true) => Ok("True".to_string()),
            Value::Bool(false) => Ok("False".to_string()),
            Value::Int(i) => Ok(i.to_string()),
            Value::Float(f) => Ok(float_repr(*f)),
            Value::Str(s) => Ok(str_repr(s)),
            Value::List(items) => {
                let parts = items
                    .iter()
                    .map(|item| item.describe())
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(format!("[{}]", parts.join(", ")))
            }
            Value::Dict(entries) => {
                let mut parts = Vec::with_capacity(entries.len());
                for (key, value) in entries {
                    parts.push(format!("{}: {}", str_repr(key), value.describe()?));
                }
                Ok(format!("{{{}}}", parts.join(", ")))
            }
            Value::Opaque { type_name, repr } => repr
                .clone()
                .ok_or_else(|| FormatError::Unrepresentable(type_name.clone())),
            Value::Custom(inner) => inner.describe(),
        }
    }
}

/// Quote a string the way Python's `repr` does
fn str_repr(s: &str) -> String {
    let quote = if s.contains('\'') && !s.contains('"') {
        '"'
    } else {
        '\''
    };

    let mut out = String::with_capacity(s.len() + 2);
    out.push(quote);
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c if c.is_control() => out.push_str(&format!("\\x{:02x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}

/// Format a float the way Python's `repr` does (`5.0`, `1e+16`, `inf`)
fn float_repr(f: f64) -> String {
    if f.is_nan() {
        return "nan".to_string();
    }
    if f.is_infinite() {
        return if f > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let s = format!("{:?}", f);
    match s.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            format!("{}e{}{:0>2}", mantissa, sign, digits)
        }
        None => s,
    }
}

impl From<serde_json::Value> for Value {
    fn from(raw: serde_json::Value) -> Self {
        match raw {
            serde_json::Value::Null => Value::None,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => {
                match n.as_i64().map(i128::from).or_else(|| n.as_u64().map(i128::from)) {
                    Some(i) => Value::Int(i),
                    None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
                }
            }
            serde_json::Value::String(s) => Value::Str(s),
            serde_json::Value::Array(items) => {
                Value::List(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(mut map) => {
                let type_name = match map.get("__type__") {
                    Some(serde_json::Value::String(type_name)) => Some(type_name.clone()),
                    _ => None,
                };
                match type_name {
                    Some(type_name) => {
                        let repr = match map.remove("__repr__") {
                            Some(serde_json::Value::String(repr)) => Some(repr),
                            _ => None,
                        };
                        Value::Opaque { type_name, repr }
                    }
                    None => Value::Dict(
                        map.into_iter()
                            .map(|(k, v)| (k, Value::from(v)))
                            .collect(),
                    ),
                }
            }
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        serde_json::Value::deserialize(deserializer).map(Value::from)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i128::from(i))
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i128::from(i))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Exploding;

    impl ReplValue for Exploding {
        fn type_name(&self) -> String {
            "Exploding".to_string()
        }

        fn describe(&self) -> Result<String, FormatError> {
            Err(FormatError::Failed("__repr__ raised".to_string()))
        }
    }

    #[test]
    fn test_scalar_type_names() {
        assert_eq!(Value::None.type_name(), "NoneType");
        assert_eq!(Value::from(true).type_name(), "bool");
        assert_eq!(Value::from(5).type_name(), "int");
        assert_eq!(Value::from(0.5).type_name(), "float");
        assert_eq!(Value::from("hi").type_name(), "str");
        assert_eq!(Value::from(vec![1, 2]).type_name(), "list");
        assert_eq!(Value::Dict(vec![]).type_name(), "dict");
        assert_eq!(Value::opaque("DataFrame", "df").type_name(), "DataFrame");
    }

    #[test]
    fn test_python_like_repr() {
        assert_eq!(Value::None.describe().unwrap(), "None");
        assert_eq!(Value::from(false).describe().unwrap(), "False");
        assert_eq!(Value::from(-42).describe().unwrap(), "-42");
        assert_eq!(Value::from(5.0).describe().unwrap(), "5.0");
        assert_eq!(Value::from(0.25).describe().unwrap(), "0.25");
        assert_eq!(Value::from("hello").describe().unwrap(), "'hello'");
        assert_eq!(
            Value::List(vec![Value::from(1), Value::from("a"), Value::None])
                .describe()
                .unwrap(),
            "[1, 'a', None]"
        );
        assert_eq!(
            Value::Dict(vec![
                ("k".to_string(), Value::from(1)),
                ("v".to_string(), Value::from(vec!["x"])),
            ])
            .describe()
            .unwrap(),
            "{'k': 1, 'v': ['x']}"
        );
    }

    #[test]
    fn test_float_repr_special_cases() {
        assert_eq!(float_repr(f64::NAN), "nan");
        assert_eq!(float_repr(f64::INFINITY), "inf");
        assert_eq!(float_repr(f64::NEG_INFINITY), "-inf");
        assert_eq!(float_repr(1e16), "1e+16");
        assert_eq!(float_repr(1e-5), "1e-05");
    }

    #[test]
    fn test_str_repr_quoting() {
        assert_eq!(str_repr("it's"), "\"it's\"");
        assert_eq!(str_repr("say \"hi\" it's"), "'say \"hi\" it\\'s'");
        assert_eq!(str_repr("a\nb\\c"), "'a\\nb\\\\c'");
        assert_eq!(str_repr("héllo"), "'héllo'");
    }

    #[test]
    fn test_unrepresentable_opaque_fails() {
        let value = Value::unrepresentable("Socket");
        assert_eq!(
            value.describe(),
            Err(FormatError::Unrepresentable("Socket".to_string()))
        );
    }

    #[test]
    fn test_failing_element_fails_container() {
        let list = Value::List(vec![Value::from(1), Value::custom(Exploding)]);
        assert!(list.describe().is_err());
        assert_eq!(Value::custom(Exploding).type_name(), "Exploding");
    }

    #[test]
    fn test_from_json() {
        let raw = serde_json::json!({
            "n": 3,
            "f": 1.5,
            "s": "x",
            "l": [null, true],
            "frame": {"__type__": "DataFrame", "__repr__": "<DataFrame 3x2>"},
            "sock": {"__type__": "socket"},
        });
        let Value::Dict(entries) = Value::from(raw) else {
            panic!("expected dict");
        };
        let names: Vec<&str> = entries.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(names, vec!["n", "f", "s", "l", "frame", "sock"]);
        assert_eq!(entries[0].1.type_name(), "int");
        assert_eq!(entries[1].1.type_name(), "float");
        assert_eq!(entries[3].1.describe().unwrap(), "[None, True]");
        assert_eq!(entries[4].1.type_name(), "DataFrame");
        assert_eq!(entries[4].1.describe().unwrap(), "<DataFrame 3x2>");
        assert!(entries[5].1.describe().is_err());
    }

    #[test]
    fn test_json_integers_beyond_i64_stay_int() {
        let raw: serde_json::Value =
            serde_json::from_str("[18446744073709551615, -9223372036854775808]").unwrap();
        let Value::List(items) = Value::from(raw) else {
            panic!("expected list");
        };
        assert_eq!(items[0].type_name(), "int");
        assert_eq!(items[0].describe().unwrap(), "18446744073709551615");
        assert_eq!(items[1].describe().unwrap(), "-9223372036854775808");
    }
}
