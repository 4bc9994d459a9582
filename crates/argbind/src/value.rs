//! Declared argument types and the typed values bound to them.

use std::fmt;

/// The type an argument is declared with. Drives coercion in the binder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArgType {
    String,
    Integer,
    Float,
    Boolean,
    StringList,
}

impl ArgType {
    pub const ALL: [ArgType; 5] = [
        ArgType::String,
        ArgType::Integer,
        ArgType::Float,
        ArgType::Boolean,
        ArgType::StringList,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Boolean => "boolean",
            Self::StringList => "string-list",
        }
    }

    /// Look up a type by the name returned from [`ArgType::as_str`].
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == name)
    }
}

impl fmt::Display for ArgType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A coerced, strongly-typed argument value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    StringList(Vec<String>),
}

impl Value {
    pub fn ty(&self) -> ArgType {
        match self {
            Self::String(_) => ArgType::String,
            Self::Integer(_) => ArgType::Integer,
            Self::Float(_) => ArgType::Float,
            Self::Boolean(_) => ArgType::Boolean,
            Self::StringList(_) => ArgType::StringList,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Self::StringList(v) => Some(v.as_slice()),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => f.write_str(s),
            Self::Integer(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Boolean(v) => write!(f, "{v}"),
            Self::StringList(v) => write!(f, "[{}]", v.join(", ")),
        }
    }
}

/// Rust types a struct field can have when it is bound from the command line.
///
/// `TYPE` is what the derive macro records in the field's [`ArgDef`](crate::ArgDef).
pub trait ArgValue: Sized {
    const TYPE: ArgType;

    /// Extract `Self` from a bound value, or `None` if the variant differs.
    fn from_value(value: Value) -> Option<Self>;

    fn into_value(self) -> Value;
}

impl ArgValue for String {
    const TYPE: ArgType = ArgType::String;

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    fn into_value(self) -> Value {
        Value::String(self)
    }
}

impl ArgValue for i64 {
    const TYPE: ArgType = ArgType::Integer;

    fn from_value(value: Value) -> Option<Self> {
        value.as_i64()
    }

    fn into_value(self) -> Value {
        Value::Integer(self)
    }
}

impl ArgValue for f64 {
    const TYPE: ArgType = ArgType::Float;

    fn from_value(value: Value) -> Option<Self> {
        value.as_f64()
    }

    fn into_value(self) -> Value {
        Value::Float(self)
    }
}

impl ArgValue for bool {
    const TYPE: ArgType = ArgType::Boolean;

    fn from_value(value: Value) -> Option<Self> {
        value.as_bool()
    }

    fn into_value(self) -> Value {
        Value::Boolean(self)
    }
}

impl ArgValue for Vec<String> {
    const TYPE: ArgType = ArgType::StringList;

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::StringList(v) => Some(v),
            _ => None,
        }
    }

    fn into_value(self) -> Value {
        Value::StringList(self)
    }
}
