//! JSON description of argbind definition sets.
//!
//! The types here mirror `argbind::Definition` and `argbind::ArgDef`, and are
//! used for:
//! - describing a definition set outside Rust (the `argbind` CLI reads these)
//! - exporting a derived definition for tooling
//!
//! The JSON encodings of raw and bound argument maps live here too, so every
//! consumer renders them the same way.

use argbind::{ArgType, BoundArgs, Definition, DefinitionError, RawArgs, RawValue, Token, Value};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as Json};
use thiserror::Error;

pub const FORMAT_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("failed to parse definition schema JSON")]
    Json(#[from] serde_json::Error),

    #[error("unsupported definition schema format-version {0} (expected 1)")]
    UnsupportedVersion(u32),

    #[error("default for '{name}' is not a valid {expected}: {found}")]
    InvalidDefault {
        name: String,
        expected: ArgType,
        found: Json,
    },

    #[error(transparent)]
    Definition(#[from] DefinitionError),
}

/// Declared type of an argument, as spelled in JSON.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SchemaType {
    #[default]
    String,
    Integer,
    Float,
    Boolean,
    StringList,
}

impl From<SchemaType> for ArgType {
    fn from(t: SchemaType) -> Self {
        match t {
            SchemaType::String => ArgType::String,
            SchemaType::Integer => ArgType::Integer,
            SchemaType::Float => ArgType::Float,
            SchemaType::Boolean => ArgType::Boolean,
            SchemaType::StringList => ArgType::StringList,
        }
    }
}

impl From<ArgType> for SchemaType {
    fn from(t: ArgType) -> Self {
        match t {
            ArgType::String => SchemaType::String,
            ArgType::Integer => SchemaType::Integer,
            ArgType::Float => SchemaType::Float,
            ArgType::Boolean => SchemaType::Boolean,
            ArgType::StringList => SchemaType::StringList,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct ArgSchema {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub long: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short: Option<String>,
    #[serde(rename = "type", default)]
    pub value_type: SchemaType,
    /// Interpreted according to `type`; absent means the argument is required.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Json>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct DefinitionSchema {
    #[serde(default = "default_format_version")]
    pub format_version: u32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<ArgSchema>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub post_load: Vec<String>,
}

fn default_format_version() -> u32 {
    FORMAT_VERSION
}

impl Default for DefinitionSchema {
    fn default() -> Self {
        Self {
            format_version: FORMAT_VERSION,
            args: Vec::new(),
            post_load: Vec::new(),
        }
    }
}

impl DefinitionSchema {
    pub fn from_json(raw: &str) -> Result<Self, SchemaError> {
        let schema: Self = serde_json::from_str(raw)?;
        if schema.format_version != FORMAT_VERSION {
            return Err(SchemaError::UnsupportedVersion(schema.format_version));
        }
        Ok(schema)
    }

    pub fn to_json_pretty(&self) -> Result<String, SchemaError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Describe an existing definition set, e.g. one produced by `#[derive(Args)]`.
    pub fn from_definition(def: &Definition) -> Self {
        Self {
            format_version: FORMAT_VERSION,
            args: def
                .args()
                .iter()
                .map(|a| ArgSchema {
                    name: a.name().to_string(),
                    long: (a.long() != a.name()).then(|| a.long().to_string()),
                    short: a.short().map(str::to_string),
                    value_type: a.ty().into(),
                    default: a.default_value().map(value_to_json),
                })
                .collect(),
            post_load: def.post_load().to_vec(),
        }
    }

    /// Build and validate the definition set this schema describes.
    pub fn to_definition(&self) -> Result<Definition, SchemaError> {
        let mut builder = Definition::builder();
        for a in &self.args {
            let ty = ArgType::from(a.value_type);
            let mut arg = argbind::arg(a.name.clone(), ty);
            if let Some(long) = &a.long {
                arg = arg.long(long.clone());
            }
            if let Some(short) = &a.short {
                arg = arg.short(short.clone());
            }
            if let Some(default) = &a.default {
                arg = arg.default_value(default_from_json(&a.name, ty, default)?);
            }
            builder = builder.arg(arg);
        }
        for hook in &self.post_load {
            builder = builder.post_load(hook.clone());
        }
        Ok(builder.build()?)
    }
}

fn default_from_json(name: &str, ty: ArgType, json: &Json) -> Result<Value, SchemaError> {
    let value = match ty {
        ArgType::String => json.as_str().map(|s| Value::String(s.to_string())),
        ArgType::Integer => json.as_i64().map(Value::Integer),
        ArgType::Float => json.as_f64().map(Value::Float),
        ArgType::Boolean => json.as_bool().map(Value::Boolean),
        ArgType::StringList => json.as_array().and_then(|items| {
            items
                .iter()
                .map(|i| i.as_str().map(str::to_string))
                .collect::<Option<Vec<_>>>()
                .map(Value::StringList)
        }),
    };
    value.ok_or_else(|| SchemaError::InvalidDefault {
        name: name.to_string(),
        expected: ty,
        found: json.clone(),
    })
}

pub fn value_to_json(value: &Value) -> Json {
    match value {
        Value::String(s) => Json::from(s.as_str()),
        Value::Integer(v) => Json::from(*v),
        // Non-finite floats have no JSON form and become `null`.
        Value::Float(v) => Json::from(*v),
        Value::Boolean(v) => Json::from(*v),
        Value::StringList(v) => Json::from(v.clone()),
    }
}

fn token_to_json(token: &Token) -> Json {
    match token {
        Token::Present => Json::Bool(true),
        Token::Value(s) => Json::from(s.as_str()),
    }
}

/// Raw map as JSON: a bare switch is `true`, repeats become arrays.
pub fn raw_to_json(raw: &RawArgs) -> Json {
    let map: Map<String, Json> = raw
        .iter()
        .map(|(name, value)| {
            let json = match value {
                RawValue::One(token) => token_to_json(token),
                RawValue::Many(tokens) => Json::Array(tokens.iter().map(token_to_json).collect()),
            };
            (name.clone(), json)
        })
        .collect();
    Json::Object(map)
}

/// Bound map as JSON, keyed by internal field name.
pub fn bound_to_json(bound: &BoundArgs) -> Json {
    let map: Map<String, Json> = bound
        .iter()
        .map(|(name, value)| (name.clone(), value_to_json(value)))
        .collect();
    Json::Object(map)
}
