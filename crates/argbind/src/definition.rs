//! Argument descriptors and the ordered definition sets built from them.

use std::collections::HashSet;

use crate::error::DefinitionError;
use crate::value::{ArgType, Value};

/// Metadata for one bindable field.
#[derive(Debug, Clone, PartialEq)]
pub struct ArgDef {
    name: String,
    long: String,
    short: Option<String>,
    ty: ArgType,
    default: Option<Value>,
}

impl ArgDef {
    /// Internal field name. Keys the bound map handed to hydration.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Long name without dashes. Keys binding.
    pub fn long(&self) -> &str {
        &self.long
    }

    pub fn short(&self) -> Option<&str> {
        self.short.as_deref()
    }

    pub fn ty(&self) -> ArgType {
        self.ty
    }

    pub fn default_value(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    /// Arguments without a default must appear on the command line.
    pub fn required(&self) -> bool {
        self.default.is_none()
    }
}

/// Create an argument descriptor builder.
///
/// The long name defaults to `name`.
///
/// # Example
///
/// ```
/// use argbind::{ArgType, Value, arg};
///
/// let def = arg("int", ArgType::Integer)
///     .short("i")
///     .default_value(Value::Integer(0))
///     .build();
/// assert_eq!(def.long(), "int");
/// assert_eq!(def.short(), Some("i"));
/// ```
pub fn arg(name: impl Into<String>, ty: ArgType) -> ArgBuilder {
    ArgBuilder::new(name, ty)
}

/// Builder for `ArgDef`.
#[derive(Debug, Clone)]
pub struct ArgBuilder {
    name: String,
    long: Option<String>,
    short: Option<String>,
    ty: ArgType,
    default: Option<Value>,
}

impl ArgBuilder {
    pub fn new(name: impl Into<String>, ty: ArgType) -> Self {
        Self {
            name: name.into(),
            long: None,
            short: None,
            ty,
            default: None,
        }
    }

    pub fn long(mut self, long: impl Into<String>) -> Self {
        self.long = Some(long.into());
        self
    }

    pub fn short(mut self, short: impl Into<String>) -> Self {
        self.short = Some(short.into());
        self
    }

    pub fn default_value(mut self, value: Value) -> Self {
        self.default = Some(value);
        self
    }

    pub fn build(self) -> ArgDef {
        let long = self
            .long
            .as_deref()
            .map(strip_dashes)
            .unwrap_or_else(|| strip_dashes(&self.name));
        ArgDef {
            short: self.short.as_deref().map(strip_dashes),
            name: self.name,
            long,
            ty: self.ty,
            default: self.default,
        }
    }
}

fn strip_dashes(raw: &str) -> String {
    raw.trim().trim_start_matches('-').to_string()
}

/// An ordered set of argument descriptors for one target type, plus the
/// post-load hooks its hydrator runs.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Definition {
    args: Vec<ArgDef>,
    post_load: Vec<String>,
}

impl Definition {
    /// Validate `args` and build a definition set.
    pub fn new(args: Vec<ArgDef>) -> Result<Self, DefinitionError> {
        validate(&args)?;
        Ok(Self {
            args,
            post_load: Vec::new(),
        })
    }

    pub fn builder() -> DefinitionBuilder {
        DefinitionBuilder::default()
    }

    /// Descriptors in declaration order.
    pub fn args(&self) -> &[ArgDef] {
        &self.args
    }

    /// Names of post-load hooks, in invocation order.
    pub fn post_load(&self) -> &[String] {
        &self.post_load
    }

    pub fn find_long(&self, long: &str) -> Option<&ArgDef> {
        self.args.iter().find(|a| a.long == long)
    }

    /// Declared defaults keyed by internal name.
    pub fn defaults(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.args
            .iter()
            .filter_map(|a| a.default.as_ref().map(|v| (a.name.as_str(), v)))
    }
}

fn validate(args: &[ArgDef]) -> Result<(), DefinitionError> {
    let mut names: HashSet<&str> = HashSet::new();
    let mut longs: HashSet<&str> = HashSet::new();
    let mut shorts: HashSet<&str> = HashSet::new();

    for a in args {
        if a.name.is_empty() || a.long.is_empty() || a.short.as_deref() == Some("") {
            return Err(DefinitionError::EmptyName);
        }
        if !names.insert(a.name.as_str()) {
            return Err(DefinitionError::DuplicateName(a.name.clone()));
        }
        if !longs.insert(a.long.as_str()) {
            return Err(DefinitionError::DuplicateLong(a.long.clone()));
        }
        if let Some(short) = a.short.as_deref() {
            if !shorts.insert(short) {
                return Err(DefinitionError::DuplicateShort(short.to_string()));
            }
        }
        if let Some(default) = &a.default {
            if default.ty() != a.ty {
                return Err(DefinitionError::DefaultTypeMismatch {
                    name: a.name.clone(),
                    expected: a.ty,
                    actual: default.ty(),
                });
            }
        }
    }

    // Shorts may refer to longs declared later, so check once every long is known.
    for a in args {
        if let Some(short) = a.short.as_deref() {
            if longs.contains(short) {
                return Err(DefinitionError::ShortShadowsLong {
                    name: a.name.clone(),
                    short: short.to_string(),
                });
            }
        }
    }

    Ok(())
}

/// Builder for `Definition`.
#[derive(Debug, Clone, Default)]
pub struct DefinitionBuilder {
    args: Vec<ArgDef>,
    post_load: Vec<String>,
}

impl DefinitionBuilder {
    pub fn arg(mut self, arg: ArgBuilder) -> Self {
        self.args.push(arg.build());
        self
    }

    pub fn post_load(mut self, hook: impl Into<String>) -> Self {
        self.post_load.push(hook.into());
        self
    }

    pub fn build(self) -> Result<Definition, DefinitionError> {
        let mut def = Definition::new(self.args)?;
        def.post_load = self.post_load;
        Ok(def)
    }
}

#[cfg(test)]
mod tests {
    use super::{Definition, arg};
    use crate::error::DefinitionError;
    use crate::value::{ArgType, Value};

    #[test]
    fn builder_strips_dashes_and_defaults_long_to_name() {
        let def = arg("int", ArgType::Integer).short("-i").build();
        assert_eq!(def.name(), "int");
        assert_eq!(def.long(), "int");
        assert_eq!(def.short(), Some("i"));
        assert!(def.required());

        let def = arg("verbose", ArgType::Boolean).long("--loud").build();
        assert_eq!(def.long(), "loud");
        assert_eq!(def.short(), None);
    }

    #[test]
    fn defaults_are_keyed_by_internal_name() {
        let def = Definition::builder()
            .arg(arg("int", ArgType::Integer).long("integer").default_value(Value::Integer(0)))
            .arg(arg("about", ArgType::String))
            .post_load("calculate")
            .build()
            .unwrap();
        let defaults: Vec<_> = def.defaults().collect();
        assert_eq!(defaults, vec![("int", &Value::Integer(0))]);
        assert_eq!(def.post_load(), ["calculate".to_string()]);
        assert!(def.find_long("integer").is_some());
        assert!(def.find_long("int").is_none());
    }

    #[test]
    fn rejects_duplicate_internal_names() {
        let err = Definition::builder()
            .arg(arg("a", ArgType::String).long("first"))
            .arg(arg("a", ArgType::String).long("second"))
            .build()
            .unwrap_err();
        assert_eq!(err, DefinitionError::DuplicateName("a".to_string()));
    }

    #[test]
    fn rejects_duplicate_long_names() {
        let err = Definition::builder()
            .arg(arg("a", ArgType::String).long("same"))
            .arg(arg("b", ArgType::String).long("same"))
            .build()
            .unwrap_err();
        assert_eq!(err, DefinitionError::DuplicateLong("same".to_string()));
    }

    #[test]
    fn rejects_duplicate_short_names() {
        let err = Definition::builder()
            .arg(arg("a", ArgType::String).short("x"))
            .arg(arg("b", ArgType::String).short("x"))
            .build()
            .unwrap_err();
        assert_eq!(err, DefinitionError::DuplicateShort("x".to_string()));
    }

    #[test]
    fn rejects_short_that_matches_a_later_long() {
        let err = Definition::builder()
            .arg(arg("about", ArgType::String).short("b"))
            .arg(arg("b", ArgType::String))
            .build()
            .unwrap_err();
        match err {
            DefinitionError::ShortShadowsLong { name, short } => {
                assert_eq!(name, "about");
                assert_eq!(short, "b");
            }
            other => panic!("expected ShortShadowsLong, got: {other:?}"),
        }
    }

    #[test]
    fn rejects_mistyped_default() {
        let err = Definition::builder()
            .arg(arg("float", ArgType::Float).default_value(Value::Integer(3)))
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            DefinitionError::DefaultTypeMismatch {
                name: "float".to_string(),
                expected: ArgType::Float,
                actual: ArgType::Integer,
            }
        );
    }

    #[test]
    fn rejects_empty_names() {
        let err = Definition::builder()
            .arg(arg("--", ArgType::Boolean))
            .build()
            .unwrap_err();
        assert_eq!(err, DefinitionError::EmptyName);
    }
}
