//! Resolve tokenized arguments against a definition set.
//!
//! The steps run in a fixed order and stop at the first error:
//! 1) alias resolution (short name → long name)
//! 2) unknown-name check
//! 3) per descriptor, in declaration order: default or coercion

use crate::bound::BoundArgs;
use crate::definition::{ArgDef, Definition};
use crate::error::{ParseError, ParseResult, Shape};
use crate::tokenizer::{RawArgs, RawValue, Token};
use crate::value::{ArgType, Value};

/// Values that bind a boolean to `true`, compared ASCII case-insensitively.
const TRUTHY: [&str; 4] = ["1", "true", "yes", "on"];

/// Bind `raw` against `def`.
pub fn bind(raw: RawArgs, def: &Definition) -> ParseResult<BoundArgs> {
    let raw = resolve_aliases(raw, def)?;
    validate_names(&raw, def)?;
    coerce_all(raw, def)
}

/// Move short-keyed entries to their long name.
///
/// Supplying both forms of one argument is a `ConflictingAlias`.
pub fn resolve_aliases(mut raw: RawArgs, def: &Definition) -> ParseResult<RawArgs> {
    for arg in def.args() {
        let Some(short) = arg.short() else {
            continue;
        };
        if !raw.contains(short) {
            continue;
        }
        if raw.contains(arg.long()) {
            return Err(ParseError::ConflictingAlias {
                long: arg.long().to_string(),
                short: short.to_string(),
            });
        }
        if let Some(value) = raw.remove(short) {
            tracing::debug!(short, long = arg.long(), "resolved short alias");
            raw.insert(arg.long().to_string(), value);
        }
    }
    Ok(raw)
}

/// Fail with every name that matches no descriptor's long name.
pub fn validate_names(raw: &RawArgs, def: &Definition) -> ParseResult<()> {
    let unknown: Vec<String> = raw
        .names()
        .filter(|name| def.find_long(name).is_none())
        .map(str::to_string)
        .collect();
    if unknown.is_empty() {
        return Ok(());
    }
    tracing::debug!(?unknown, "unknown arguments");
    Err(ParseError::UnknownArguments { names: unknown })
}

/// Apply defaults and coerce every descriptor, in declaration order.
pub fn coerce_all(mut raw: RawArgs, def: &Definition) -> ParseResult<BoundArgs> {
    let mut bound = BoundArgs::default();
    for arg in def.args() {
        let value = match raw.remove(arg.long()) {
            Some(input) => coerce(arg, input)?,
            None => match arg.default_value() {
                Some(default) => default.clone(),
                None => {
                    return Err(ParseError::MissingArgument {
                        long: arg.long().to_string(),
                        short: arg.short().map(str::to_string),
                    });
                }
            },
        };
        bound.insert(arg.name().to_string(), value);
    }
    Ok(bound)
}

/// Coerce one raw input to the descriptor's declared type.
pub fn coerce(arg: &ArgDef, input: RawValue) -> ParseResult<Value> {
    let mismatch = |input: &RawValue| ParseError::TypeMismatch {
        name: arg.long().to_string(),
        expected: arg.ty(),
        actual: Shape::of(input),
    };

    let value = match (arg.ty(), &input) {
        (ArgType::Boolean, RawValue::One(Token::Present)) => Some(Value::Boolean(true)),
        (ArgType::Boolean, RawValue::One(Token::Value(s))) => Some(Value::Boolean(is_truthy(s))),
        (ArgType::String, RawValue::One(Token::Value(s))) => Some(Value::String(s.clone())),
        (ArgType::Integer, RawValue::One(Token::Value(s))) => parse_integer(s).map(Value::Integer),
        (ArgType::Float, RawValue::One(Token::Value(s))) => parse_float(s).map(Value::Float),
        (ArgType::StringList, RawValue::One(Token::Value(s))) => {
            Some(Value::StringList(vec![s.clone()]))
        }
        (ArgType::StringList, RawValue::Many(tokens)) => tokens
            .iter()
            .map(|t| t.as_str().map(str::to_string))
            .collect::<Option<Vec<_>>>()
            .map(Value::StringList),
        _ => None,
    };

    value.ok_or_else(|| mismatch(&input))
}

pub fn is_truthy(s: &str) -> bool {
    TRUTHY.iter().any(|t| t.eq_ignore_ascii_case(s))
}

/// Parse a numeric string whose value has no fractional part.
///
/// `"5"` and `"5.0"` both yield 5; `"5.5"` and out-of-range values yield `None`.
pub fn parse_integer(s: &str) -> Option<i64> {
    if !is_numeric(s) {
        return None;
    }
    if let Ok(v) = s.parse::<i64>() {
        return Some(v);
    }
    let f = s.parse::<f64>().ok()?;
    // 2^63 is exactly representable, so the bounds are exact.
    let in_range = (-9_223_372_036_854_775_808.0..9_223_372_036_854_775_808.0).contains(&f);
    if f.fract() != 0.0 || !in_range {
        return None;
    }
    Some(f as i64)
}

/// Parse a numeric string into a finite float.
pub fn parse_float(s: &str) -> Option<f64> {
    if !is_numeric(s) {
        return None;
    }
    s.parse::<f64>().ok().filter(|f| f.is_finite())
}

/// `[+-]? (digits ['.' digits*] | '.' digits) ([eE] [+-]? digits)?`
pub fn is_numeric(s: &str) -> bool {
    let bytes = s.as_bytes();
    let mut i = 0usize;

    let digits = |i: &mut usize| {
        let start = *i;
        while *i < bytes.len() && bytes[*i].is_ascii_digit() {
            *i += 1;
        }
        *i - start
    };

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        i += 1;
    }
    let mut mantissa = digits(&mut i);
    if i < bytes.len() && bytes[i] == b'.' {
        i += 1;
        mantissa += digits(&mut i);
    }
    if mantissa == 0 {
        return false;
    }
    if i < bytes.len() && matches!(bytes[i], b'e' | b'E') {
        i += 1;
        if i < bytes.len() && matches!(bytes[i], b'+' | b'-') {
            i += 1;
        }
        if digits(&mut i) == 0 {
            return false;
        }
    }
    i == bytes.len()
}
