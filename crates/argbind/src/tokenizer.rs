//! Syntactic normalization of argv into a name → raw value map.
//!
//! Only `--name[=value]` and `-n[=value]` tokens are recognized. A switch never
//! consumes the following token, so `--output out.txt` is a bare `output`
//! switch followed by an ignored positional. Tokens without a leading dash are
//! skipped, which lets a leading command word pass through untouched.

use indexmap::IndexMap;
use indexmap::map::Iter;

/// One occurrence of a switch on the command line.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Token {
    /// The switch appeared without `=value`.
    Present,
    Value(String),
}

impl Token {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Present => None,
            Self::Value(s) => Some(s.as_str()),
        }
    }
}

static PRESENT: Token = Token::Present;

/// Every occurrence of one name, in argv order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawValue {
    One(Token),
    Many(Vec<Token>),
}

impl RawValue {
    fn push(&mut self, token: Token) {
        match self {
            Self::One(first) => {
                let first = std::mem::replace(first, Token::Present);
                *self = Self::Many(vec![first, token]);
            }
            Self::Many(tokens) => tokens.push(token),
        }
    }

    /// The most recent occurrence.
    pub fn last(&self) -> &Token {
        match self {
            Self::One(token) => token,
            // `Many` is only ever built from two or more tokens.
            Self::Many(tokens) => tokens.last().unwrap_or(&PRESENT),
        }
    }

    pub fn occurrences(&self) -> usize {
        match self {
            Self::One(_) => 1,
            Self::Many(tokens) => tokens.len(),
        }
    }
}

/// Raw arguments keyed by the name as typed (long or short, without dashes).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawArgs {
    entries: IndexMap<String, RawValue>,
}

impl RawArgs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&RawValue> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Names in order of first occurrence.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> Iter<'_, String, RawValue> {
        self.entries.iter()
    }

    /// Record one more occurrence of `name`.
    pub fn push(&mut self, name: impl Into<String>, token: Token) {
        let name = name.into();
        match self.entries.get_mut(&name) {
            Some(existing) => existing.push(token),
            None => {
                self.entries.insert(name, RawValue::One(token));
            }
        }
    }

    pub(crate) fn remove(&mut self, name: &str) -> Option<RawValue> {
        self.entries.shift_remove(name)
    }

    pub(crate) fn insert(&mut self, name: String, value: RawValue) {
        self.entries.insert(name, value);
    }
}

impl<'a> IntoIterator for &'a RawArgs {
    type Item = (&'a String, &'a RawValue);
    type IntoIter = Iter<'a, String, RawValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Tokenize arguments that follow the program name.
///
/// This never fails: any sequence of strings produces some `RawArgs`.
pub fn tokenize<I, S>(args: I) -> RawArgs
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut raw = RawArgs::new();
    for arg in args {
        let arg = arg.as_ref();
        match split_switch(arg) {
            Some((name, token)) => {
                tracing::trace!(arg, name, "switch");
                raw.push(name, token);
            }
            None => tracing::trace!(arg, "skipping non-switch token"),
        }
    }
    raw
}

fn split_switch(arg: &str) -> Option<(&str, Token)> {
    let entry = arg
        .strip_prefix("--")
        .or_else(|| arg.strip_prefix('-'))?;
    Some(match entry.split_once('=') {
        Some((name, value)) => (name, Token::Value(value.to_string())),
        None => (entry, Token::Present),
    })
}
