use indexmap::IndexMap;
use indexmap::map::Iter;

use crate::error::{ParseError, ParseResult};
use crate::value::{ArgValue, Value};

/// Coerced values keyed by internal field name, one per descriptor.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoundArgs {
    values: IndexMap<String, Value>,
}

impl BoundArgs {
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> Iter<'_, String, Value> {
        self.values.iter()
    }

    /// Remove `name` and convert it into the field type `T`.
    pub fn take<T: ArgValue>(&mut self, name: &str) -> ParseResult<T> {
        let value = self
            .values
            .shift_remove(name)
            .ok_or_else(|| ParseError::Hydration {
                name: name.to_string(),
                reason: "no bound value".to_string(),
            })?;
        let actual = value.ty();
        T::from_value(value).ok_or_else(|| ParseError::Hydration {
            name: name.to_string(),
            reason: format!("expected {}, bound {actual}", T::TYPE),
        })
    }

    pub fn into_inner(self) -> IndexMap<String, Value> {
        self.values
    }

    pub(crate) fn insert(&mut self, name: String, value: Value) {
        self.values.insert(name, value);
    }
}

impl<'a> IntoIterator for &'a BoundArgs {
    type Item = (&'a String, &'a Value);
    type IntoIter = Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

impl FromIterator<(String, Value)> for BoundArgs {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}
