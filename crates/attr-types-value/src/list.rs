//! The foundational ordered container.

use crate::value::Value;

/// An ordered collection of values.
///
/// This is the canonical representation produced by coercion; a bare
/// [`Value::Sequence`] becomes an `OrderedList` once it is wrapped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderedList {
    items: Vec<Value>,
}

impl OrderedList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.items.get(index)
    }

    pub fn first(&self) -> Option<&Value> {
        self.items.first()
    }

    pub fn last(&self) -> Option<&Value> {
        self.items.last()
    }

    pub fn push(&mut self, value: impl Into<Value>) {
        self.items.push(value.into());
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[Value] {
        &self.items
    }

    pub fn into_vec(self) -> Vec<Value> {
        self.items
    }

    /// Consume the list, applying a fallible `f` to every element in order.
    ///
    /// Stops at the first error.
    pub fn try_map<F, E>(self, f: F) -> Result<OrderedList, E>
    where
        F: FnMut(Value) -> Result<Value, E>,
    {
        self.items.into_iter().map(f).collect()
    }
}

impl From<Vec<Value>> for OrderedList {
    fn from(items: Vec<Value>) -> Self {
        Self { items }
    }
}

impl FromIterator<Value> for OrderedList {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for OrderedList {
    type Item = Value;
    type IntoIter = std::vec::IntoIter<Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a OrderedList {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
