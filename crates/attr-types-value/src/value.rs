//! The tagged value representation.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::file::FileHandle;
use crate::list::OrderedList;

/// A value as seen by the type layer.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Undef,
    Bool(bool),
    Int(i64),
    Num(f64),
    Str(String),
    /// A bare sequence literal, not wrapped in any container type.
    Sequence(Vec<Value>),
    Map(BTreeMap<String, Value>),
    /// An instance of the foundational ordered container.
    List(OrderedList),
    /// An instance of the foundational file handle.
    File(FileHandle),
}

/// Variant tag of a [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    Undef,
    Bool,
    Int,
    Num,
    Str,
    Sequence,
    Map,
    List,
    File,
}

impl ValueKind {
    /// All kinds, in declaration order.
    pub const ALL: [ValueKind; 9] = [
        ValueKind::Undef,
        ValueKind::Bool,
        ValueKind::Int,
        ValueKind::Num,
        ValueKind::Str,
        ValueKind::Sequence,
        ValueKind::Map,
        ValueKind::List,
        ValueKind::File,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ValueKind::Undef => "undef",
            ValueKind::Bool => "bool",
            ValueKind::Int => "int",
            ValueKind::Num => "num",
            ValueKind::Str => "str",
            ValueKind::Sequence => "sequence",
            ValueKind::Map => "map",
            ValueKind::List => "ordered list",
            ValueKind::File => "file handle",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Undef => ValueKind::Undef,
            Value::Bool(_) => ValueKind::Bool,
            Value::Int(_) => ValueKind::Int,
            Value::Num(_) => ValueKind::Num,
            Value::Str(_) => ValueKind::Str,
            Value::Sequence(_) => ValueKind::Sequence,
            Value::Map(_) => ValueKind::Map,
            Value::List(_) => ValueKind::List,
            Value::File(_) => ValueKind::File,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&OrderedList> {
        match self {
            Value::List(list) => Some(list),
            _ => None,
        }
    }

    pub fn as_file(&self) -> Option<&FileHandle> {
        match self {
            Value::File(file) => Some(file),
            _ => None,
        }
    }

    /// Elements of this value, if it is a container of exactly `kind`.
    ///
    /// A plain sequence is not an ordered list and vice versa; asking for
    /// the elements of the wrong container kind yields `None`.
    pub fn elements_of(&self, kind: ValueKind) -> Option<&[Value]> {
        match (self, kind) {
            (Value::Sequence(items), ValueKind::Sequence) => Some(items),
            (Value::List(list), ValueKind::List) => Some(list.as_slice()),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undef => f.write_str("undef"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::Num(n) => write!(f, "{}", n),
            Value::Str(s) => write!(f, "{:?}", s),
            Value::Sequence(items) => {
                f.write_str("[")?;
                write_items(f, items)?;
                f.write_str("]")
            }
            Value::Map(map) => {
                f.write_str("{")?;
                for (i, (key, value)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{:?}: {}", key, value)?;
                }
                f.write_str("}")
            }
            Value::List(list) => {
                f.write_str("OrderedList(")?;
                write_items(f, list.as_slice())?;
                f.write_str(")")
            }
            Value::File(file) => write!(f, "FileHandle({})", file),
        }
    }
}

fn write_items(f: &mut fmt::Formatter<'_>, items: &[Value]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Num(n)
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

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Sequence(items)
    }
}

impl From<OrderedList> for Value {
    fn from(list: OrderedList) -> Self {
        Value::List(list)
    }
}

impl From<FileHandle> for Value {
    fn from(file: FileHandle) -> Self {
        Value::File(file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_tags() {
        assert_eq!(Value::Undef.kind(), ValueKind::Undef);
        assert_eq!(Value::from("a").kind(), ValueKind::Str);
        assert_eq!(Value::from(vec![Value::Int(1)]).kind(), ValueKind::Sequence);
        assert_eq!(Value::from(OrderedList::new()).kind(), ValueKind::List);
        assert_eq!(Value::from(FileHandle::new("a.txt")).kind(), ValueKind::File);
    }

    #[test]
    fn test_elements_of_requires_matching_container() {
        let seq = Value::Sequence(vec![Value::Int(1), Value::Int(2)]);
        assert_eq!(seq.elements_of(ValueKind::Sequence).map(|e| e.len()), Some(2));
        assert!(seq.elements_of(ValueKind::List).is_none());

        let list = Value::List(OrderedList::from(vec![Value::Int(1)]));
        assert_eq!(list.elements_of(ValueKind::List).map(|e| e.len()), Some(1));
        assert!(list.elements_of(ValueKind::Sequence).is_none());

        assert!(Value::from("x").elements_of(ValueKind::Sequence).is_none());
    }

    #[test]
    fn test_display() {
        let value = Value::Sequence(vec![Value::Int(1), Value::from("x")]);
        assert_eq!(value.to_string(), "[1, \"x\"]");

        let list = Value::List(OrderedList::from(vec![Value::File(FileHandle::new("a.txt"))]));
        assert_eq!(list.to_string(), "OrderedList(FileHandle(a.txt))");
    }
}
