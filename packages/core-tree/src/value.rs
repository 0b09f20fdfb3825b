//! The Value type - a tree of mappings, sequences, and leaves.
//!
//! Children are held behind `Arc` so copy-on-write updates can share every
//! subtree they do not touch.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::PathPart;

/// How far past the end of an array an index may reach before the array is
/// turned into a map instead of being padded with `Null`.
pub const MAX_ARRAY_GAP: usize = 1024;

/// A node in an object tree.
///
/// `Map` and `Array` are branches; every other variant is a leaf. `Null` is
/// a leaf that exists, distinct from a path that does not.
///
/// # Design Notes
///
/// - Uses `BTreeMap` for deterministic key order
/// - Children are `Arc<Value>`; cloning a branch is shallow
/// - Mutation through [`Value::child_mut`] goes through `Arc::make_mut`, so a
///   subtree shared with another tree is copied before it is written
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    Bytes(Vec<u8>),
    Array(Vec<Arc<Value>>),
    Map(BTreeMap<String, Arc<Value>>),
}

impl Value {
    /// Create an empty map.
    pub fn map() -> Self {
        Value::Map(BTreeMap::new())
    }

    /// Create an empty array.
    pub fn array() -> Self {
        Value::Array(Vec::new())
    }

    /// An empty container suited to being indexed by `key`: an array when
    /// `array` is set and the key looks like an index, a map otherwise.
    pub fn container_for(key: &PathPart, array: bool) -> Self {
        if array && key.as_index().is_some() {
            Value::array()
        } else {
            Value::map()
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_map(&self) -> bool {
        matches!(self, Value::Map(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    /// True for maps and arrays.
    pub fn is_branch(&self) -> bool {
        self.is_map() || self.is_array()
    }

    /// Number of direct children. Leaves have none.
    pub fn child_count(&self) -> usize {
        match self {
            Value::Map(map) => map.len(),
            Value::Array(arr) => arr.len(),
            _ => 0,
        }
    }

    /// The child stored under `key`, if this is a branch that has one.
    pub fn child(&self, key: &PathPart) -> Option<&Arc<Value>> {
        match self {
            Value::Map(map) => map.get(key.as_key().as_ref()),
            Value::Array(arr) => arr.get(key.as_index()?),
            _ => None,
        }
    }

    /// Mutable access to the child under `key`, copying it first if it is
    /// shared with another tree.
    pub fn child_mut(&mut self, key: &PathPart) -> Option<&mut Value> {
        let child = match self {
            Value::Map(map) => map.get_mut(key.as_key().as_ref())?,
            Value::Array(arr) => arr.get_mut(key.as_index()?)?,
            _ => return None,
        };
        Some(Arc::make_mut(child))
    }

    /// True if this is a branch with a child under `key`.
    pub fn has_child(&self, key: &PathPart) -> bool {
        self.child(key).is_some()
    }

    /// Store `child` under `key`.
    ///
    /// Leaves are replaced by an empty map first. Arrays grow with `Null`
    /// padding to reach an index up to [`MAX_ARRAY_GAP`] slots past their
    /// end. A non-index key, or an index further out than that, turns the
    /// array into a map keyed by the decimal indices of its elements.
    pub fn insert_child(&mut self, key: &PathPart, child: Arc<Value>) {
        if !self.is_branch() {
            *self = Value::map();
        }

        if let Value::Array(arr) = self {
            let slot = key.as_index().filter(|index| {
                index
                    .checked_sub(arr.len())
                    .map_or(true, |gap| gap <= MAX_ARRAY_GAP)
            });
            match slot {
                Some(index) => {
                    if index >= arr.len() {
                        arr.resize_with(index + 1, || Arc::new(Value::Null));
                    }
                    arr[index] = child;
                    return;
                }
                None => {
                    log::trace!("promoting array to map for key {:?}", key);
                    self.promote_to_map();
                }
            }
        }

        if let Value::Map(map) = self {
            map.insert(key.as_key().into_owned(), child);
        }
    }

    /// Remove and return the child under `key`.
    ///
    /// Other array elements keep their indices. Removing the last element
    /// shortens the array; removing any other turns the array into a map
    /// keyed by the decimal indices of the elements that remain.
    pub fn remove_child(&mut self, key: &PathPart) -> Option<Arc<Value>> {
        if let Value::Array(arr) = self {
            let index = key.as_index()?;
            if index >= arr.len() {
                return None;
            }
            if index + 1 == arr.len() {
                return arr.pop();
            }
            log::trace!("promoting array to map to remove index {}", index);
            self.promote_to_map();
        }

        match self {
            Value::Map(map) => map.remove(key.as_key().as_ref()),
            _ => None,
        }
    }

    /// Remove every child, keeping the container kind.
    pub fn clear_children(&mut self) {
        match self {
            Value::Map(map) => map.clear(),
            Value::Array(arr) => arr.clear(),
            _ => {}
        }
    }

    /// Iterate direct children in order. Leaves yield nothing.
    pub fn entries(&self) -> Box<dyn Iterator<Item = (PathPart, &Arc<Value>)> + '_> {
        match self {
            Value::Map(map) => Box::new(
                map.iter()
                    .map(|(key, child)| (PathPart::Key(key.clone()), child)),
            ),
            Value::Array(arr) => Box::new(
                arr.iter()
                    .enumerate()
                    .map(|(index, child)| (PathPart::Index(index), child)),
            ),
            _ => Box::new(std::iter::empty()),
        }
    }

    fn promote_to_map(&mut self) {
        if let Value::Array(arr) = self {
            let map = std::mem::take(arr)
                .into_iter()
                .enumerate()
                .map(|(index, child)| (index.to_string(), child))
                .collect();
            *self = Value::Map(map);
        }
    }

    /// Copy the whole tree, sharing nothing with `self`.
    pub fn deep_clone(&self) -> Value {
        match self {
            Value::Array(arr) => Value::Array(
                arr.iter()
                    .map(|child| Arc::new(child.deep_clone()))
                    .collect(),
            ),
            Value::Map(map) => Value::Map(
                map.iter()
                    .map(|(key, child)| (key.clone(), Arc::new(child.deep_clone())))
                    .collect(),
            ),
            leaf => leaf.clone(),
        }
    }

    /// Render a leaf as a mapping key. Branches have no key form.
    pub fn to_key_string(&self) -> Option<String> {
        match self {
            Value::Null => Some("null".to_string()),
            Value::Bool(b) => Some(b.to_string()),
            Value::Integer(i) => Some(i.to_string()),
            Value::Float(f) => Some(f.to_string()),
            Value::String(s) => Some(s.clone()),
            Value::Bytes(b) => Some(String::from_utf8_lossy(b).into_owned()),
            Value::Array(_) | Value::Map(_) => None,
        }
    }
}

// Conversion from common types

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Integer(v as i64)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Bytes(v)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Value::Array(v.into_iter().map(|item| Arc::new(item.into())).collect())
    }
}

impl<T: Into<Value>> From<BTreeMap<String, T>> for Value {
    fn from(v: BTreeMap<String, T>) -> Self {
        Value::Map(
            v.into_iter()
                .map(|(key, item)| (key, Arc::new(item.into())))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use collection_literals::btree;

    fn sample() -> Value {
        Value::from(btree! {
            "name".to_string() => Value::from("Alice"),
            "scores".to_string() => Value::from(vec![90i64, 85, 95]),
        })
    }

    #[test]
    fn branch_kinds() {
        assert!(Value::map().is_branch());
        assert!(Value::array().is_branch());
        assert!(!Value::Null.is_branch());
        assert!(!Value::from("x").is_branch());
    }

    #[test]
    fn child_lookup() {
        let value = sample();
        assert_eq!(
            value.child(&PathPart::from("name")).map(|c| c.as_ref()),
            Some(&Value::from("Alice"))
        );
        let scores = value.child(&PathPart::from("scores")).unwrap();
        assert_eq!(
            scores.child(&PathPart::from("1")).map(|c| c.as_ref()),
            Some(&Value::Integer(85))
        );
        assert_eq!(
            scores.child(&PathPart::from(2usize)).map(|c| c.as_ref()),
            Some(&Value::Integer(95))
        );
        assert!(scores.child(&PathPart::from("x")).is_none());
        assert!(scores.child(&PathPart::from(3usize)).is_none());
    }

    #[test]
    fn map_lookup_by_index_uses_decimal_key() {
        let value = Value::from(btree! { "0".to_string() => Value::from(true) });
        assert!(value.has_child(&PathPart::Index(0)));
    }

    #[test]
    fn leaf_has_no_children() {
        let value = Value::from(5i64);
        assert!(value.child(&PathPart::from("a")).is_none());
        assert_eq!(value.child_count(), 0);
        assert_eq!(value.entries().count(), 0);
    }

    #[test]
    fn insert_into_leaf_makes_map() {
        let mut value = Value::Null;
        value.insert_child(&PathPart::from("a"), Arc::new(Value::from(1i64)));
        assert!(value.is_map());
        assert_eq!(value.child_count(), 1);
    }

    #[test]
    fn insert_past_end_pads_with_null() {
        let mut value = Value::array();
        value.insert_child(&PathPart::from("2"), Arc::new(Value::from("c")));
        assert_eq!(
            value,
            Value::from(vec![Value::Null, Value::Null, Value::from("c")])
        );
    }

    #[test]
    fn insert_named_key_promotes_array() {
        let mut value = Value::from(vec!["a", "b"]);
        value.insert_child(&PathPart::from("extra"), Arc::new(Value::from(true)));
        assert_eq!(
            value,
            Value::from(btree! {
                "0".to_string() => Value::from("a"),
                "1".to_string() => Value::from("b"),
                "extra".to_string() => Value::from(true),
            })
        );
    }

    #[test]
    fn remove_last_element_pops() {
        let mut value = Value::from(vec!["a", "b", "c"]);
        let removed = value.remove_child(&PathPart::from(2usize));
        assert_eq!(removed.as_deref(), Some(&Value::from("c")));
        assert_eq!(value, Value::from(vec!["a", "b"]));
        assert!(value.remove_child(&PathPart::from(9usize)).is_none());
        assert!(value.is_array());
    }

    #[test]
    fn remove_inner_element_keeps_indices() {
        let mut value = Value::from(vec!["a", "b", "c"]);
        let removed = value.remove_child(&PathPart::from("0"));
        assert_eq!(removed.as_deref(), Some(&Value::from("a")));
        assert_eq!(
            value,
            Value::from(btree! {
                "1".to_string() => Value::from("b"),
                "2".to_string() => Value::from("c"),
            })
        );
        assert!(!value.has_child(&PathPart::from(0usize)));
        assert!(value.has_child(&PathPart::from(2usize)));
    }

    #[test]
    fn remove_missing_index_leaves_array_alone() {
        let mut value = Value::from(vec!["a", "b"]);
        assert!(value.remove_child(&PathPart::from("x")).is_none());
        assert!(value.remove_child(&PathPart::from(5usize)).is_none());
        assert_eq!(value, Value::from(vec!["a", "b"]));
    }

    #[test]
    fn insert_far_index_promotes_instead_of_padding() {
        let mut value = Value::from(vec!["a"]);
        value.insert_child(
            &PathPart::from("18446744073709551615"),
            Arc::new(Value::from(true)),
        );
        assert_eq!(
            value,
            Value::from(btree! {
                "0".to_string() => Value::from("a"),
                "18446744073709551615".to_string() => Value::from(true),
            })
        );

        let mut value = Value::array();
        value.insert_child(&PathPart::from(usize::MAX), Arc::new(Value::Null));
        assert!(value.is_map());

        let mut value = Value::array();
        value.insert_child(&PathPart::from(usize::MAX / 2), Arc::new(Value::Null));
        assert!(value.is_map());
    }

    #[test]
    fn insert_within_gap_pads() {
        let mut value = Value::array();
        value.insert_child(&PathPart::from(MAX_ARRAY_GAP), Arc::new(Value::from(1i64)));
        assert!(value.is_array());
        assert_eq!(value.child_count(), MAX_ARRAY_GAP + 1);

        let mut value = Value::array();
        value.insert_child(&PathPart::from(MAX_ARRAY_GAP + 1), Arc::new(Value::from(1i64)));
        assert!(value.is_map());
    }

    #[test]
    fn clear_keeps_kind() {
        let mut value = sample();
        value.clear_children();
        assert_eq!(value, Value::map());

        let mut arr = Value::from(vec![1i64]);
        arr.clear_children();
        assert_eq!(arr, Value::array());
    }

    #[test]
    fn child_mut_copies_shared_subtree() {
        let shared = Arc::new(Value::from(btree! { "x".to_string() => Value::from(1i64) }));
        let mut a = Value::map();
        a.insert_child(&PathPart::from("s"), Arc::clone(&shared));

        let child = a.child_mut(&PathPart::from("s")).unwrap();
        child.insert_child(&PathPart::from("x"), Arc::new(Value::from(2i64)));

        assert_eq!(
            shared.child(&PathPart::from("x")).map(|c| c.as_ref()),
            Some(&Value::Integer(1))
        );
    }

    #[test]
    fn entries_in_order() {
        let keys: Vec<PathPart> = sample().entries().map(|(key, _)| key).collect();
        assert_eq!(keys, vec![PathPart::from("name"), PathPart::from("scores")]);

        let arr = Value::from(vec![1i64, 2]);
        let keys: Vec<PathPart> = arr.entries().map(|(key, _)| key).collect();
        assert_eq!(keys, vec![PathPart::Index(0), PathPart::Index(1)]);
    }

    #[test]
    fn shallow_clone_shares_children() {
        let value = sample();
        let copy = value.clone();
        let key = PathPart::from("scores");
        assert!(Arc::ptr_eq(
            value.child(&key).unwrap(),
            copy.child(&key).unwrap()
        ));
    }

    #[test]
    fn deep_clone_shares_nothing() {
        let value = sample();
        let copy = value.deep_clone();
        let key = PathPart::from("scores");
        assert_eq!(value, copy);
        assert!(!Arc::ptr_eq(
            value.child(&key).unwrap(),
            copy.child(&key).unwrap()
        ));
    }

    #[test]
    fn key_strings() {
        assert_eq!(Value::from(1i64).to_key_string(), Some("1".to_string()));
        assert_eq!(Value::from("k").to_key_string(), Some("k".to_string()));
        assert_eq!(Value::from(true).to_key_string(), Some("true".to_string()));
        assert_eq!(Value::map().to_key_string(), None);
    }
}
