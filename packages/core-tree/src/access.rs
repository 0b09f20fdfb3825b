//! In-place access to a tree by path: `get`, `has`, `set`, `delete`.
//!
//! These never fail. Missing paths read as `None`/`false` and deletes of
//! missing paths do nothing.

use std::sync::Arc;

use crate::{parts_from_path, PathContext, PathLike, PathPart, Value};

pub(crate) fn lookup<'a>(tree: &'a Value, parts: &[PathPart]) -> Option<&'a Value> {
    let mut cursor = tree;
    for part in parts {
        cursor = cursor.child(part)?;
    }
    Some(cursor)
}

/// True if every prefix of `path` exists. The root always exists.
pub fn has<P: PathLike + ?Sized>(tree: &Value, path: &P, context: &PathContext) -> bool {
    get(tree, path, context).is_some()
}

/// The value at `path`, or `None` if any part of it is missing.
///
/// ```rust
/// use objpath_core::{get, set, PathContext, Value};
///
/// let ctx = PathContext::default();
/// let mut tree = Value::map();
/// set(&mut tree, "a/b", Value::from(1i64), &ctx);
///
/// assert_eq!(get(&tree, "a/b", &ctx), Some(&Value::Integer(1)));
/// assert_eq!(get(&tree, "a/b/c", &ctx), None);
/// assert_eq!(get(&tree, "", &ctx), Some(&tree));
/// ```
pub fn get<'a, P: PathLike + ?Sized>(
    tree: &'a Value,
    path: &P,
    context: &PathContext,
) -> Option<&'a Value> {
    lookup(tree, &parts_from_path(path, &context.separator))
}

/// Mutable access to the value at `path`.
///
/// Nodes on the way that are shared with another tree are copied first, so
/// writes through the returned reference never leak into other trees.
pub fn get_mut<'a, P: PathLike + ?Sized>(
    tree: &'a mut Value,
    path: &P,
    context: &PathContext,
) -> Option<&'a mut Value> {
    let parts = parts_from_path(path, &context.separator);
    if lookup(tree, &parts).is_none() {
        return None;
    }

    let mut cursor = tree;
    for part in &parts {
        cursor = cursor.child_mut(part)?;
    }
    Some(cursor)
}

fn set_in(node: &mut Value, parts: &[PathPart], value: Value, context: &PathContext) {
    let Some((key, rest)) = parts.split_first() else {
        *node = value;
        return;
    };

    if !node.is_branch() {
        log::trace!("creating container for key {:?}", key);
        *node = Value::container_for(key, context.array);
    }

    if rest.is_empty() {
        node.insert_child(key, Arc::new(value));
        return;
    }

    if !node.has_child(key) {
        node.insert_child(key, Arc::new(Value::Null));
    }
    if let Some(child) = node.child_mut(key) {
        set_in(child, rest, value, context);
    }
}

/// Store `value` at `path`, creating missing containers along the way.
///
/// An empty path replaces the whole tree. A missing or non-container
/// intermediate becomes an array when `context.array` is set and the key
/// that indexes into it looks like a non-negative integer, and a map
/// otherwise.
///
/// ```rust
/// use objpath_core::{get, set, PathContext, Value};
///
/// let ctx = PathContext::default().with_array(true);
/// let mut tree = Value::map();
/// set(&mut tree, "items/0/name", Value::from("first"), &ctx);
///
/// assert!(get(&tree, "items", &ctx).unwrap().is_array());
/// assert_eq!(get(&tree, "items/0/name", &ctx), Some(&Value::from("first")));
/// ```
pub fn set<P: PathLike + ?Sized>(tree: &mut Value, path: &P, value: Value, context: &PathContext) {
    let parts = parts_from_path(path, &context.separator);
    set_in(tree, &parts, value, context);
}

/// Remove the value at `path`.
///
/// An empty path clears every child of the root. Missing paths are left
/// alone.
pub fn delete<P: PathLike + ?Sized>(tree: &mut Value, path: &P, context: &PathContext) {
    let parts = parts_from_path(path, &context.separator);
    let Some((last, parents)) = parts.split_last() else {
        tree.clear_children();
        return;
    };

    if lookup(tree, &parts).is_none() {
        log::debug!("nothing to delete at {:?}", parts);
        return;
    }

    let mut cursor = &mut *tree;
    for part in parents {
        match cursor.child_mut(part) {
            Some(child) => cursor = child,
            None => return,
        }
    }
    cursor.remove_child(last);
}
