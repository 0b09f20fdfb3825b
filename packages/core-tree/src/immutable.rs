//! Copy-on-write updates that leave the input tree untouched.
//!
//! Every node on the changed path is copied; every other subtree is shared
//! with the input by `Arc`. Use `Arc::ptr_eq` to tell whether anything
//! changed.

use std::sync::Arc;

use crate::{parts_from_path, PathContext, PathLike, PathPart, Value};

fn lookup_node<'a>(tree: &'a Arc<Value>, parts: &[PathPart]) -> Option<&'a Arc<Value>> {
    let mut cursor = tree;
    for part in parts {
        cursor = cursor.child(part)?;
    }
    Some(cursor)
}

fn set_in(
    node: Option<&Arc<Value>>,
    parts: &[PathPart],
    value: Arc<Value>,
    context: &PathContext,
) -> Arc<Value> {
    let Some((key, rest)) = parts.split_first() else {
        return value;
    };

    let mut copy = match node {
        Some(node) if node.is_branch() => Value::clone(node),
        _ => {
            log::trace!("creating container for key {:?}", key);
            Value::container_for(key, context.array)
        }
    };

    let child = set_in(copy.child(key), rest, value, context);
    copy.insert_child(key, child);
    Arc::new(copy)
}

/// Return a new tree with `value` stored at `path`.
///
/// An empty path returns `value` itself. Missing containers are created the
/// same way [`set`](crate::set) creates them.
///
/// ```rust
/// use std::sync::Arc;
/// use objpath_core::{get, set_immutable, PathContext, Value};
///
/// let ctx = PathContext::default();
/// let tree = Arc::new(Value::map());
/// let tree = set_immutable(&tree, "a/x", Value::from(1i64), &ctx);
/// let tree = set_immutable(&tree, "b/y", Value::from(2i64), &ctx);
///
/// let updated = set_immutable(&tree, "a/x", Value::from(3i64), &ctx);
/// assert_eq!(get(&tree, "a/x", &ctx), Some(&Value::Integer(1)));
/// assert_eq!(get(&updated, "a/x", &ctx), Some(&Value::Integer(3)));
///
/// // The untouched sibling is shared, not copied.
/// let b = |t: &Arc<Value>| Arc::clone(t.child(&"b".into()).unwrap());
/// assert!(Arc::ptr_eq(&b(&tree), &b(&updated)));
/// ```
pub fn set_immutable<P: PathLike + ?Sized>(
    tree: &Arc<Value>,
    path: &P,
    value: impl Into<Arc<Value>>,
    context: &PathContext,
) -> Arc<Value> {
    let parts = parts_from_path(path, &context.separator);
    set_in(Some(tree), &parts, value.into(), context)
}

/// Return a new tree without the value at `path`.
///
/// When there is nothing to remove the input is returned as is (the same
/// `Arc`), so callers can detect "no change" with `Arc::ptr_eq`.
///
/// Array elements other than the removed one keep their indices, as with
/// [`Value::remove_child`].
///
/// An empty path means the root itself: the result is an empty container of
/// the root's kind, matching what [`delete`](crate::delete) does in place.
/// A root that is already empty comes back as the same `Arc`.
pub fn delete_immutable<P: PathLike + ?Sized>(
    tree: &Arc<Value>,
    path: &P,
    context: &PathContext,
) -> Arc<Value> {
    let parts = parts_from_path(path, &context.separator);
    let Some((last, parents)) = parts.split_last() else {
        if tree.child_count() == 0 {
            return Arc::clone(tree);
        }
        let mut cleared = Value::clone(tree);
        cleared.clear_children();
        return Arc::new(cleared);
    };

    let parent = match lookup_node(tree, parents) {
        Some(parent) if parent.has_child(last) => parent,
        _ => {
            log::debug!("nothing to delete at {:?}", parts);
            return Arc::clone(tree);
        }
    };

    let mut copy = Value::clone(parent);
    copy.remove_child(last);
    set_in(Some(tree), parents, Arc::new(copy), context)
}
