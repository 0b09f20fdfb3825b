//! Structural equality and path-level diffs.

use std::collections::HashSet;

use crate::{PathPart, Value};

fn leaf_eq(x: &Value, y: &Value) -> bool {
    match (x, y) {
        (Value::Integer(i), Value::Float(f)) | (Value::Float(f), Value::Integer(i)) => {
            *i as f64 == *f
        }
        _ => x == y,
    }
}

/// Deep structural equality.
///
/// Branches are equal when they have the same keys with equal values. Arrays
/// are compared as maps keyed by index, so `[1]` equals `{"0": 1}`. Integers
/// and floats compare by numeric value.
///
/// ```rust
/// use objpath_core::{deep_equal, Value};
///
/// assert!(deep_equal(&Value::from(vec![1i64, 2]), &Value::from(vec![1i64, 2])));
/// assert!(!deep_equal(&Value::from(vec![1i64, 2]), &Value::from(vec![2i64, 1])));
/// assert!(deep_equal(&Value::from(1i64), &Value::from(1.0)));
/// ```
pub fn deep_equal(x: &Value, y: &Value) -> bool {
    if std::ptr::eq(x, y) {
        return true;
    }

    match (x.is_branch(), y.is_branch()) {
        (true, true) => {
            x.child_count() == y.child_count()
                && x.entries().all(|(key, x_child)| {
                    y.child(&key)
                        .is_some_and(|y_child| deep_equal(x_child, y_child))
                })
        }
        (false, false) => leaf_eq(x, y),
        _ => false,
    }
}

/// Report every path under `x` that is missing from, or different in,
/// `other`. Empty branches count as paths of their own.
fn collect_diffs(
    x: &Value,
    other: Option<&Value>,
    prefix: &mut Vec<PathPart>,
    out: &mut Vec<Vec<PathPart>>,
) {
    for (key, x_child) in x.entries() {
        let y_child = other.and_then(|y| y.child(&key)).map(|child| &**child);
        prefix.push(key);

        if x_child.is_branch() {
            match y_child {
                Some(y_child) if std::ptr::eq(&**x_child, y_child) => {}
                Some(y_child) if y_child.is_branch() => {
                    collect_diffs(x_child, Some(y_child), prefix, out)
                }
                _ if x_child.child_count() == 0 => out.push(prefix.clone()),
                _ => collect_diffs(x_child, None, prefix, out),
            }
        } else if !y_child.is_some_and(|y_child| leaf_eq(x_child, y_child)) {
            out.push(prefix.clone());
        }

        prefix.pop();
    }
}

/// Paths at which `x` and `y` differ.
///
/// Covers leaves changed or removed going from `x` to `y` and leaves added
/// in `y`. Each path is reported once, in discovery order. A scalar root
/// that differs is reported as the empty path. The result is empty exactly
/// when [`deep_equal`] holds.
///
/// ```rust
/// use collection_literals::btree;
/// use objpath_core::{diff, path_parts, Value};
///
/// let x = Value::from(btree! {
///     "a".to_string() => Value::from(1i64),
///     "b".to_string() => Value::from(2i64),
/// });
/// let y = Value::from(btree! {
///     "a".to_string() => Value::from(1i64),
///     "c".to_string() => Value::from(3i64),
/// });
/// assert_eq!(diff(&x, &y), vec![path_parts!["b"], path_parts!["c"]]);
/// ```
pub fn diff(x: &Value, y: &Value) -> Vec<Vec<PathPart>> {
    let mut found = Vec::new();
    if !(x.is_branch() && y.is_branch()) && !deep_equal(x, y) {
        found.push(Vec::new());
    }

    collect_diffs(x, Some(y), &mut Vec::new(), &mut found);
    collect_diffs(y, Some(x), &mut Vec::new(), &mut found);

    let mut seen = HashSet::new();
    found.retain(|path| seen.insert(path.clone()));
    found
}
