//! Cloning, include/exclude filters, and indexing sequences by key path.

use std::collections::BTreeMap;

use crate::{delete, get, parts_from_path, set, PathContext, PathLike, Value};

/// Copy a tree. A deep copy shares nothing with the input; a shallow copy
/// shares its children. Leaves are copied by value either way.
pub fn clone_tree(tree: &Value, deep: bool) -> Value {
    if deep {
        tree.deep_clone()
    } else {
        tree.clone()
    }
}

/// A new tree holding only the values found at `paths`.
///
/// Containers are created only as needed to reach the included paths.
/// Paths missing from `tree` are skipped.
///
/// ```rust
/// use collection_literals::btree;
/// use objpath_core::{filter_include, PathContext, Value};
///
/// let tree = Value::from(btree! {
///     "a".to_string() => Value::from(btree! {
///         "b".to_string() => Value::from(1i64),
///         "c".to_string() => Value::from(2i64),
///     }),
///     "d".to_string() => Value::from(3i64),
/// });
/// let filtered = filter_include(&tree, ["a/b", "missing"], &PathContext::default());
/// assert_eq!(
///     filtered,
///     Value::from(btree! {
///         "a".to_string() => Value::from(btree! { "b".to_string() => Value::from(1i64) }),
///     })
/// );
/// ```
pub fn filter_include<I>(tree: &Value, paths: I, context: &PathContext) -> Value
where
    I: IntoIterator,
    I::Item: PathLike,
{
    let mut filtered = Value::map();
    for path in paths {
        let parts = parts_from_path(&path, &context.separator);
        if let Some(value) = get(tree, &parts, context) {
            set(&mut filtered, &parts, value.clone(), context);
        }
    }
    filtered
}

/// A copy of `tree` with the values at `paths` removed.
///
/// The input is never modified, whether the copy is `deep` or not: a
/// shallow copy shares untouched subtrees and copies the ones it edits.
pub fn filter_exclude<I>(tree: &Value, paths: I, deep: bool, context: &PathContext) -> Value
where
    I: IntoIterator,
    I::Item: PathLike,
{
    let mut filtered = clone_tree(tree, deep);
    for path in paths {
        delete(&mut filtered, &path, context);
    }
    filtered
}

/// Index `items` by the value found at `path` in each of them.
///
/// Leaf items, and items with nothing (or a branch) at `path`, are skipped.
/// Later items win when keys collide.
///
/// ```rust
/// use collection_literals::btree;
/// use objpath_core::{index_by, PathContext, Value};
///
/// let items = vec![
///     Value::from(btree! { "k".to_string() => Value::from(1i64), "v".to_string() => Value::from("a") }),
///     Value::from(btree! { "k".to_string() => Value::from(1i64), "v".to_string() => Value::from("b") }),
/// ];
/// let index = index_by(&items, "k", &PathContext::default());
/// assert_eq!(index.len(), 1);
/// assert_eq!(index["1"], items[1]);
/// ```
pub fn index_by<'a, I, P>(items: I, path: &P, context: &PathContext) -> BTreeMap<String, Value>
where
    I: IntoIterator<Item = &'a Value>,
    P: PathLike + ?Sized,
{
    let parts = parts_from_path(path, &context.separator);
    let mut indexed = BTreeMap::new();

    for item in items {
        if !item.is_branch() {
            log::debug!("skipping leaf item while indexing");
            continue;
        }
        match get(item, &parts, context).and_then(Value::to_key_string) {
            Some(key) => {
                indexed.insert(key, item.clone());
            }
            None => log::debug!("skipping item without a key at {:?}", parts),
        }
    }

    indexed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{has, path_parts};
    use collection_literals::btree;
    use std::sync::Arc;

    fn ctx() -> PathContext {
        PathContext::default()
    }

    fn test_tree() -> Value {
        Value::from(btree! {
            "user".to_string() => Value::from(btree! {
                "name".to_string() => Value::from("Alice"),
                "password".to_string() => Value::from("hunter2"),
            }),
            "items".to_string() => Value::from(vec!["a", "b", "c"]),
            "meta".to_string() => Value::from(true),
        })
    }

    #[test]
    fn clone_deep_and_shallow() {
        let tree = test_tree();
        let key = crate::PathPart::from("user");

        let shallow = clone_tree(&tree, false);
        assert!(Arc::ptr_eq(
            tree.child(&key).unwrap(),
            shallow.child(&key).unwrap()
        ));

        let deep = clone_tree(&tree, true);
        assert_eq!(deep, tree);
        assert!(!Arc::ptr_eq(
            tree.child(&key).unwrap(),
            deep.child(&key).unwrap()
        ));
    }

    #[test]
    fn clone_scalar() {
        assert_eq!(clone_tree(&Value::from(3i64), true), Value::from(3i64));
        assert_eq!(clone_tree(&Value::Null, false), Value::Null);
    }

    #[test]
    fn include_only_named_paths() {
        let tree = test_tree();
        let filtered = filter_include(&tree, ["user/name", "meta"], &ctx());
        assert_eq!(
            filtered,
            Value::from(btree! {
                "user".to_string() => Value::from(btree! {
                    "name".to_string() => Value::from("Alice"),
                }),
                "meta".to_string() => Value::from(true),
            })
        );
    }

    #[test]
    fn include_missing_paths_yields_empty_map() {
        let tree = test_tree();
        assert_eq!(filter_include(&tree, ["nope", "user/age"], &ctx()), Value::map());
        assert_eq!(
            filter_include(&tree, Vec::<&str>::new(), &ctx()),
            Value::map()
        );
    }

    #[test]
    fn include_with_part_lists() {
        let tree = test_tree();
        let paths = vec![path_parts!["items", 1usize]];
        let filtered = filter_include(&tree, &paths, &ctx());
        assert_eq!(
            filtered,
            Value::from(btree! {
                "items".to_string() => Value::from(btree! {
                    "1".to_string() => Value::from("b"),
                }),
            })
        );
    }

    #[test]
    fn include_rebuilds_arrays_with_array_flag() {
        let tree = test_tree();
        let ctx = PathContext::default().with_array(true);
        let filtered = filter_include(&tree, ["items/0"], &ctx);
        assert_eq!(
            filtered,
            Value::from(btree! { "items".to_string() => Value::from(vec!["a"]) })
        );
    }

    #[test]
    fn exclude_removes_paths() {
        let tree = test_tree();
        let filtered = filter_exclude(&tree, ["user/password", "meta"], true, &ctx());
        assert!(!has(&filtered, "user/password", &ctx()));
        assert!(!has(&filtered, "meta", &ctx()));
        assert!(has(&filtered, "user/name", &ctx()));
        assert!(has(&filtered, "items/2", &ctx()));
    }

    #[test]
    fn shallow_exclude_leaves_input_alone() {
        let tree = test_tree();
        let before = tree.deep_clone();
        let filtered = filter_exclude(&tree, ["user/password"], false, &ctx());
        assert_eq!(tree, before);
        assert!(!has(&filtered, "user/password", &ctx()));
        let key = crate::PathPart::from("items");
        assert!(Arc::ptr_eq(
            tree.child(&key).unwrap(),
            filtered.child(&key).unwrap()
        ));
    }

    #[test]
    fn index_last_write_wins() {
        let items = vec![
            Value::from(btree! {
                "k".to_string() => Value::from(1i64),
                "v".to_string() => Value::from("a"),
            }),
            Value::from(btree! {
                "k".to_string() => Value::from(1i64),
                "v".to_string() => Value::from("b"),
            }),
        ];
        let index = index_by(&items, "k", &ctx());
        assert_eq!(index, btree! { "1".to_string() => items[1].clone() });
    }

    #[test]
    fn index_skips_leaves_and_missing_keys() {
        let items = vec![
            Value::from("scalar"),
            Value::from(btree! { "other".to_string() => Value::from(1i64) }),
            Value::from(btree! {
                "id".to_string() => Value::from(btree! { "nested".to_string() => Value::map() }),
            }),
            Value::from(btree! {
                "id".to_string() => Value::from(btree! { "nested".to_string() => Value::from("x") }),
            }),
        ];
        let index = index_by(&items, "id/nested", &ctx());
        assert_eq!(index.len(), 1);
        assert_eq!(index.get("x"), Some(&items[3]));
    }

    #[test]
    fn index_array_items() {
        let tree = Value::from(vec![
            Value::from(vec!["first", "a"]),
            Value::from(vec!["second", "b"]),
        ]);
        let Value::Array(rows) = &tree else {
            panic!("expected array");
        };
        let index = index_by(rows.iter().map(|row| &**row), "0", &ctx());
        let keys: Vec<&String> = index.keys().collect();
        assert_eq!(keys, vec!["first", "second"]);
    }
}
