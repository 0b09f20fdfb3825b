//! Depth-first traversal and flattening.

use std::collections::BTreeMap;
use std::fmt;

use crate::{path_from_parts, PathPart, TraverseOptions, Value, DEFAULT_SEPARATOR};

/// The path of a visited node, rendered or raw depending on
/// [`TraverseOptions::path_parts`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TraversePath {
    Rendered(String),
    Parts(Vec<PathPart>),
}

impl TraversePath {
    /// Render as a string. Part lists are joined with `separator`; rendered
    /// paths already carry the separator they were built with and are
    /// returned unchanged.
    pub fn render(&self, separator: &str) -> String {
        match self {
            TraversePath::Rendered(path) => path.clone(),
            TraversePath::Parts(parts) => path_from_parts(parts, separator),
        }
    }
}

/// Part lists display joined with [`DEFAULT_SEPARATOR`]; use
/// [`TraversePath::render`] for any other separator.
impl fmt::Display for TraversePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render(DEFAULT_SEPARATOR))
    }
}

/// Lazy pre-order iterator over `(path, node)` pairs.
///
/// Created by [`traverse`]. Only the pending siblings of the nodes visited so
/// far are held, so dropping the iterator early skips the rest of the tree.
/// The tree is borrowed for the iterator's lifetime and cannot change
/// underneath it.
pub struct Traverse<'a> {
    stack: Vec<(Vec<PathPart>, &'a Value)>,
    options: TraverseOptions,
}

impl<'a> Traverse<'a> {
    fn render(&self, parts: Vec<PathPart>) -> TraversePath {
        if self.options.path_parts {
            TraversePath::Parts(parts)
        } else {
            TraversePath::Rendered(path_from_parts(&parts, &self.options.separator))
        }
    }
}

impl<'a> Iterator for Traverse<'a> {
    type Item = (TraversePath, &'a Value);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (parts, node) = self.stack.pop()?;
            let is_branch = node.is_branch();

            if is_branch {
                let children: Vec<_> = node.entries().collect();
                for (key, child) in children.into_iter().rev() {
                    let mut child_parts = parts.clone();
                    child_parts.push(key);
                    self.stack.push((child_parts, &**child));
                }
            }

            if self.options.branch_nodes || !is_branch {
                return Some((self.render(parts), node));
            }
        }
    }
}

/// Walk `tree` depth-first, yielding leaves (and branches too when
/// `branch_nodes` is set) with their paths.
///
/// ```rust
/// use objpath_core::{traverse, TraverseOptions, Value};
///
/// let tree = Value::from(vec![Value::from("a"), Value::from(vec!["b"])]);
/// let paths: Vec<String> = traverse(&tree, &TraverseOptions::default())
///     .map(|(path, _)| path.to_string())
///     .collect();
/// assert_eq!(paths, vec!["0", "1/0"]);
/// ```
pub fn traverse<'a>(tree: &'a Value, options: &TraverseOptions) -> Traverse<'a> {
    Traverse {
        stack: vec![(Vec::new(), tree)],
        options: options.clone(),
    }
}

/// Map every leaf path to its value.
pub fn flatten(tree: &Value, options: &TraverseOptions) -> BTreeMap<String, Value> {
    let options = options.clone().with_branch_nodes(false).with_path_parts(false);
    traverse(tree, &options)
        .map(|(path, value)| (path.to_string(), value.clone()))
        .collect()
}

/// Every branch and leaf path below the root, in pre-order.
pub fn flatten_paths(tree: &Value, options: &TraverseOptions) -> Vec<String> {
    let options = options.clone().with_branch_nodes(true).with_path_parts(true);
    traverse(tree, &options)
        .filter_map(|(path, _)| match &path {
            TraversePath::Parts(parts) if parts.is_empty() => None,
            _ => Some(path.render(&options.separator)),
        })
        .collect()
}
