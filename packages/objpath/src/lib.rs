//! objpath: filesystem-style path addressing for nested maps and arrays.
//!
//! Read, write, delete, traverse, flatten, diff, clone, and filter values in
//! an object tree using slash-delimited paths (or lists of parts), in place
//! or copy-on-write.
//!
//! ```rust
//! use objpath::{flatten, json_to_value, TraverseOptions};
//!
//! let tree = json_to_value(serde_json::json!({"a": {"b": 1, "c": 2}}));
//! let flat = flatten(&tree, &TraverseOptions::default());
//! assert_eq!(flat.keys().collect::<Vec<_>>(), vec!["a/b", "a/c"]);
//! ```

pub use objpath_core::*;
pub use objpath_serde::{
    from_value, json_to_value, parse_json, to_json_string, to_value, value_to_json, TypedAccess,
};

/// Serde layer errors, distinct from the core [`Error`].
pub use objpath_serde::Error as SerdeError;
