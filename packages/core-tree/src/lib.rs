//! objpath core: path-addressed access to nested data.
//!
//! This layer works on in-memory trees of maps, arrays, and leaves:
//! - `Value`: the tree, with `Arc`-shared children
//! - `PathPart` / `PathLike`: paths as strings or lists of parts
//! - `PathContext`: separator and `.`/`..` tokens, container creation
//! - In-place access: `get`, `has`, `set`, `delete`
//! - Copy-on-write access: `set_immutable`, `delete_immutable`
//! - `traverse`, `flatten`, `flatten_paths`, `deep_equal`, `diff`
//! - `filter_include`, `filter_exclude`, `clone_tree`, `index_by`
//!
//! # Example
//!
//! ```rust
//! use objpath_core::{get, resolve_path, set, PathContext, Value};
//!
//! let ctx = PathContext::default();
//! let mut config = Value::map();
//! set(&mut config, "server/port", Value::from(8080i64), &ctx);
//!
//! let path = resolve_path("../port", "/server/host", &ctx).unwrap();
//! assert_eq!(path, "/server/port");
//! assert_eq!(get(&config, path.as_str(), &ctx), Some(&Value::Integer(8080)));
//! ```

mod access;
mod compare;
mod context;
mod error;
mod filter;
mod immutable;
mod path;
mod traverse;
mod value;

pub use access::{delete, get, get_mut, has, set};
pub use compare::{deep_equal, diff};
pub use context::{
    merge_options, ContextOptions, PathContext, TraverseOptions, DEFAULT_CURRENT, DEFAULT_PARENT,
    DEFAULT_SEPARATOR,
};
pub use error::Error;
pub use filter::{clone_tree, filter_exclude, filter_include, index_by};
pub use immutable::{delete_immutable, set_immutable};
pub use path::{
    is_absolute, normalize_parts, normalize_path, parts_from_path, path_from_parts, resolve_path,
    resolve_path_parts, NormalizedPath, PathLike, PathPart,
};
pub use traverse::{flatten, flatten_paths, traverse, Traverse, TraversePath};
pub use value::{Value, MAX_ARRAY_GAP};
