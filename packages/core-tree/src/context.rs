//! Path resolution context: separator, `.`/`..` tokens, and container creation.

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

/// Default separator between path segments.
pub const DEFAULT_SEPARATOR: &str = "/";
/// Default token meaning "go up one level".
pub const DEFAULT_PARENT: &str = "..";
/// Default token meaning "stay at this level".
pub const DEFAULT_CURRENT: &str = ".";

lazy_static! {
    static ref GLOBAL_CONTEXT: PathContext = PathContext::default();
}

/// Settings that govern how paths are parsed and how missing containers are
/// created.
///
/// A context is a plain value. Every operation takes one by reference, and
/// none of them ever modify it.
///
/// # Example
///
/// ```rust
/// use objpath_core::PathContext;
///
/// let ctx = PathContext::default().with_separator(".").with_array(true);
/// assert_eq!(ctx.separator, ".");
/// assert_eq!(ctx.parent, "..");
/// assert!(ctx.array);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathContext {
    /// Token delimiting path segments in string form.
    pub separator: String,
    /// Segment meaning "parent" during normalization.
    pub parent: String,
    /// Segment meaning "current" during normalization.
    pub current: String,
    /// Create sequences instead of mappings for missing containers whose key
    /// looks like a non-negative integer.
    pub array: bool,
}

impl Default for PathContext {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR.to_string(),
            parent: DEFAULT_PARENT.to_string(),
            current: DEFAULT_CURRENT.to_string(),
            array: false,
        }
    }
}

impl PathContext {
    /// The process-wide default context. Read-only.
    pub fn global() -> &'static PathContext {
        &GLOBAL_CONTEXT
    }

    #[must_use]
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    #[must_use]
    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = parent.into();
        self
    }

    #[must_use]
    pub fn with_current(mut self, current: impl Into<String>) -> Self {
        self.current = current.into();
        self
    }

    #[must_use]
    pub fn with_array(mut self, array: bool) -> Self {
        self.array = array;
        self
    }

    /// Apply caller options on top of this context, returning a new one.
    #[must_use]
    pub fn merge(&self, options: &ContextOptions) -> PathContext {
        PathContext {
            separator: options
                .separator
                .clone()
                .unwrap_or_else(|| self.separator.clone()),
            parent: options
                .parent
                .clone()
                .unwrap_or_else(|| self.parent.clone()),
            current: options
                .current
                .clone()
                .unwrap_or_else(|| self.current.clone()),
            array: options.array.unwrap_or(self.array),
        }
    }
}

/// Per-call overrides. Unset fields fall back to the global default.
///
/// Deserializable so option sets can live in configuration files:
///
/// ```rust
/// use objpath_core::{merge_options, ContextOptions};
///
/// let options: ContextOptions = serde_json::from_str(r#"{"separator": "."}"#).unwrap();
/// let ctx = merge_options(&options);
/// assert_eq!(ctx.separator, ".");
/// assert_eq!(ctx.current, ".");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContextOptions {
    pub separator: Option<String>,
    pub parent: Option<String>,
    pub current: Option<String>,
    pub array: Option<bool>,
}

/// Merge `options` over the global default context.
pub fn merge_options(options: &ContextOptions) -> PathContext {
    PathContext::global().merge(options)
}

/// Options for [`traverse`](crate::traverse) and the flattening helpers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TraverseOptions {
    /// Separator used when rendering paths as strings.
    pub separator: String,
    /// Yield branch nodes as well as leaves.
    pub branch_nodes: bool,
    /// Yield raw part lists instead of rendered strings.
    pub path_parts: bool,
}

impl Default for TraverseOptions {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR.to_string(),
            branch_nodes: false,
            path_parts: false,
        }
    }
}

impl TraverseOptions {
    #[must_use]
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    #[must_use]
    pub fn with_branch_nodes(mut self, branch_nodes: bool) -> Self {
        self.branch_nodes = branch_nodes;
        self
    }

    #[must_use]
    pub fn with_path_parts(mut self, path_parts: bool) -> Self {
        self.path_parts = path_parts;
        self
    }
}
