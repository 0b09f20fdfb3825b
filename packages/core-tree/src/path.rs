//! Path parts, parsing, rendering, and `.`/`..` normalization.
//!
//! A path has two equivalent forms: a string joined by a separator
//! (`"users/0/name"`) and an explicit list of [`PathPart`]s. Every operation
//! in this crate accepts either through the [`PathLike`] trait.

use std::borrow::Cow;
use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::{Error, PathContext};

/// One segment of a path: a mapping key or a sequence index.
#[derive(Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathPart {
    Index(usize),
    Key(String),
}

impl PathPart {
    /// True for the empty key, which is never a meaningful segment.
    pub fn is_empty(&self) -> bool {
        matches!(self, PathPart::Key(key) if key.is_empty())
    }

    /// True if this part can address a sequence slot: an explicit index, or a
    /// key made only of ASCII digits.
    pub fn looks_like_index(&self) -> bool {
        lazy_static! {
            static ref INDEX_PATTERN: Regex = Regex::new(r"^[0-9]+$").unwrap();
        }

        match self {
            PathPart::Index(_) => true,
            PathPart::Key(key) => INDEX_PATTERN.is_match(key),
        }
    }

    /// The sequence index this part addresses, if any. Keys must be in
    /// canonical decimal form: `"7"` addresses slot 7, `"07"` addresses none.
    pub fn as_index(&self) -> Option<usize> {
        match self {
            PathPart::Index(index) => Some(*index),
            PathPart::Key(key) if self.looks_like_index() => {
                if key.len() > 1 && key.starts_with('0') {
                    return None;
                }
                key.parse().ok()
            }
            PathPart::Key(_) => None,
        }
    }

    /// The mapping key this part addresses.
    pub fn as_key(&self) -> Cow<'_, str> {
        match self {
            PathPart::Index(index) => Cow::Owned(index.to_string()),
            PathPart::Key(key) => Cow::Borrowed(key),
        }
    }
}

impl fmt::Display for PathPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathPart::Index(index) => write!(f, "{}", index),
            PathPart::Key(key) => write!(f, "{}", key),
        }
    }
}

impl From<&str> for PathPart {
    fn from(key: &str) -> Self {
        PathPart::Key(key.to_string())
    }
}

impl From<String> for PathPart {
    fn from(key: String) -> Self {
        PathPart::Key(key)
    }
}

impl From<usize> for PathPart {
    fn from(index: usize) -> Self {
        PathPart::Index(index)
    }
}

/// Anything that can be read as a path: a separator-joined string or a list
/// of parts.
pub trait PathLike {
    /// Split into parts without dropping empty segments.
    fn raw_parts(&self, separator: &str) -> Vec<PathPart>;

    /// The string form, when this path was given as a string.
    fn as_path_str(&self) -> Option<&str> {
        None
    }
}

impl PathLike for str {
    fn raw_parts(&self, separator: &str) -> Vec<PathPart> {
        if separator.is_empty() {
            return vec![PathPart::from(self)];
        }
        self.split(separator).map(PathPart::from).collect()
    }

    fn as_path_str(&self) -> Option<&str> {
        Some(self)
    }
}

impl PathLike for String {
    fn raw_parts(&self, separator: &str) -> Vec<PathPart> {
        self.as_str().raw_parts(separator)
    }

    fn as_path_str(&self) -> Option<&str> {
        Some(self)
    }
}

impl PathLike for [PathPart] {
    fn raw_parts(&self, _separator: &str) -> Vec<PathPart> {
        self.to_vec()
    }
}

impl PathLike for Vec<PathPart> {
    fn raw_parts(&self, _separator: &str) -> Vec<PathPart> {
        self.clone()
    }
}

impl<const N: usize> PathLike for [PathPart; N] {
    fn raw_parts(&self, _separator: &str) -> Vec<PathPart> {
        self.to_vec()
    }
}

impl PathLike for [&str] {
    fn raw_parts(&self, _separator: &str) -> Vec<PathPart> {
        self.iter().map(|key| PathPart::from(*key)).collect()
    }
}

impl<T: PathLike + ?Sized> PathLike for &T {
    fn raw_parts(&self, separator: &str) -> Vec<PathPart> {
        (**self).raw_parts(separator)
    }

    fn as_path_str(&self) -> Option<&str> {
        (**self).as_path_str()
    }
}

/// Build a `Vec<PathPart>` from keys and indices.
///
/// ```rust
/// use objpath_core::{path_parts, PathPart};
///
/// let parts = path_parts!["items", 0usize, "name"];
/// assert_eq!(parts[1], PathPart::Index(0));
/// ```
#[macro_export]
macro_rules! path_parts {
    ($($part:expr),* $(,)?) => {{
        let parts: ::std::vec::Vec<$crate::PathPart> = vec![$($crate::PathPart::from($part)),*];
        parts
    }};
}

fn sanitize(parts: Vec<PathPart>) -> Vec<PathPart> {
    parts.into_iter().filter(|part| !part.is_empty()).collect()
}

fn join(parts: &[PathPart], separator: &str) -> String {
    parts
        .iter()
        .map(PathPart::to_string)
        .collect::<Vec<_>>()
        .join(separator)
}

/// Split a path into its meaningful parts, dropping empty segments.
///
/// ```rust
/// use objpath_core::{parts_from_path, path_parts};
///
/// assert_eq!(parts_from_path("/a//b/", "/"), path_parts!["a", "b"]);
/// ```
pub fn parts_from_path<P: PathLike + ?Sized>(path: &P, separator: &str) -> Vec<PathPart> {
    sanitize(path.raw_parts(separator))
}

/// Render a path as a string. Strings are returned unchanged.
pub fn path_from_parts<P: PathLike + ?Sized>(path: &P, separator: &str) -> String {
    match path.as_path_str() {
        Some(path) => path.to_string(),
        None => join(&parts_from_path(path, separator), separator),
    }
}

/// True if the path starts with the separator (its first raw part is empty).
pub fn is_absolute<P: PathLike + ?Sized>(path: &P, separator: &str) -> bool {
    match path.as_path_str() {
        Some(path) => !separator.is_empty() && path.starts_with(separator),
        None => path
            .raw_parts(separator)
            .first()
            .is_some_and(PathPart::is_empty),
    }
}

/// A path with `.` and `..` resolved.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NormalizedPath {
    pub parts: Vec<PathPart>,
    pub absolute: bool,
    pub context: PathContext,
}

impl NormalizedPath {
    /// Render with the context separator, keeping a leading separator for
    /// absolute paths.
    pub fn render(&self) -> String {
        let separator = &self.context.separator;
        let joined = join(&self.parts, separator);
        if self.absolute {
            format!("{}{}", separator, joined)
        } else {
            joined
        }
    }
}

fn normalize_sanitized(
    parts: Vec<PathPart>,
    absolute: bool,
    context: &PathContext,
) -> Result<NormalizedPath, Error> {
    let mut included: Vec<PathPart> = Vec::with_capacity(parts.len());

    for part in &parts {
        match part {
            PathPart::Key(key) if *key == context.current => {}
            PathPart::Key(key) if *key == context.parent => {
                if included.pop().is_none() {
                    let path = join(&parts, &context.separator);
                    log::debug!("refusing to normalize above root: {}", path);
                    return Err(Error::AboveRoot { path });
                }
            }
            _ => included.push(part.clone()),
        }
    }

    Ok(NormalizedPath {
        parts: included,
        absolute,
        context: context.clone(),
    })
}

/// Resolve `.` and `..` segments.
///
/// # Errors
///
/// Returns [`Error::AboveRoot`] if a parent segment has nothing to pop.
pub fn normalize_parts<P: PathLike + ?Sized>(
    path: &P,
    context: &PathContext,
) -> Result<NormalizedPath, Error> {
    let absolute = is_absolute(path, &context.separator);
    normalize_sanitized(parts_from_path(path, &context.separator), absolute, context)
}

/// Resolve `.` and `..` segments and render the result.
///
/// ```rust
/// use objpath_core::{normalize_path, PathContext};
///
/// let ctx = PathContext::default();
/// assert_eq!(normalize_path("a/./b/../c", &ctx).unwrap(), "a/c");
/// assert_eq!(normalize_path("/a/b/..", &ctx).unwrap(), "/a");
/// assert!(normalize_path("a/../..", &ctx).is_err());
/// ```
pub fn normalize_path<P: PathLike + ?Sized>(path: &P, context: &PathContext) -> Result<String, Error> {
    Ok(normalize_parts(path, context)?.render())
}

fn resolve<P, B>(path: &P, base: &B, context: &PathContext) -> Result<NormalizedPath, Error>
where
    P: PathLike + ?Sized,
    B: PathLike + ?Sized,
{
    let separator = &context.separator;
    if is_absolute(path, separator) {
        return normalize_parts(path, context);
    }

    let mut parts = parts_from_path(base, separator);
    parts.extend(parts_from_path(path, separator));
    normalize_sanitized(parts, is_absolute(base, separator), context)
}

/// Resolve `path` against `base` the way a filesystem resolves a relative
/// path against a working directory. Absolute paths ignore the base.
///
/// ```rust
/// use objpath_core::{resolve_path, PathContext};
///
/// let ctx = PathContext::default();
/// assert_eq!(resolve_path("/x/y", "/base", &ctx).unwrap(), "/x/y");
/// assert_eq!(resolve_path("x/y", "/base", &ctx).unwrap(), "/base/x/y");
/// assert_eq!(resolve_path("../z", "base/sub", &ctx).unwrap(), "base/z");
/// ```
///
/// # Errors
///
/// Returns [`Error::AboveRoot`] if the combined path climbs above the root.
pub fn resolve_path<P, B>(path: &P, base: &B, context: &PathContext) -> Result<String, Error>
where
    P: PathLike + ?Sized,
    B: PathLike + ?Sized,
{
    Ok(resolve(path, base, context)?.render())
}

/// Like [`resolve_path`], returning the normalized parts.
pub fn resolve_path_parts<P, B>(
    path: &P,
    base: &B,
    context: &PathContext,
) -> Result<Vec<PathPart>, Error>
where
    P: PathLike + ?Sized,
    B: PathLike + ?Sized,
{
    Ok(resolve(path, base, context)?.parts)
}
