//! Error types for the core engine.

/// Errors raised by the core engine.
///
/// Missing paths are never errors: lookups return `None`, existence checks
/// return `false`, and deletes of absent paths are no-ops. The only hard
/// failure is navigating above the root while normalizing a path.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A parent segment had nothing left to pop.
    #[error("invalid path (above root): {path:?}")]
    AboveRoot { path: String },
}
