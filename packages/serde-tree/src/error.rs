//! Error types for the serde layer.

/// Errors converting between `Value` trees and Rust or JSON data.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// A tree could not be deserialized into the requested type.
    #[error("decode error: {0}")]
    Decode(#[source] serde_json::Error),

    /// A Rust value could not be serialized into a tree.
    #[error("encode error: {0}")]
    Encode(#[source] serde_json::Error),

    /// Text was not valid JSON.
    #[error("parse error: {0}")]
    Parse(#[source] serde_json::Error),
}
