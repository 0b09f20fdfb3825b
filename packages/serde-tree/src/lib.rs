//! Serde Integration for objpath
//!
//! This layer connects `Value` trees to the serde ecosystem:
//! - `json_to_value` / `value_to_json`: JSON interop
//! - `parse_json` / `to_json_string`: text in and out
//! - `from_value` / `to_value`: typed conversions
//! - `TypedAccess`: read and write Rust types at a path

mod convert;
mod error;
mod typed;

pub use convert::{from_value, json_to_value, parse_json, to_json_string, to_value, value_to_json};
pub use error::Error;
pub use typed::TypedAccess;

// Re-export core types for convenience
pub use objpath_core::{PathContext, PathLike, Value};
