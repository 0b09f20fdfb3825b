//! Typed get/set extension trait.

use objpath_core::{get, set, PathContext, PathLike, Value};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::convert::{from_value, to_value};
use crate::Error;

/// Extension trait for reading and writing Rust types at a path.
///
/// # Example
///
/// ```rust
/// use objpath_core::{PathContext, Value};
/// use objpath_serde::TypedAccess;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Debug, PartialEq, Serialize, Deserialize)]
/// struct Server {
///     host: String,
///     port: u16,
/// }
///
/// let ctx = PathContext::default();
/// let mut config = Value::map();
/// let server = Server { host: "localhost".into(), port: 8080 };
/// config.set_as("servers/main", &server, &ctx).unwrap();
///
/// let port: Option<u16> = config.get_as("servers/main/port", &ctx).unwrap();
/// assert_eq!(port, Some(8080));
/// let back: Option<Server> = config.get_as("servers/main", &ctx).unwrap();
/// assert_eq!(back, Some(server));
/// ```
pub trait TypedAccess {
    /// Deserialize the value at `path`, or `None` if nothing is there.
    fn get_as<T, P>(&self, path: &P, context: &PathContext) -> Result<Option<T>, Error>
    where
        T: DeserializeOwned,
        P: PathLike + ?Sized;

    /// Serialize `data` and store it at `path`.
    fn set_as<T, P>(&mut self, path: &P, data: &T, context: &PathContext) -> Result<(), Error>
    where
        T: Serialize + ?Sized,
        P: PathLike + ?Sized;
}

impl TypedAccess for Value {
    fn get_as<T, P>(&self, path: &P, context: &PathContext) -> Result<Option<T>, Error>
    where
        T: DeserializeOwned,
        P: PathLike + ?Sized,
    {
        let Some(value) = get(self, path, context) else {
            return Ok(None);
        };
        Ok(Some(from_value(value)?))
    }

    fn set_as<T, P>(&mut self, path: &P, data: &T, context: &PathContext) -> Result<(), Error>
    where
        T: Serialize + ?Sized,
        P: PathLike + ?Sized,
    {
        let value = to_value(data)?;
        set(self, path, value, context);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use collection_literals::btree;

    fn ctx() -> PathContext {
        PathContext::default()
    }

    #[test]
    fn get_as_missing_is_none() {
        let tree = Value::map();
        let result: Option<String> = tree.get_as("nope", &ctx()).unwrap();
        assert_eq!(result, None);
    }

    #[test]
    fn get_as_wrong_type_is_error() {
        let tree = Value::from(btree! { "n".to_string() => Value::from("text") });
        let result: Result<Option<u32>, _> = tree.get_as("n", &ctx());
        assert!(matches!(result, Err(Error::Decode(_))));
    }

    #[test]
    fn set_as_creates_path() {
        let mut tree = Value::Null;
        tree.set_as("a/b", &vec![1, 2, 3], &ctx()).unwrap();
        assert_eq!(
            get(&tree, "a/b", &ctx()),
            Some(&Value::from(vec![1i64, 2, 3]))
        );
    }

    #[test]
    fn get_as_json_value() {
        let mut tree = Value::map();
        tree.set_as("x", "hello", &ctx()).unwrap();
        let json: Option<serde_json::Value> = tree.get_as("", &ctx()).unwrap();
        assert_eq!(json, Some(serde_json::json!({"x": "hello"})));
    }
}
