//! Open-ended attribute map attached to points and polygons.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ValidationError;

/// Caller-defined metadata: string keys mapped to arbitrary JSON values.
///
/// The store keeps it opaque; the only operation the domain performs on it
/// is a shallow [`merge`](Self::merge) during partial updates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExtraData(Map<String, Value>);

impl ExtraData {
    /// Interpret an optional JSON value from a request body.
    ///
    /// Absent and `null` both mean "empty".
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::ExtraDataNotObject`] for any other
    /// non-object value.
    pub fn from_json(value: Option<Value>) -> Result<Self, ValidationError> {
        match value {
            None | Some(Value::Null) => Ok(Self::default()),
            Some(Value::Object(map)) => Ok(Self(map)),
            Some(_) => Err(ValidationError::ExtraDataNotObject),
        }
    }

    /// Insert every key of `other`, overwriting existing keys.
    ///
    /// Keys that only exist in `self` are left untouched.
    pub fn merge(&mut self, other: ExtraData) {
        for (key, value) in other.0 {
            self.0.insert(key, value);
        }
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Map<String, Value>> for ExtraData {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}
