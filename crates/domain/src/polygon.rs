//! Polygon: a named, ordered list of coordinates with free-form attributes.
//!
//! Coordinate entries are kept opaque: usually `[lon, lat]` pairs, but any
//! JSON value (including nested rings) is accepted. Only the entry count is
//! checked; closure, winding and self-intersection are not.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{GeoStoreError, ValidationError};
use crate::extra_data::ExtraData;
use crate::filter::{FieldKind, FilterField, FilterValue, Filterable};
use crate::id::PolygonId;

/// Minimum number of coordinate entries a polygon must carry.
pub const MIN_COORDINATES: usize = 3;

/// A persisted polygon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    pub id: PolygonId,
    pub name: String,
    pub coordinates: Vec<Value>,
    pub extra_data: ExtraData,
}

/// A validated polygon that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPolygon {
    pub name: String,
    pub coordinates: Vec<Value>,
    pub extra_data: ExtraData,
}

impl NewPolygon {
    /// Attach the identifier assigned by the store.
    #[must_use]
    pub fn with_id(self, id: PolygonId) -> Polygon {
        Polygon {
            id,
            name: self.name,
            coordinates: self.coordinates,
            extra_data: self.extra_data,
        }
    }
}

impl Polygon {
    /// Create a builder for constructing a [`NewPolygon`].
    #[must_use]
    pub fn builder() -> PolygonBuilder {
        PolygonBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`GeoStoreError::Validation`] when `name` is empty or there
    /// are fewer than [`MIN_COORDINATES`] entries.
    pub fn validate(&self) -> Result<(), GeoStoreError> {
        if self.name.is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        check_count(&self.coordinates)?;
        Ok(())
    }

    /// Apply a partial update: absent fields keep their value and
    /// `extra_data` is merged key by key.
    pub fn apply(&mut self, patch: PolygonPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(coordinates) = patch.coordinates {
            self.coordinates = coordinates;
        }
        if let Some(extra_data) = patch.extra_data {
            self.extra_data.merge(extra_data);
        }
    }
}

/// Step-by-step builder for [`NewPolygon`].
#[derive(Debug, Default)]
pub struct PolygonBuilder {
    name: Option<String>,
    coordinates: Option<Vec<Value>>,
    extra_data: ExtraData,
}

impl PolygonBuilder {
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn coordinates(mut self, coordinates: Vec<Value>) -> Self {
        self.coordinates = Some(coordinates);
        self
    }

    #[must_use]
    pub fn extra_data(mut self, extra_data: ExtraData) -> Self {
        self.extra_data = extra_data;
        self
    }

    /// Consume the builder, validate, and return a [`NewPolygon`].
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingPolygonFields`] if the name or the
    /// coordinates are missing or empty, and
    /// [`ValidationError::TooFewCoordinates`] below [`MIN_COORDINATES`].
    pub fn build(self) -> Result<NewPolygon, GeoStoreError> {
        let (Some(name), Some(coordinates)) = (self.name, self.coordinates) else {
            return Err(ValidationError::MissingPolygonFields.into());
        };
        if name.is_empty() || coordinates.is_empty() {
            return Err(ValidationError::MissingPolygonFields.into());
        }
        check_count(&coordinates)?;

        Ok(NewPolygon {
            name,
            coordinates,
            extra_data: self.extra_data,
        })
    }
}

/// Fields of a partial polygon update. `None` means "keep the current value".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PolygonPatch {
    pub name: Option<String>,
    pub coordinates: Option<Vec<Value>>,
    pub extra_data: Option<ExtraData>,
}

/// Unwrap the coordinate list from a request body value.
///
/// # Errors
///
/// Returns [`ValidationError::TooFewCoordinates`] when the value is not a
/// JSON array.
pub fn coordinates_from_json(value: Value) -> Result<Vec<Value>, ValidationError> {
    match value {
        Value::Array(entries) => Ok(entries),
        _ => Err(ValidationError::TooFewCoordinates),
    }
}

fn check_count(coordinates: &[Value]) -> Result<(), ValidationError> {
    if coordinates.len() < MIN_COORDINATES {
        return Err(ValidationError::TooFewCoordinates);
    }
    Ok(())
}

/// Fields a polygon list may be filtered on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolygonField {
    Name,
}

impl FilterField for PolygonField {
    fn from_key(key: &str) -> Option<Self> {
        match key {
            "name" => Some(Self::Name),
            _ => None,
        }
    }

    fn column(self) -> &'static str {
        match self {
            Self::Name => "name",
        }
    }

    fn kind(self) -> FieldKind {
        match self {
            Self::Name => FieldKind::Text,
        }
    }
}

impl Filterable for Polygon {
    type Field = PolygonField;

    fn value_of(&self, field: PolygonField) -> FilterValue {
        match field {
            PolygonField::Name => FilterValue::Text(self.name.clone()),
        }
    }
}
