//! Point: a named latitude/longitude pair with free-form attributes.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{GeoStoreError, ValidationError};
use crate::extra_data::ExtraData;
use crate::filter::{FieldKind, FilterField, FilterValue, Filterable};
use crate::id::PointId;

/// A persisted point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub id: PointId,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub extra_data: ExtraData,
}

/// A validated point that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPoint {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub extra_data: ExtraData,
}

impl NewPoint {
    /// Attach the identifier assigned by the store.
    #[must_use]
    pub fn with_id(self, id: PointId) -> Point {
        Point {
            id,
            name: self.name,
            latitude: self.latitude,
            longitude: self.longitude,
            extra_data: self.extra_data,
        }
    }
}

impl Point {
    /// Create a builder for constructing a [`NewPoint`].
    #[must_use]
    pub fn builder() -> PointBuilder {
        PointBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`GeoStoreError::Validation`] when `name` is empty or a
    /// coordinate is not finite.
    pub fn validate(&self) -> Result<(), GeoStoreError> {
        if self.name.is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        check_finite(self.latitude)?;
        check_finite(self.longitude)?;
        Ok(())
    }

    /// Apply a partial update: absent fields keep their value and
    /// `extra_data` is merged key by key.
    pub fn apply(&mut self, patch: PointPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(latitude) = patch.latitude {
            self.latitude = latitude;
        }
        if let Some(longitude) = patch.longitude {
            self.longitude = longitude;
        }
        if let Some(extra_data) = patch.extra_data {
            self.extra_data.merge(extra_data);
        }
    }
}

/// Step-by-step builder for [`NewPoint`].
#[derive(Debug, Default)]
pub struct PointBuilder {
    name: Option<String>,
    latitude: Option<f64>,
    longitude: Option<f64>,
    extra_data: ExtraData,
}

impl PointBuilder {
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn latitude(mut self, latitude: f64) -> Self {
        self.latitude = Some(latitude);
        self
    }

    #[must_use]
    pub fn longitude(mut self, longitude: f64) -> Self {
        self.longitude = Some(longitude);
        self
    }

    #[must_use]
    pub fn extra_data(mut self, extra_data: ExtraData) -> Self {
        self.extra_data = extra_data;
        self
    }

    /// Consume the builder, validate, and return a [`NewPoint`].
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingPointFields`] if the name is missing
    /// or empty or a coordinate is missing, and
    /// [`ValidationError::NonNumericCoordinate`] for non-finite coordinates.
    pub fn build(self) -> Result<NewPoint, GeoStoreError> {
        let (Some(name), Some(latitude), Some(longitude)) =
            (self.name, self.latitude, self.longitude)
        else {
            return Err(ValidationError::MissingPointFields.into());
        };
        if name.is_empty() {
            return Err(ValidationError::MissingPointFields.into());
        }
        check_finite(latitude)?;
        check_finite(longitude)?;

        Ok(NewPoint {
            name,
            latitude,
            longitude,
            extra_data: self.extra_data,
        })
    }
}

/// Fields of a partial point update. `None` means "keep the current value".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointPatch {
    pub name: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub extra_data: Option<ExtraData>,
}

/// Read a coordinate from a JSON number or a numeric string.
///
/// # Errors
///
/// Returns [`ValidationError::NonNumericCoordinate`] for any other value and
/// for NaN or infinite numbers.
pub fn coordinate_from_json(value: &Value) -> Result<f64, ValidationError> {
    let parsed = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed
        .filter(|v| v.is_finite())
        .ok_or(ValidationError::NonNumericCoordinate)
}

fn check_finite(value: f64) -> Result<(), ValidationError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ValidationError::NonNumericCoordinate)
    }
}

/// Fields a point list may be filtered on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointField {
    Name,
    Latitude,
    Longitude,
}

impl FilterField for PointField {
    fn from_key(key: &str) -> Option<Self> {
        match key {
            "name" => Some(Self::Name),
            "latitude" => Some(Self::Latitude),
            "longitude" => Some(Self::Longitude),
            _ => None,
        }
    }

    fn column(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Latitude => "latitude",
            Self::Longitude => "longitude",
        }
    }

    fn kind(self) -> FieldKind {
        match self {
            Self::Name => FieldKind::Text,
            Self::Latitude | Self::Longitude => FieldKind::Real,
        }
    }
}

impl Filterable for Point {
    type Field = PointField;

    fn value_of(&self, field: PointField) -> FilterValue {
        match field {
            PointField::Name => FilterValue::Text(self.name.clone()),
            PointField::Latitude => FilterValue::Real(self.latitude),
            PointField::Longitude => FilterValue::Real(self.longitude),
        }
    }
}
