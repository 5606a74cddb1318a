//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`GeoStoreError`] via `From`, so handlers can map a single enum to a
//! response.

/// Top-level error shared by every layer.
#[derive(Debug, thiserror::Error)]
pub enum GeoStoreError {
    /// Missing or malformed input.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The request clashes with an existing record.
    #[error(transparent)]
    Conflict(#[from] ConflictError),

    /// The requested record does not exist.
    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    /// The record store failed.
    #[error("storage error: {0}")]
    Storage(Box<dyn std::error::Error + Send + Sync>),
}

/// Input that violates a domain invariant or cannot be parsed.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("name must not be empty")]
    EmptyName,

    #[error("Name, latitude, and longitude are required fields.")]
    MissingPointFields,

    #[error("Latitude and Longitude must be numeric values.")]
    NonNumericCoordinate,

    #[error("Name and coordinates are required fields.")]
    MissingPolygonFields,

    #[error("A polygon must have at least 3 coordinate points.")]
    TooFewCoordinates,

    #[error("extra_data must be a JSON object")]
    ExtraDataNotObject,

    #[error("{} ID is required to {action}.", capitalize(.entity))]
    MissingId {
        entity: &'static str,
        action: &'static str,
    },

    #[error("invalid id: {0}")]
    InvalidId(String),

    #[error("unknown filter field: {0}")]
    UnknownFilterField(String),

    #[error("invalid value for filter field {field}: {value}")]
    InvalidFilterValue { field: &'static str, value: String },

    #[error("invalid request body: {0}")]
    MalformedBody(String),
}

/// A uniqueness rule rejected the write.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConflictError {
    #[error("Point with these coordinates already exists.")]
    DuplicateCoordinates { latitude: f64, longitude: f64 },
}

/// No record matches the given identifier.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{entity} not found: {id}")]
pub struct NotFoundError {
    pub entity: &'static str,
    pub id: String,
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
