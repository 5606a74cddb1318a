//! Equality filters restricted to an explicit allow-list of fields.
//!
//! Each resource declares the fields it may be filtered on through a
//! [`FilterField`] enum; query keys outside that set are rejected instead of
//! being forwarded to the store.

use crate::error::ValidationError;

/// Query key that selects a single record and is never a filter.
pub const ID_KEY: &str = "id";

/// How a filter value is parsed and compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Real,
}

/// A typed filter value.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    Text(String),
    Real(f64),
}

/// A field that may appear in an equality filter.
pub trait FilterField: Copy {
    /// Resolve a query key, returning `None` for keys outside the allow-list.
    fn from_key(key: &str) -> Option<Self>;

    /// Column holding this field in the record store.
    fn column(self) -> &'static str;

    fn kind(self) -> FieldKind;
}

/// A record whose fields can be compared against a filter.
pub trait Filterable {
    type Field: FilterField;

    fn value_of(&self, field: Self::Field) -> FilterValue;
}

/// One `field = value` condition.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter<F> {
    pub field: F,
    pub value: FilterValue,
}

/// A conjunction of equality conditions. Empty means "every record".
#[derive(Debug, Clone, PartialEq)]
pub struct Filters<F>(Vec<Filter<F>>);

impl<F> Default for Filters<F> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<F: FilterField> Filters<F> {
    /// Build filters from raw query pairs, skipping the [`ID_KEY`] key.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::UnknownFilterField`] for a key outside the
    /// allow-list and [`ValidationError::InvalidFilterValue`] when a numeric
    /// field receives a value that is not a finite number.
    pub fn from_query<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Result<Self, ValidationError>
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut filters = Vec::new();
        for (key, value) in pairs {
            let (key, value) = (key.as_ref(), value.as_ref());
            if key == ID_KEY {
                continue;
            }
            let field = F::from_key(key)
                .ok_or_else(|| ValidationError::UnknownFilterField(key.to_owned()))?;
            let value = match field.kind() {
                FieldKind::Text => FilterValue::Text(value.to_owned()),
                FieldKind::Real => value
                    .trim()
                    .parse::<f64>()
                    .ok()
                    .filter(|v| v.is_finite())
                    .map(FilterValue::Real)
                    .ok_or_else(|| ValidationError::InvalidFilterValue {
                        field: field.column(),
                        value: value.to_owned(),
                    })?,
            };
            filters.push(Filter { field, value });
        }
        Ok(Self(filters))
    }

    /// Add a condition.
    #[must_use]
    pub fn with(mut self, field: F, value: FilterValue) -> Self {
        self.0.push(Filter { field, value });
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = &Filter<F>> {
        self.0.iter()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Evaluate every condition against `record`.
    pub fn matches<R>(&self, record: &R) -> bool
    where
        R: Filterable<Field = F>,
    {
        self.0
            .iter()
            .all(|filter| record.value_of(filter.field) == filter.value)
    }
}
