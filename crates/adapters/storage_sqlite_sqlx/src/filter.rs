//! Translate domain filters into parameterized `SELECT` statements.
//!
//! Column names come from the [`FilterField`] allow-list, never from the
//! request, and every value is bound as a parameter.

use geostore_domain::filter::{FilterField, FilterValue, Filters};
use sqlx::{QueryBuilder, Sqlite};

/// Build `SELECT * FROM <table> [WHERE col = ? AND ...] ORDER BY id`.
pub(crate) fn select_where<F: FilterField>(
    table: &'static str,
    filters: &Filters<F>,
) -> QueryBuilder<'static, Sqlite> {
    let mut builder = QueryBuilder::new(format!("SELECT * FROM {table}"));
    for (index, filter) in filters.iter().enumerate() {
        builder.push(if index == 0 { " WHERE " } else { " AND " });
        builder.push(filter.field.column());
        builder.push(" = ");
        match &filter.value {
            FilterValue::Text(text) => builder.push_bind(text.clone()),
            FilterValue::Real(value) => builder.push_bind(*value),
        };
    }
    builder.push(" ORDER BY id");
    builder
}
