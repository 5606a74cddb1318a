//! `SQLite` implementation of [`PolygonRepository`].

use std::future::Future;

use serde_json::Value;
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use geostore_app::ports::PolygonRepository;
use geostore_domain::error::{GeoStoreError, NotFoundError};
use geostore_domain::extra_data::ExtraData;
use geostore_domain::filter::Filters;
use geostore_domain::id::PolygonId;
use geostore_domain::polygon::{NewPolygon, Polygon, PolygonField};

use crate::error::StorageError;
use crate::filter::select_where;

struct Wrapper(Polygon);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<Polygon> {
        value.map(|w| w.0)
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: i64 = row.try_get("id")?;
        let name: String = row.try_get("name")?;
        let coordinates_json: String = row.try_get("coordinates")?;
        let extra_data_json: String = row.try_get("extra_data")?;

        let coordinates: Vec<Value> = serde_json::from_str(&coordinates_json)
            .map_err(|err| sqlx::Error::Decode(Box::new(err)))?;
        let extra_data: ExtraData = serde_json::from_str(&extra_data_json)
            .map_err(|err| sqlx::Error::Decode(Box::new(err)))?;

        Ok(Self(Polygon {
            id: PolygonId::from_raw(id),
            name,
            coordinates,
            extra_data,
        }))
    }
}

const TABLE: &str = "polygons";
const INSERT: &str = "INSERT INTO polygons (name, coordinates, extra_data) VALUES (?, ?, ?)";
const SELECT_BY_ID: &str = "SELECT * FROM polygons WHERE id = ?";
const UPDATE: &str = "UPDATE polygons SET name = ?, coordinates = ?, extra_data = ? WHERE id = ?";
const DELETE_BY_ID: &str = "DELETE FROM polygons WHERE id = ?";

fn not_found(id: PolygonId) -> GeoStoreError {
    NotFoundError {
        entity: "polygon",
        id: id.to_string(),
    }
    .into()
}

/// `SQLite`-backed polygon repository.
pub struct SqlitePolygonRepository {
    pool: SqlitePool,
}

impl SqlitePolygonRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl PolygonRepository for SqlitePolygonRepository {
    fn create(
        &self,
        polygon: NewPolygon,
    ) -> impl Future<Output = Result<Polygon, GeoStoreError>> + Send {
        let pool = self.pool.clone();
        async move {
            let coordinates =
                serde_json::to_string(&polygon.coordinates).map_err(StorageError::from)?;
            let extra_data =
                serde_json::to_string(&polygon.extra_data).map_err(StorageError::from)?;

            let result = sqlx::query(INSERT)
                .bind(&polygon.name)
                .bind(coordinates)
                .bind(extra_data)
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(polygon.with_id(PolygonId::from_raw(result.last_insert_rowid())))
        }
    }

    fn get_by_id(
        &self,
        id: PolygonId,
    ) -> impl Future<Output = Result<Option<Polygon>, GeoStoreError>> + Send {
        let pool = self.pool.clone();
        async move {
            let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
                .bind(id.as_i64())
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(Wrapper::maybe(row))
        }
    }

    fn find(
        &self,
        filters: Filters<PolygonField>,
    ) -> impl Future<Output = Result<Vec<Polygon>, GeoStoreError>> + Send {
        let pool = self.pool.clone();
        async move {
            let mut builder = select_where(TABLE, &filters);
            let rows: Vec<Wrapper> = builder
                .build_query_as()
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|w| w.0).collect())
        }
    }

    fn update(
        &self,
        polygon: Polygon,
    ) -> impl Future<Output = Result<Polygon, GeoStoreError>> + Send {
        let pool = self.pool.clone();
        async move {
            let coordinates =
                serde_json::to_string(&polygon.coordinates).map_err(StorageError::from)?;
            let extra_data =
                serde_json::to_string(&polygon.extra_data).map_err(StorageError::from)?;

            let result = sqlx::query(UPDATE)
                .bind(&polygon.name)
                .bind(coordinates)
                .bind(extra_data)
                .bind(polygon.id.as_i64())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            if result.rows_affected() == 0 {
                return Err(not_found(polygon.id));
            }
            Ok(polygon)
        }
    }

    fn delete(&self, id: PolygonId) -> impl Future<Output = Result<(), GeoStoreError>> + Send {
        let pool = self.pool.clone();
        async move {
            let result = sqlx::query(DELETE_BY_ID)
                .bind(id.as_i64())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            if result.rows_affected() == 0 {
                return Err(not_found(id));
            }
            Ok(())
        }
    }
}
