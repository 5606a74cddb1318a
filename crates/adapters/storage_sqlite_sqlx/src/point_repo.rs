//! `SQLite` implementation of [`PointRepository`].

use std::future::Future;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use geostore_app::ports::PointRepository;
use geostore_domain::error::{ConflictError, GeoStoreError, NotFoundError};
use geostore_domain::extra_data::ExtraData;
use geostore_domain::filter::Filters;
use geostore_domain::id::PointId;
use geostore_domain::point::{NewPoint, Point, PointField};

use crate::error::{StorageError, is_unique_violation};
use crate::filter::select_where;

/// Wrapper for converting database rows into domain [`Point`].
struct Wrapper(Point);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<Point> {
        value.map(|w| w.0)
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: i64 = row.try_get("id")?;
        let name: String = row.try_get("name")?;
        let latitude: f64 = row.try_get("latitude")?;
        let longitude: f64 = row.try_get("longitude")?;
        let extra_data: String = row.try_get("extra_data")?;

        let extra_data: ExtraData =
            serde_json::from_str(&extra_data).map_err(|err| sqlx::Error::Decode(Box::new(err)))?;

        Ok(Self(Point {
            id: PointId::from_raw(id),
            name,
            latitude,
            longitude,
            extra_data,
        }))
    }
}

const TABLE: &str = "points";
const INSERT: &str =
    "INSERT INTO points (name, latitude, longitude, extra_data) VALUES (?, ?, ?, ?)";
const SELECT_BY_ID: &str = "SELECT * FROM points WHERE id = ?";
const UPDATE: &str =
    "UPDATE points SET name = ?, latitude = ?, longitude = ?, extra_data = ? WHERE id = ?";
const DELETE_BY_ID: &str = "DELETE FROM points WHERE id = ?";

/// Map a write failure, turning a coordinate `UNIQUE` violation into a conflict.
fn write_error(err: sqlx::Error, latitude: f64, longitude: f64) -> GeoStoreError {
    if is_unique_violation(&err) {
        ConflictError::DuplicateCoordinates {
            latitude,
            longitude,
        }
        .into()
    } else {
        StorageError::from(err).into()
    }
}

fn not_found(id: PointId) -> GeoStoreError {
    NotFoundError {
        entity: "point",
        id: id.to_string(),
    }
    .into()
}

/// `SQLite`-backed point repository.
pub struct SqlitePointRepository {
    pool: SqlitePool,
}

impl SqlitePointRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl PointRepository for SqlitePointRepository {
    fn create(&self, point: NewPoint) -> impl Future<Output = Result<Point, GeoStoreError>> + Send {
        let pool = self.pool.clone();
        async move {
            let extra_data = serde_json::to_string(&point.extra_data).map_err(StorageError::from)?;

            let result = sqlx::query(INSERT)
                .bind(&point.name)
                .bind(point.latitude)
                .bind(point.longitude)
                .bind(extra_data)
                .execute(&pool)
                .await
                .map_err(|err| write_error(err, point.latitude, point.longitude))?;

            Ok(point.with_id(PointId::from_raw(result.last_insert_rowid())))
        }
    }

    fn get_by_id(
        &self,
        id: PointId,
    ) -> impl Future<Output = Result<Option<Point>, GeoStoreError>> + Send {
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
        filters: Filters<PointField>,
    ) -> impl Future<Output = Result<Vec<Point>, GeoStoreError>> + Send {
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

    fn update(&self, point: Point) -> impl Future<Output = Result<Point, GeoStoreError>> + Send {
        let pool = self.pool.clone();
        async move {
            let extra_data = serde_json::to_string(&point.extra_data).map_err(StorageError::from)?;

            let result = sqlx::query(UPDATE)
                .bind(&point.name)
                .bind(point.latitude)
                .bind(point.longitude)
                .bind(extra_data)
                .bind(point.id.as_i64())
                .execute(&pool)
                .await
                .map_err(|err| write_error(err, point.latitude, point.longitude))?;

            if result.rows_affected() == 0 {
                return Err(not_found(point.id));
            }
            Ok(point)
        }
    }

    fn delete(&self, id: PointId) -> impl Future<Output = Result<(), GeoStoreError>> + Send {
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
