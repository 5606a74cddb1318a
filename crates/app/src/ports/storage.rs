//! Storage port: repository traits for the record store.
//!
//! Identifiers are assigned by the store, so `create` takes a draft
//! (`NewPoint`/`NewPolygon`) and returns the persisted record. `update` and
//! `delete` report [`GeoStoreError::NotFound`] when no row matches, which
//! keeps the existence check and the write in a single statement.

use std::future::Future;

use geostore_domain::error::GeoStoreError;
use geostore_domain::filter::Filters;
use geostore_domain::id::{PointId, PolygonId};
use geostore_domain::point::{NewPoint, Point, PointField};
use geostore_domain::polygon::{NewPolygon, Polygon, PolygonField};

/// Persistence operations for points.
///
/// Implementations must reject a second point with the same
/// `(latitude, longitude)` with [`GeoStoreError::Conflict`], atomically.
pub trait PointRepository {
    fn create(&self, point: NewPoint) -> impl Future<Output = Result<Point, GeoStoreError>> + Send;

    fn get_by_id(
        &self,
        id: PointId,
    ) -> impl Future<Output = Result<Option<Point>, GeoStoreError>> + Send;

    /// Return every point matching all `filters`, ordered by id.
    fn find(
        &self,
        filters: Filters<PointField>,
    ) -> impl Future<Output = Result<Vec<Point>, GeoStoreError>> + Send;

    fn update(&self, point: Point) -> impl Future<Output = Result<Point, GeoStoreError>> + Send;

    fn delete(&self, id: PointId) -> impl Future<Output = Result<(), GeoStoreError>> + Send;
}

/// Persistence operations for polygons.
pub trait PolygonRepository {
    fn create(
        &self,
        polygon: NewPolygon,
    ) -> impl Future<Output = Result<Polygon, GeoStoreError>> + Send;

    fn get_by_id(
        &self,
        id: PolygonId,
    ) -> impl Future<Output = Result<Option<Polygon>, GeoStoreError>> + Send;

    /// Return every polygon matching all `filters`, ordered by id.
    fn find(
        &self,
        filters: Filters<PolygonField>,
    ) -> impl Future<Output = Result<Vec<Polygon>, GeoStoreError>> + Send;

    fn update(
        &self,
        polygon: Polygon,
    ) -> impl Future<Output = Result<Polygon, GeoStoreError>> + Send;

    fn delete(&self, id: PolygonId) -> impl Future<Output = Result<(), GeoStoreError>> + Send;
}
