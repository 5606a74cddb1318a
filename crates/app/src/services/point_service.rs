//! Point service: use-cases for managing points.

use geostore_domain::error::{GeoStoreError, NotFoundError};
use geostore_domain::filter::Filters;
use geostore_domain::id::PointId;
use geostore_domain::point::{NewPoint, Point, PointField, PointPatch};

use crate::ports::PointRepository;

/// Application service for point CRUD operations.
pub struct PointService<R> {
    repo: R,
}

impl<R: PointRepository> PointService<R> {
    /// Create a new service backed by the given repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Persist a new point.
    ///
    /// # Errors
    ///
    /// Returns [`GeoStoreError::Conflict`] when another point already sits at
    /// the same coordinates, or a storage error from the repository.
    #[tracing::instrument(skip(self, point), fields(point_name = %point.name))]
    pub async fn create_point(&self, point: NewPoint) -> Result<Point, GeoStoreError> {
        let created = self.repo.create(point).await?;
        tracing::debug!(id = %created.id, "point created");
        Ok(created)
    }

    /// Look up a point by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`GeoStoreError::NotFound`] when no point with `id` exists,
    /// or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn get_point(&self, id: PointId) -> Result<Point, GeoStoreError> {
        self.repo.get_by_id(id).await?.ok_or_else(|| {
            NotFoundError {
                entity: "point",
                id: id.to_string(),
            }
            .into()
        })
    }

    /// List the points matching every filter; no filters lists all points.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    #[tracing::instrument(skip(self, filters))]
    pub async fn list_points(
        &self,
        filters: Filters<PointField>,
    ) -> Result<Vec<Point>, GeoStoreError> {
        self.repo.find(filters).await
    }

    /// Apply a partial update to an existing point.
    ///
    /// # Errors
    ///
    /// Returns [`GeoStoreError::NotFound`] if the point does not exist,
    /// [`GeoStoreError::Validation`] if the result breaks an invariant,
    /// [`GeoStoreError::Conflict`] if it lands on another point's
    /// coordinates, or a storage error from the repository.
    #[tracing::instrument(skip(self, patch))]
    pub async fn update_point(
        &self,
        id: PointId,
        patch: PointPatch,
    ) -> Result<Point, GeoStoreError> {
        let mut point = self.get_point(id).await?;
        point.apply(patch);
        point.validate()?;
        self.repo.update(point).await
    }

    /// Delete a point by id.
    ///
    /// # Errors
    ///
    /// Returns [`GeoStoreError::NotFound`] if the point does not exist, or a
    /// storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn delete_point(&self, id: PointId) -> Result<(), GeoStoreError> {
        self.repo.delete(id).await
    }
}
