//! Polygon service: use-cases for managing polygons.
//!
//! Unlike points, polygons carry no uniqueness rule: two polygons may share
//! the exact same coordinate list.

use geostore_domain::error::{GeoStoreError, NotFoundError};
use geostore_domain::filter::Filters;
use geostore_domain::id::PolygonId;
use geostore_domain::polygon::{NewPolygon, Polygon, PolygonField, PolygonPatch};

use crate::ports::PolygonRepository;

/// Application service for polygon CRUD operations.
pub struct PolygonService<R> {
    repo: R,
}

impl<R: PolygonRepository> PolygonService<R> {
    /// Create a new service backed by the given repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Persist a new polygon.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    #[tracing::instrument(skip(self, polygon), fields(polygon_name = %polygon.name))]
    pub async fn create_polygon(&self, polygon: NewPolygon) -> Result<Polygon, GeoStoreError> {
        let created = self.repo.create(polygon).await?;
        tracing::debug!(id = %created.id, "polygon created");
        Ok(created)
    }

    /// Look up a polygon by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`GeoStoreError::NotFound`] when no polygon with `id` exists,
    /// or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn get_polygon(&self, id: PolygonId) -> Result<Polygon, GeoStoreError> {
        self.repo.get_by_id(id).await?.ok_or_else(|| {
            NotFoundError {
                entity: "polygon",
                id: id.to_string(),
            }
            .into()
        })
    }

    /// List the polygons matching every filter.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    #[tracing::instrument(skip(self, filters))]
    pub async fn list_polygons(
        &self,
        filters: Filters<PolygonField>,
    ) -> Result<Vec<Polygon>, GeoStoreError> {
        self.repo.find(filters).await
    }

    /// Apply a partial update to an existing polygon.
    ///
    /// # Errors
    ///
    /// Returns [`GeoStoreError::NotFound`] if the polygon does not exist,
    /// [`GeoStoreError::Validation`] if the result breaks an invariant, or a
    /// storage error from the repository.
    #[tracing::instrument(skip(self, patch))]
    pub async fn update_polygon(
        &self,
        id: PolygonId,
        patch: PolygonPatch,
    ) -> Result<Polygon, GeoStoreError> {
        let mut polygon = self.get_polygon(id).await?;
        polygon.apply(patch);
        polygon.validate()?;
        self.repo.update(polygon).await
    }

    /// Delete a polygon by id.
    ///
    /// # Errors
    ///
    /// Returns [`GeoStoreError::NotFound`] if the polygon does not exist, or a
    /// storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn delete_polygon(&self, id: PolygonId) -> Result<(), GeoStoreError> {
        self.repo.delete(id).await
    }
}
