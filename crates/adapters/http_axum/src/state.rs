//! Shared application state for axum handlers.

use std::sync::Arc;

use geostore_app::ports::{PointRepository, PolygonRepository};
use geostore_app::services::point_service::PointService;
use geostore_app::services::polygon_service::PolygonService;

use crate::error::ErrorStatusPolicy;

/// Application state shared across all axum handlers.
///
/// Generic over the repository types to avoid dynamic dispatch.
/// `Clone` is implemented manually so the underlying types themselves do not
/// need to be `Clone`; only the `Arc` wrappers are cloned.
pub struct AppState<PR, GR> {
    /// Point CRUD service.
    pub point_service: Arc<PointService<PR>>,
    /// Polygon CRUD service.
    pub polygon_service: Arc<PolygonService<GR>>,
    /// Status code mapping for error responses.
    pub status_policy: ErrorStatusPolicy,
}

impl<PR, GR> Clone for AppState<PR, GR> {
    fn clone(&self) -> Self {
        Self {
            point_service: Arc::clone(&self.point_service),
            polygon_service: Arc::clone(&self.polygon_service),
            status_policy: self.status_policy,
        }
    }
}

impl<PR, GR> AppState<PR, GR>
where
    PR: PointRepository + Send + Sync + 'static,
    GR: PolygonRepository + Send + Sync + 'static,
{
    /// Create a new application state from service instances.
    pub fn new(point_service: PointService<PR>, polygon_service: PolygonService<GR>) -> Self {
        Self {
            point_service: Arc::new(point_service),
            polygon_service: Arc::new(polygon_service),
            status_policy: ErrorStatusPolicy::default(),
        }
    }

    /// Replace the error status code policy.
    #[must_use]
    pub fn with_status_policy(mut self, status_policy: ErrorStatusPolicy) -> Self {
        self.status_policy = status_policy;
        self
    }
}
