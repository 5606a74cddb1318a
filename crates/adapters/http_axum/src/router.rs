//! Axum router assembly.

use axum::Router;
use axum::middleware;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use geostore_app::ports::{PointRepository, PolygonRepository};

use crate::error::apply_status_policy;
use crate::state::AppState;

/// Build the top-level axum [`Router`].
///
/// Mounts the resource handlers at `/points/` and `/polygons/`, rewrites
/// error statuses according to the state's [`ErrorStatusPolicy`], and
/// includes a [`TraceLayer`] that logs each HTTP request/response at the
/// `DEBUG` level using the `tracing` ecosystem.
///
/// [`ErrorStatusPolicy`]: crate::error::ErrorStatusPolicy
pub fn build<PR, GR>(state: AppState<PR, GR>) -> Router
where
    PR: PointRepository + Send + Sync + 'static,
    GR: PolygonRepository + Send + Sync + 'static,
{
    let policy = state.status_policy;
    Router::new()
        .route("/health", get(health_check))
        .merge(crate::api::routes())
        .layer(middleware::from_fn_with_state(policy, apply_status_policy))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}
