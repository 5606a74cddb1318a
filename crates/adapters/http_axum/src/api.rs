//! JSON resource handler modules.
//!
//! Each resource lives at a single path and dispatches on the HTTP verb; the
//! record identifier travels in the `id` query parameter.

#[allow(clippy::missing_errors_doc)]
pub mod points;
#[allow(clippy::missing_errors_doc)]
pub mod polygons;

use std::str::FromStr;

use axum::extract::rejection::JsonRejection;
use axum::{Json, Router};
use axum::routing::{MethodRouter, get};
use serde::Deserialize;

use geostore_app::ports::{PointRepository, PolygonRepository};
use geostore_domain::error::ValidationError;
use geostore_domain::filter::ID_KEY;

use crate::error::ApiError;
use crate::state::AppState;

/// Query string of `PUT` and `DELETE` requests.
#[derive(Debug, Default, Deserialize)]
pub struct IdQuery {
    pub id: Option<String>,
}

impl IdQuery {
    /// Parse the mandatory identifier. An empty `id=` counts as missing.
    fn require<T>(&self, entity: &'static str, action: &'static str) -> Result<T, ValidationError>
    where
        T: FromStr<Err = ValidationError>,
    {
        match self.id.as_deref().map(str::trim) {
            Some(raw) if !raw.is_empty() => raw.parse(),
            _ => Err(ValidationError::MissingId { entity, action }),
        }
    }
}

/// Find a non-empty `id` among raw query pairs.
fn find_id(params: &[(String, String)]) -> Option<&str> {
    params
        .iter()
        .find(|(key, value)| key == ID_KEY && !value.trim().is_empty())
        .map(|(_, value)| value.as_str())
}

/// Unwrap a partial-update body. A request sent without a body and without
/// a `Content-Type` header is an empty patch.
fn patch_body<T: Default>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    match payload {
        Ok(Json(body)) => Ok(body),
        Err(JsonRejection::MissingJsonContentType(_)) => Ok(T::default()),
        Err(rejection) => Err(rejection.into()),
    }
}

/// Build the resource routes, reachable with and without a trailing slash.
pub fn routes<PR, GR>() -> Router<AppState<PR, GR>>
where
    PR: PointRepository + Send + Sync + 'static,
    GR: PolygonRepository + Send + Sync + 'static,
{
    Router::new()
        .route("/points", point_methods())
        .route("/points/", point_methods())
        .route("/polygons", polygon_methods())
        .route("/polygons/", polygon_methods())
}

fn point_methods<PR, GR>() -> MethodRouter<AppState<PR, GR>>
where
    PR: PointRepository + Send + Sync + 'static,
    GR: PolygonRepository + Send + Sync + 'static,
{
    get(points::list::<PR, GR>)
        .post(points::create::<PR, GR>)
        .put(points::update::<PR, GR>)
        .delete(points::delete::<PR, GR>)
}

fn polygon_methods<PR, GR>() -> MethodRouter<AppState<PR, GR>>
where
    PR: PointRepository + Send + Sync + 'static,
    GR: PolygonRepository + Send + Sync + 'static,
{
    get(polygons::list::<PR, GR>)
        .post(polygons::create::<PR, GR>)
        .put(polygons::update::<PR, GR>)
        .delete(polygons::delete::<PR, GR>)
}
