//! Resource handler for points (`/points/`).

use std::str::FromStr;

use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use serde_json::Value;

use geostore_app::ports::{PointRepository, PolygonRepository};
use geostore_domain::error::ValidationError;
use geostore_domain::extra_data::ExtraData;
use geostore_domain::filter::Filters;
use geostore_domain::id::PointId;
use geostore_domain::point::{Point, PointField, PointPatch, coordinate_from_json};

use super::{IdQuery, find_id, patch_body};
use crate::error::ApiError;
use crate::state::AppState;

/// Request body for creating a point.
///
/// Coordinates are taken as raw JSON so numeric strings are accepted.
#[derive(Deserialize)]
pub struct CreatePointRequest {
    pub name: Option<String>,
    pub latitude: Option<Value>,
    pub longitude: Option<Value>,
    pub extra_data: Option<Value>,
}

/// Request body for a partial point update.
#[derive(Default, Deserialize)]
pub struct UpdatePointRequest {
    pub name: Option<String>,
    pub latitude: Option<Value>,
    pub longitude: Option<Value>,
    pub extra_data: Option<Value>,
}

impl UpdatePointRequest {
    fn into_patch(self) -> Result<PointPatch, ValidationError> {
        Ok(PointPatch {
            name: self.name,
            latitude: self
                .latitude
                .as_ref()
                .map(coordinate_from_json)
                .transpose()?,
            longitude: self
                .longitude
                .as_ref()
                .map(coordinate_from_json)
                .transpose()?,
            extra_data: self
                .extra_data
                .map(|value| ExtraData::from_json(Some(value)))
                .transpose()?,
        })
    }
}

/// Possible responses from the list endpoint.
pub enum ListResponse {
    /// `?id=` was given: the single matching record.
    One(Json<Point>),
    /// The records matching the filters.
    Many(Json<Vec<Point>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::One(json) => json.into_response(),
            Self::Many(json) => json.into_response(),
        }
    }
}

/// Possible responses from the update endpoint.
pub enum UpdateResponse {
    Ok(Json<Point>),
}

impl IntoResponse for UpdateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the create endpoint.
pub enum CreateResponse {
    Created(Json<Point>),
}

impl IntoResponse for CreateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

/// Possible responses from the delete endpoint.
pub enum DeleteResponse {
    NoContent,
}

impl IntoResponse for DeleteResponse {
    fn into_response(self) -> Response {
        match self {
            Self::NoContent => StatusCode::NO_CONTENT.into_response(),
        }
    }
}

/// `GET /points/?id=` or `GET /points/?name=&latitude=&longitude=`
pub async fn list<PR, GR>(
    State(state): State<AppState<PR, GR>>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<ListResponse, ApiError>
where
    PR: PointRepository + Send + Sync + 'static,
    GR: PolygonRepository + Send + Sync + 'static,
{
    let Query(params) = query?;

    if let Some(raw) = find_id(&params) {
        let id = PointId::from_str(raw)?;
        let point = state.point_service.get_point(id).await?;
        return Ok(ListResponse::One(Json(point)));
    }

    let filters = Filters::<PointField>::from_query(params)?;
    let points = state.point_service.list_points(filters).await?;
    Ok(ListResponse::Many(Json(points)))
}

/// `POST /points/`
pub async fn create<PR, GR>(
    State(state): State<AppState<PR, GR>>,
    payload: Result<Json<CreatePointRequest>, JsonRejection>,
) -> Result<CreateResponse, ApiError>
where
    PR: PointRepository + Send + Sync + 'static,
    GR: PolygonRepository + Send + Sync + 'static,
{
    let Json(req) = payload?;

    let (Some(name), Some(latitude), Some(longitude)) = (req.name, req.latitude, req.longitude)
    else {
        return Err(ValidationError::MissingPointFields.into());
    };
    if name.is_empty() {
        return Err(ValidationError::MissingPointFields.into());
    }

    let point = Point::builder()
        .name(name)
        .latitude(coordinate_from_json(&latitude)?)
        .longitude(coordinate_from_json(&longitude)?)
        .extra_data(ExtraData::from_json(req.extra_data)?)
        .build()?;

    let created = state.point_service.create_point(point).await?;
    Ok(CreateResponse::Created(Json(created)))
}

/// `PUT /points/?id=`
pub async fn update<PR, GR>(
    State(state): State<AppState<PR, GR>>,
    query: Result<Query<IdQuery>, QueryRejection>,
    payload: Result<Json<UpdatePointRequest>, JsonRejection>,
) -> Result<UpdateResponse, ApiError>
where
    PR: PointRepository + Send + Sync + 'static,
    GR: PolygonRepository + Send + Sync + 'static,
{
    let Query(query) = query?;
    let id: PointId = query.require("point", "update")?;
    let req = patch_body(payload)?;

    let updated = state
        .point_service
        .update_point(id, req.into_patch()?)
        .await?;
    Ok(UpdateResponse::Ok(Json(updated)))
}

/// `DELETE /points/?id=`
pub async fn delete<PR, GR>(
    State(state): State<AppState<PR, GR>>,
    query: Result<Query<IdQuery>, QueryRejection>,
) -> Result<DeleteResponse, ApiError>
where
    PR: PointRepository + Send + Sync + 'static,
    GR: PolygonRepository + Send + Sync + 'static,
{
    let Query(query) = query?;
    let id: PointId = query.require("point", "delete")?;

    state.point_service.delete_point(id).await?;
    Ok(DeleteResponse::NoContent)
}
