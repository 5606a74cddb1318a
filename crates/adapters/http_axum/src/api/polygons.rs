//! Resource handler for polygons (`/polygons/`).

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
use geostore_domain::id::PolygonId;
use geostore_domain::polygon::{Polygon, PolygonField, PolygonPatch, coordinates_from_json};

use super::{IdQuery, find_id, patch_body};
use crate::error::ApiError;
use crate::state::AppState;

/// Request body for creating a polygon.
#[derive(Deserialize)]
pub struct CreatePolygonRequest {
    pub name: Option<String>,
    pub coordinates: Option<Value>,
    pub extra_data: Option<Value>,
}

/// Request body for a partial polygon update.
#[derive(Default, Deserialize)]
pub struct UpdatePolygonRequest {
    pub name: Option<String>,
    pub coordinates: Option<Value>,
    pub extra_data: Option<Value>,
}

impl UpdatePolygonRequest {
    fn into_patch(self) -> Result<PolygonPatch, ValidationError> {
        Ok(PolygonPatch {
            name: self.name,
            coordinates: self.coordinates.map(coordinates_from_json).transpose()?,
            extra_data: self
                .extra_data
                .map(|value| ExtraData::from_json(Some(value)))
                .transpose()?,
        })
    }
}

/// Possible responses from the list endpoint.
pub enum ListResponse {
    One(Json<Polygon>),
    Many(Json<Vec<Polygon>>),
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
    Ok(Json<Polygon>),
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
    Created(Json<Polygon>),
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

/// `GET /polygons/?id=` or `GET /polygons/?name=`
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
        let id = PolygonId::from_str(raw)?;
        let polygon = state.polygon_service.get_polygon(id).await?;
        return Ok(ListResponse::One(Json(polygon)));
    }

    let filters = Filters::<PolygonField>::from_query(params)?;
    let polygons = state.polygon_service.list_polygons(filters).await?;
    Ok(ListResponse::Many(Json(polygons)))
}

/// `POST /polygons/`
pub async fn create<PR, GR>(
    State(state): State<AppState<PR, GR>>,
    payload: Result<Json<CreatePolygonRequest>, JsonRejection>,
) -> Result<CreateResponse, ApiError>
where
    PR: PointRepository + Send + Sync + 'static,
    GR: PolygonRepository + Send + Sync + 'static,
{
    let Json(req) = payload?;

    let (Some(name), Some(coordinates)) = (req.name, req.coordinates) else {
        return Err(ValidationError::MissingPolygonFields.into());
    };
    if name.is_empty() {
        return Err(ValidationError::MissingPolygonFields.into());
    }

    let polygon = Polygon::builder()
        .name(name)
        .coordinates(coordinates_from_json(coordinates)?)
        .extra_data(ExtraData::from_json(req.extra_data)?)
        .build()?;

    let created = state.polygon_service.create_polygon(polygon).await?;
    Ok(CreateResponse::Created(Json(created)))
}

/// `PUT /polygons/?id=`
pub async fn update<PR, GR>(
    State(state): State<AppState<PR, GR>>,
    query: Result<Query<IdQuery>, QueryRejection>,
    payload: Result<Json<UpdatePolygonRequest>, JsonRejection>,
) -> Result<UpdateResponse, ApiError>
where
    PR: PointRepository + Send + Sync + 'static,
    GR: PolygonRepository + Send + Sync + 'static,
{
    let Query(query) = query?;
    let id: PolygonId = query.require("polygon", "update")?;
    let req = patch_body(payload)?;

    let updated = state
        .polygon_service
        .update_polygon(id, req.into_patch()?)
        .await?;
    Ok(UpdateResponse::Ok(Json(updated)))
}

/// `DELETE /polygons/?id=`
pub async fn delete<PR, GR>(
    State(state): State<AppState<PR, GR>>,
    query: Result<Query<IdQuery>, QueryRejection>,
) -> Result<DeleteResponse, ApiError>
where
    PR: PointRepository + Send + Sync + 'static,
    GR: PolygonRepository + Send + Sync + 'static,
{
    let Query(query) = query?;
    let id: PolygonId = query.require("polygon", "delete")?;

    state.polygon_service.delete_polygon(id).await?;
    Ok(DeleteResponse::NoContent)
}
