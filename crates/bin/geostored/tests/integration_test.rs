//! End-to-end tests for the full geostored stack.
//!
//! Each test spins up the complete application (in-memory `SQLite`, real repos,
//! real services, real axum router) and exercises the HTTP layer via
//! `tower::ServiceExt::oneshot`. No TCP port is bound.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::Response;
use geostore_adapter_http_axum::error::ErrorStatusPolicy;
use geostore_adapter_http_axum::router;
use geostore_adapter_http_axum::state::AppState;
use geostore_adapter_storage_sqlite_sqlx::{
    Config, SqlitePointRepository, SqlitePolygonRepository,
};
use geostore_app::services::point_service::PointService;
use geostore_app::services::polygon_service::PolygonService;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

/// Build a fully-wired router backed by an in-memory `SQLite` database.
async fn app_with(policy: ErrorStatusPolicy) -> axum::Router {
    let db = Config {
        database_url: "sqlite::memory:".to_string(),
    }
    .build()
    .await
    .expect("in-memory database should initialise");

    let pool = db.pool().clone();

    let state = AppState::new(
        PointService::new(SqlitePointRepository::new(pool.clone())),
        PolygonService::new(SqlitePolygonRepository::new(pool)),
    )
    .with_status_policy(policy);

    router::build(state)
}

async fn app() -> axum::Router {
    app_with(ErrorStatusPolicy::Compat).await
}

async fn send(app: &axum::Router, method: &str, uri: &str, body: Option<Value>) -> Response {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.clone().oneshot(request).await.unwrap()
}

async fn json_body(resp: Response) -> Value {
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn count(app: &axum::Router, uri: &str) -> usize {
    let resp = send(app, "GET", uri, None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    json_body(resp).await.as_array().unwrap().len()
}

fn square() -> Value {
    json!([[0.0, 0.0], [0.0, 1.0], [1.0, 1.0]])
}

// ---------------------------------------------------------------------------
// Health check
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_return_ok_when_health_check_called() {
    let app = app().await;
    let resp = send(&app, "GET", "/health", None).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&bytes[..], b"OK");
}

// ---------------------------------------------------------------------------
// Points
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_create_point_with_default_extra_data() {
    let app = app().await;
    let resp = send(
        &app,
        "POST",
        "/points/",
        Some(json!({"name": "A", "latitude": 1.0, "longitude": 2.0})),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::CREATED);
    let body = json_body(resp).await;
    assert!(body["id"].as_i64().is_some());
    assert_eq!(body["name"], "A");
    assert_eq!(body["latitude"], 1.0);
    assert_eq!(body["longitude"], 2.0);
    assert_eq!(body["extra_data"], json!({}));
}

#[tokio::test]
async fn should_accept_numeric_strings_for_coordinates() {
    let app = app().await;
    let resp = send(
        &app,
        "POST",
        "/points",
        Some(json!({"name": "B", "latitude": "1.5", "longitude": "-3"})),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::CREATED);
    let body = json_body(resp).await;
    assert_eq!(body["latitude"], 1.5);
    assert_eq!(body["longitude"], -3.0);
}

#[tokio::test]
async fn should_reject_duplicate_coordinates_without_persisting() {
    let app = app().await;
    let first = send(
        &app,
        "POST",
        "/points/",
        Some(json!({"name": "A", "latitude": 1.0, "longitude": 2.0})),
    )
    .await;
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = send(
        &app,
        "POST",
        "/points/",
        Some(json!({"name": "B", "latitude": 1.0, "longitude": 2.0})),
    )
    .await;
    assert_eq!(second.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        json_body(second).await,
        json!({"error": "Point with these coordinates already exists."})
    );
    assert_eq!(count(&app, "/points/").await, 1);
}

#[tokio::test]
async fn should_report_conflict_and_not_found_with_typed_status_codes() {
    let app = app_with(ErrorStatusPolicy::Typed).await;
    let point = json!({"name": "A", "latitude": 1.0, "longitude": 2.0});

    send(&app, "POST", "/points/", Some(point.clone())).await;
    let conflict = send(&app, "POST", "/points/", Some(point)).await;
    assert_eq!(conflict.status(), StatusCode::CONFLICT);

    let missing = send(&app, "DELETE", "/points/?id=999", None).await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        json_body(missing).await,
        json!({"error": "point not found: 999"})
    );
}

#[tokio::test]
async fn should_reject_point_with_missing_fields() {
    let app = app().await;
    let resp = send(&app, "POST", "/points/", Some(json!({"name": "A", "latitude": 1.0}))).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        json_body(resp).await,
        json!({"error": "Name, latitude, and longitude are required fields."})
    );
    assert_eq!(count(&app, "/points/").await, 0);
}

#[tokio::test]
async fn should_reject_non_numeric_coordinates() {
    let app = app().await;
    let resp = send(
        &app,
        "POST",
        "/points/",
        Some(json!({"name": "A", "latitude": "north", "longitude": 2.0})),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        json_body(resp).await,
        json!({"error": "Latitude and Longitude must be numeric values."})
    );
}

#[tokio::test]
async fn should_get_single_point_by_id() {
    let app = app().await;
    let created = json_body(
        send(
            &app,
            "POST",
            "/points/",
            Some(json!({"name": "A", "latitude": 1.0, "longitude": 2.0})),
        )
        .await,
    )
    .await;
    let id = created["id"].as_i64().unwrap();

    let resp = send(&app, "GET", &format!("/points/?id={id}&name=ignored"), None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(json_body(resp).await, created);
}

#[tokio::test]
async fn should_reject_malformed_id() {
    let app = app().await;
    let resp = send(&app, "GET", "/points/?id=abc", None).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(json_body(resp).await["error"].is_string());
}

#[tokio::test]
async fn should_merge_extra_data_on_update() {
    let app = app().await;
    let created = json_body(
        send(
            &app,
            "POST",
            "/points/",
            Some(json!({
                "name": "A",
                "latitude": 1.0,
                "longitude": 2.0,
                "extra_data": {"size": 5}
            })),
        )
        .await,
    )
    .await;
    let id = created["id"].as_i64().unwrap();

    let resp = send(
        &app,
        "PUT",
        &format!("/points/?id={id}"),
        Some(json!({"name": "B", "extra_data": {"color": "red"}})),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body = json_body(resp).await;
    assert_eq!(body["name"], "B");
    assert_eq!(body["latitude"], 1.0);
    assert_eq!(body["extra_data"], json!({"size": 5, "color": "red"}));

    let fetched = json_body(send(&app, "GET", &format!("/points/?id={id}"), None).await).await;
    assert_eq!(fetched, body);
}

#[tokio::test]
async fn should_require_id_to_update_point() {
    let app = app().await;
    let resp = send(&app, "PUT", "/points/", Some(json!({"name": "B"}))).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        json_body(resp).await,
        json!({"error": "Point ID is required to update."})
    );
}

#[tokio::test]
async fn should_delete_point_and_leave_count_unchanged_for_unknown_id() {
    let app = app().await;
    let created = json_body(
        send(
            &app,
            "POST",
            "/points/",
            Some(json!({"name": "A", "latitude": 1.0, "longitude": 2.0})),
        )
        .await,
    )
    .await;
    let id = created["id"].as_i64().unwrap();

    let unknown = send(&app, "DELETE", "/points/?id=999", None).await;
    assert_eq!(unknown.status(), StatusCode::BAD_REQUEST);
    assert_eq!(count(&app, "/points/").await, 1);

    let resp = send(&app, "DELETE", &format!("/points/?id={id}"), None).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    assert!(bytes.is_empty());
    assert_eq!(count(&app, "/points/").await, 0);
}

#[tokio::test]
async fn should_filter_points_by_allowed_fields() {
    let app = app().await;
    for (name, lat, lon) in [("A", 1.0, 2.0), ("B", 1.0, 3.0), ("A", 4.0, 5.0)] {
        let resp = send(
            &app,
            "POST",
            "/points/",
            Some(json!({"name": name, "latitude": lat, "longitude": lon})),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::CREATED);
    }

    assert_eq!(count(&app, "/points/").await, 3);
    assert_eq!(count(&app, "/points/?name=A").await, 2);
    assert_eq!(count(&app, "/points/?latitude=1").await, 2);
    assert_eq!(count(&app, "/points/?name=A&latitude=1.0").await, 1);
    assert_eq!(count(&app, "/points/?name=Z").await, 0);

    let resp = send(&app, "GET", "/points/?color=red", None).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        json_body(resp).await,
        json!({"error": "unknown filter field: color"})
    );
}

// ---------------------------------------------------------------------------
// Polygons
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_reject_polygon_with_too_few_coordinates() {
    let app = app().await;
    let resp = send(
        &app,
        "POST",
        "/polygons/",
        Some(json!({"name": "P", "coordinates": [[0.0, 0.0], [1.0, 1.0]]})),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        json_body(resp).await,
        json!({"error": "A polygon must have at least 3 coordinate points."})
    );
    assert_eq!(count(&app, "/polygons/").await, 0);
}

#[tokio::test]
async fn should_create_polygon_with_exactly_three_coordinates() {
    let app = app().await;
    let resp = send(
        &app,
        "POST",
        "/polygons/",
        Some(json!({"name": "P", "coordinates": square()})),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::CREATED);
    let body = json_body(resp).await;
    assert!(body["id"].as_i64().is_some());
    assert_eq!(body["coordinates"], square());
    assert_eq!(body["extra_data"], json!({}));
}

#[tokio::test]
async fn should_reject_polygon_with_missing_fields() {
    let app = app().await;
    let resp = send(&app, "POST", "/polygons/", Some(json!({"name": "P"}))).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        json_body(resp).await,
        json!({"error": "Name and coordinates are required fields."})
    );
}

#[tokio::test]
async fn should_allow_polygons_with_identical_coordinates() {
    let app = app().await;
    for name in ["P", "Q"] {
        let resp = send(
            &app,
            "POST",
            "/polygons/",
            Some(json!({"name": name, "coordinates": square()})),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::CREATED);
    }
    assert_eq!(count(&app, "/polygons/").await, 2);
    assert_eq!(count(&app, "/polygons/?name=Q").await, 1);
}

#[tokio::test]
async fn should_run_polygon_crud_cycle() {
    let app = app().await;
    let created = json_body(
        send(
            &app,
            "POST",
            "/polygons/",
            Some(json!({
                "name": "P",
                "coordinates": square(),
                "extra_data": {"size": 5}
            })),
        )
        .await,
    )
    .await;
    let id = created["id"].as_i64().unwrap();

    let too_few = send(
        &app,
        "PUT",
        &format!("/polygons/?id={id}"),
        Some(json!({"coordinates": [[0.0, 0.0]]})),
    )
    .await;
    assert_eq!(too_few.status(), StatusCode::BAD_REQUEST);

    let new_coordinates = json!([[0.0, 0.0], [0.0, 2.0], [2.0, 2.0], [2.0, 0.0]]);
    let updated = send(
        &app,
        "PUT",
        &format!("/polygons/?id={id}"),
        Some(json!({
            "coordinates": new_coordinates.clone(),
            "extra_data": {"color": "red"}
        })),
    )
    .await;
    assert_eq!(updated.status(), StatusCode::OK);
    let updated = json_body(updated).await;
    assert_eq!(updated["name"], "P");
    assert_eq!(updated["coordinates"], new_coordinates);
    assert_eq!(updated["extra_data"], json!({"size": 5, "color": "red"}));

    let fetched = json_body(send(&app, "GET", &format!("/polygons/?id={id}"), None).await).await;
    assert_eq!(fetched, updated);

    let deleted = send(&app, "DELETE", &format!("/polygons/?id={id}"), None).await;
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);

    let gone = send(&app, "GET", &format!("/polygons/?id={id}"), None).await;
    assert_eq!(gone.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        json_body(gone).await,
        json!({"error": format!("polygon not found: {id}")})
    );
}

#[tokio::test]
async fn should_report_malformed_json_as_error_body() {
    let app = app().await;
    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/polygons/")
                .header("content-type", "application/json")
                .body(Body::from("{\"name\": "))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(json_body(resp).await["error"].is_string());
}

#[tokio::test]
async fn should_return_polygon_unchanged_for_update_without_body() {
    let app = app().await;
    let created = json_body(
        send(
            &app,
            "POST",
            "/polygons/",
            Some(json!({"name": "P", "coordinates": square()})),
        )
        .await,
    )
    .await;
    let id = created["id"].as_i64().unwrap();

    let resp = send(&app, "PUT", &format!("/polygons/?id={id}"), None).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(json_body(resp).await, created);
}
