use std::sync::Arc;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use faculty_workload::api::router;
use faculty_workload::config::AppConfig;
use faculty_workload::error::AppError;
use faculty_workload::services::WorkloadService;
use faculty_workload::state::AppState;
use faculty_workload::store::NoopRosterStore;
use serde_json::{Value, json};
use tower::ServiceExt;

async fn setup_app() -> Router {
    let service = WorkloadService::load(Arc::new(NoopRosterStore))
        .await
        .expect("Failed to build service");
    router(AppState {
        service: Arc::new(service),
    })
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .expect("request failed");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, bytes.to_vec())
}

fn as_json(bytes: &[u8]) -> Value {
    serde_json::from_slice(bytes).expect("json body")
}

#[tokio::test]
async fn test_health_and_options() {
    let app = setup_app().await;

    let (status, _) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, "GET", "/options", None).await;
    assert_eq!(status, StatusCode::OK);
    let options = as_json(&body);
    assert_eq!(options["classifications"], json!(["Full-time PhD", "Full-time MA", "Part-time"]));
    assert_eq!(options["year_levels"][4], "MA 1");
    assert_eq!(options["units"], json!([3, 6]));
    assert_eq!(options["time_slots"].as_array().unwrap().len(), 14);
}

#[tokio::test]
async fn test_add_faculty_and_course_flow() {
    let app = setup_app().await;

    let (status, body) = send(
        &app,
        "POST",
        "/faculty",
        Some(json!({ "name": "A. Reyes", "classification": "Full-time PhD", "is_admin": false })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(as_json(&body)["status"], "Below required (15 units short)");

    let (status, body) = send(
        &app,
        "POST",
        "/faculty",
        Some(json!({ "name": "A. Reyes", "classification": "Part-time" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(as_json(&body)["message"], "A faculty member with this name already exists.");

    let course = json!({
        "faculty": "A. Reyes",
        "name": "Phil 101",
        "year_level": "BA 1",
        "units": 6,
        "schedule": "MW 07:40am-09:10am"
    });
    let (status, body) = send(&app, "POST", "/courses", Some(course)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(as_json(&body)["year"], "BA 1");

    let clash = json!({
        "faculty": "A. Reyes",
        "name": "Phil 102",
        "year_level": "BA 1",
        "units": 3,
        "schedule": "MW 09:20am-10:50am"
    });
    let (status, _) = send(&app, "POST", "/courses", Some(clash)).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let missing = json!({
        "faculty": "Nobody",
        "name": "Phil 103",
        "year_level": "BA 2",
        "units": 3,
        "schedule": "TTh 07:40am-09:10am"
    });
    let (status, _) = send(&app, "POST", "/courses", Some(missing)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = send(&app, "GET", "/courses", None).await;
    assert_eq!(as_json(&body).as_array().unwrap().len(), 1);

    let (status, body) = send(&app, "GET", "/faculty/A.%20Reyes/load", None).await;
    assert_eq!(status, StatusCode::OK);
    let load = as_json(&body);
    assert_eq!(load["current_load"], 6);
    assert_eq!(load["status"]["state"], "below_required");
    assert_eq!(load["status"]["shortfall"], 9);

    let (_, body) = send(&app, "GET", "/faculty", None).await;
    assert_eq!(as_json(&body)[0]["current_load"], 6);
}

#[tokio::test]
async fn test_exports_are_attachments() {
    let app = setup_app().await;
    send(
        &app,
        "POST",
        "/faculty",
        Some(json!({ "name": "B. Santos", "classification": "Full-time MA", "is_admin": true })),
    )
    .await;

    let response = app
        .clone()
        .oneshot(Request::builder().uri("/export/csv").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let disposition = response.headers()[header::CONTENT_DISPOSITION].to_str().unwrap().to_string();
    assert!(disposition.starts_with("attachment; filename=\"faculty_workload_"));
    assert!(disposition.ends_with(".csv\""));
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert!(String::from_utf8_lossy(&body).contains("B. Santos,Full-time MA,Yes,0"));

    let (status, body) = send(&app, "GET", "/export/pdf", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.starts_with(b"%PDF-1.4"));
}

#[test]
fn test_config_defaults_and_loopback_only() {
    let config = AppConfig::from_lookup(|_| None).expect("defaults are valid");
    assert_eq!(config.database_url, "sqlite://faculty_workload.db");
    assert_eq!(config.bind_addr.to_string(), "127.0.0.1:3000");
    assert_eq!(AppConfig::log_filter_from_lookup(|_| None), "faculty_workload=debug");

    let err = AppConfig::from_lookup(|key| (key == "BIND_ADDR").then(|| "0.0.0.0:8080".to_string()))
        .unwrap_err();
    assert!(matches!(err, AppError::Config(_)));

    let err = AppConfig::from_lookup(|key| (key == "BIND_ADDR").then(|| "not an address".to_string()))
        .unwrap_err();
    assert!(matches!(err, AppError::Config(_)));
}

#[test]
fn test_log_filter_is_available_when_the_rest_of_the_config_is_invalid() {
    let lookup = |key: &str| match key {
        "BIND_ADDR" => Some("192.168.1.20:3000".to_string()),
        "RUST_LOG" => Some("faculty_workload=trace".to_string()),
        _ => None,
    };

    assert!(matches!(AppConfig::from_lookup(lookup), Err(AppError::Config(_))));
    assert_eq!(AppConfig::log_filter_from_lookup(lookup), "faculty_workload=trace");
}
