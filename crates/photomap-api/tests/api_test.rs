//! Integration tests for the HTTP API
//!
//! Requests are driven through the router with `tower::ServiceExt::oneshot`,
//! so no socket is bound.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use bytes::Bytes;
use photomap_api::{create_router, ApiConfig, AppState};
use photomap_core::fixtures::{self, GpsFixture};
use tower::ServiceExt;

const BOUNDARY: &str = "photomap-test-boundary";

fn app_state() -> Arc<AppState> {
    Arc::new(AppState::new(&ApiConfig::default()))
}

fn router(state: &Arc<AppState>) -> Router {
    create_router(Arc::clone(state))
}

fn multipart_body(files: &[(&str, Bytes)]) -> Body {
    let mut body = Vec::new();
    for (name, data) in files {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"photos\"; filename=\"{}\"\r\n",
                name
            )
            .as_bytes(),
        );
        body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    Body::from(body)
}

fn upload_request(uri: &str, files: &[(&str, Bytes)]) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, format!("multipart/form-data; boundary={}", BOUNDARY))
        .body(multipart_body(files))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn json_body(response: axum::response::Response) -> serde_json::Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn nyc() -> Bytes {
    fixtures::geotagged_jpeg(&GpsFixture::new((40.0, 30.0, 0.0), 'N', (74.0, 0.0, 0.0), 'W'))
}

#[tokio::test]
async fn test_health() {
    let state = app_state();
    let response = router(&state).oneshot(get("/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["status"], "ok");
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn test_upload_list_geojson_round_trip() {
    let state = app_state();

    let response = router(&state)
        .oneshot(upload_request(
            "/api/v1/photos",
            &[("nyc.jpg", nyc()), ("plain.jpg", fixtures::plain_jpeg())],
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["submitted"], 2);
    assert_eq!(body["appended"], 1);
    assert_eq!(body["total"], 1);
    assert!(body.get("dropped").is_none());

    let response = router(&state).oneshot(get("/api/v1/photos")).await.unwrap();
    let photos = json_body(response).await;
    assert_eq!(photos.as_array().unwrap().len(), 1);
    assert_eq!(photos[0]["file_name"], "nyc.jpg");
    assert_eq!(photos[0]["coordinates"], "Lat: 40.50000, Lon: -74.00000");
    assert_eq!(photos[0]["image_url"], "/api/v1/photos/0/image");

    let response = router(&state).oneshot(get("/api/v1/photos/geojson")).await.unwrap();
    let fc = json_body(response).await;
    assert_eq!(fc["type"], "FeatureCollection");
    assert_eq!(fc["features"][0]["geometry"]["coordinates"][0], -74.0);
    assert_eq!(fc["features"][0]["geometry"]["coordinates"][1], 40.5);
}

#[tokio::test]
async fn test_upload_report_lists_drops() {
    let state = app_state();

    let response = router(&state)
        .oneshot(upload_request(
            "/api/v1/photos?report=true",
            &[("junk.jpg", Bytes::from_static(b"not an image"))],
        ))
        .await
        .unwrap();

    let body = json_body(response).await;
    assert_eq!(body["appended"], 0);
    assert_eq!(body["dropped"][0]["file_name"], "junk.jpg");
    assert_eq!(body["dropped"][0]["kind"], "decode");
}

#[tokio::test]
async fn test_uploads_accumulate_in_session() {
    let state = app_state();

    for name in ["a.jpg", "b.jpg"] {
        router(&state)
            .oneshot(upload_request("/api/v1/photos", &[(name, nyc())]))
            .await
            .unwrap();
    }

    assert_eq!(state.collection.len(), 2);
}

#[tokio::test]
async fn test_upload_without_files() {
    let state = app_state();
    let response = router(&state)
        .oneshot(upload_request("/api/v1/photos", &[]))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["error"], "No files provided");
}

#[tokio::test]
async fn test_photo_image() {
    let state = app_state();
    let image = nyc();
    router(&state)
        .oneshot(upload_request("/api/v1/photos", &[("nyc.jpg", image.clone())]))
        .await
        .unwrap();

    let response = router(&state).oneshot(get("/api/v1/photos/0/image")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "image/jpeg");
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(bytes, image);

    let response = router(&state).oneshot(get("/api/v1/photos/5/image")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_map_page() {
    let state = app_state();
    router(&state)
        .oneshot(upload_request("/api/v1/photos", &[("<b>nyc</b>.jpg", nyc())]))
        .await
        .unwrap();

    let response = router(&state).oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let page = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(page.contains("L.map(\"map\")"));
    assert!(page.contains("&lt;b&gt;nyc&lt;/b&gt;.jpg"));
}
