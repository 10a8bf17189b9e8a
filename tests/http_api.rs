//! HTTP API tests: the router is driven in-process, no socket involved.
//!
//! Run with: cargo test --test http_api

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode, header},
};
use lensify::api::router;
use lensify::config::LensifyConfig;
use serde_json::Value;
use tower::ServiceExt;

fn app() -> Router {
    router(&LensifyConfig::default())
}

async fn send(app: Router, method: Method, uri: &str) -> (StatusCode, axum::http::HeaderMap, Vec<u8>) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::ORIGIN, "https://photos.example")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, headers, body.to_vec())
}

async fn get_json(uri: &str) -> (StatusCode, Value) {
    let (status, headers, body) = send(app(), Method::GET, uri).await;
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert!(
        content_type.starts_with("application/json"),
        "{uri} returned {content_type}"
    );
    (status, serde_json::from_slice(&body).unwrap())
}

// ===========================================================================
// Health
// ===========================================================================

#[tokio::test]
async fn health_endpoints_report_ok() {
    for uri in ["/health", "/api", "/api/", "/api/health"] {
        let (status, body) = get_json(uri).await;
        assert_eq!(status, StatusCode::OK, "{uri}");
        assert_eq!(body["status"], "ok");
        assert_eq!(body["version"], lensify::VERSION);
    }
}

#[tokio::test]
async fn health_is_not_cached() {
    let (_, headers, _) = send(app(), Method::GET, "/api/health").await;
    assert_eq!(headers[header::CACHE_CONTROL], "no-cache");
}

// ===========================================================================
// Aperture
// ===========================================================================

#[tokio::test]
async fn calculate_full_frame() {
    let (status, body) = get_json("/api/calculate?sensorSize=full-frame&aperture=2.8").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["sensorId"], "full-frame");
    assert_eq!(body["sensorName"], "Full Frame");
    assert_eq!(body["cropFactor"], 1.0);
    assert_eq!(body["inputAperture"], 2.8);
    assert_eq!(body["equivalentAperture"], 2.8);
}

#[tokio::test]
async fn calculate_without_api_prefix() {
    let (status, body) = get_json("/calculate?sensorSize=micro-four-thirds&aperture=1.8").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["equivalentAperture"], 3.6);
}

#[tokio::test]
async fn calculate_fractional_sensor_id_is_url_decoded() {
    let (status, body) = get_json("/api/calculate?sensorSize=1%2F2.3&aperture=2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["sensorId"], "1/2.3");
    // 2 * 5.64 = 11.28
    assert_eq!(body["equivalentAperture"], 11.3);
}

#[tokio::test]
async fn calculate_rejects_unknown_sensor() {
    let (status, body) = get_json("/api/calculate?sensorSize=nonexistent-sensor&aperture=2").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid sensor size");
}

#[tokio::test]
async fn calculate_rejects_missing_sensor() {
    let (status, body) = get_json("/api/calculate?aperture=2").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid sensor size");
}

#[tokio::test]
async fn calculate_rejects_bad_apertures() {
    for query in ["aperture=-1", "aperture=0", "aperture=wide", "aperture=", ""] {
        let uri = format!("/api/calculate?sensorSize=full-frame&{query}");
        let (status, body) = get_json(&uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body["error"], "Invalid aperture value");
    }
}

// ===========================================================================
// Focal equivalence
// ===========================================================================

#[tokio::test]
async fn focal_equivalence_reference_case() {
    let (status, body) = get_json(
        "/api/focal-equiv?originalSensor=full-frame&originalFocal=50&newFocal=35&aperture=1.4",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["exactCropFactor"], 0.7);
    assert_eq!(body["angleOfViewChange"], "30.0%");
    assert_eq!(body["perspectiveChange"], "-30.0%");
    assert_eq!(body["equivalentAperture"], 1.0);
    assert_eq!(body["closestSensor"]["id"], "medium-format");
    assert_eq!(body["originalSensor"]["name"], "Full Frame");
    assert_eq!(body["originalFocalLength"], 50.0);
    assert_eq!(body["newFocalLength"], 35.0);
}

#[tokio::test]
async fn focal_equivalence_all_paths_agree() {
    let query = "?originalSensor=1%2F2.3&originalFocal=4&newFocal=6&aperture=2";
    let mut bodies = Vec::new();
    for path in [
        "/focal-equiv",
        "/focal-equivalent",
        "/api/focal-equiv",
        "/api/focal-equivalent",
    ] {
        let (status, body) = get_json(&format!("{path}{query}")).await;
        assert_eq!(status, StatusCode::OK, "{path}");
        bodies.push(body);
    }
    assert!(bodies.windows(2).all(|w| w[0] == w[1]));
    assert_eq!(bodies[0]["effectiveSensorSize"], "1/3.45");
}

#[tokio::test]
async fn focal_equivalence_names_the_bad_field() {
    let cases = [
        (
            "originalSensor=nope&originalFocal=50&newFocal=35&aperture=1.4",
            "Invalid original sensor size",
        ),
        (
            "originalSensor=full-frame&originalFocal=0&newFocal=35&aperture=1.4",
            "Invalid original focal length",
        ),
        (
            "originalSensor=full-frame&originalFocal=50&newFocal=abc&aperture=1.4",
            "Invalid new focal length",
        ),
        (
            "originalSensor=full-frame&originalFocal=50&newFocal=35",
            "Invalid aperture value",
        ),
    ];
    for (query, message) in cases {
        let (status, body) = get_json(&format!("/api/focal-equiv?{query}")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{query}");
        assert_eq!(body["error"], message, "{query}");
    }
}

// ===========================================================================
// Sensors, page, fallback, CORS
// ===========================================================================

#[tokio::test]
async fn sensors_listed_in_table_order() {
    let (status, body) = get_json("/api/sensors").await;
    assert_eq!(status, StatusCode::OK);
    let list = body.as_array().unwrap();
    assert_eq!(list.len(), lensify::sensors::all().len());
    assert_eq!(list[0]["id"], "medium-format");
    assert_eq!(list[1]["cropFactor"], 1.0);
}

#[tokio::test]
async fn index_serves_html_page() {
    let (status, headers, body) = send(app(), Method::GET, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(
        headers[header::CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("text/html")
    );
    let html = String::from_utf8(body).unwrap();
    assert!(html.contains("<form"));
}

#[tokio::test]
async fn index_renders_submitted_result() {
    let (_, _, body) = send(
        app(),
        Method::GET,
        "/?sensorSize=micro-four-thirds&aperture=1.8",
    )
    .await;
    let html = String::from_utf8(body).unwrap();
    assert!(html.contains("f/3.6"));
}

#[tokio::test]
async fn unknown_path_is_json_404() {
    let (status, body) = get_json("/api/nowhere").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Not Found");
    assert_eq!(body["path"], "/api/nowhere");
}

#[tokio::test]
async fn responses_allow_any_origin_by_default() {
    let (_, headers, _) = send(app(), Method::GET, "/api/health").await;
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
}

#[tokio::test]
async fn preflight_is_answered() {
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/calculate")
        .header(header::ORIGIN, "https://photos.example")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
        .body(Body::empty())
        .unwrap();
    let response = app().oneshot(request).await.unwrap();
    assert!(response.status().is_success());
    let headers = response.headers();
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    let methods = headers[header::ACCESS_CONTROL_ALLOW_METHODS].to_str().unwrap();
    assert!(methods.contains("GET"));
}

#[tokio::test]
async fn bare_options_is_ok_with_cors_headers() {
    for uri in ["/api/calculate", "/focal-equiv", "/api/health", "/", "/api/nowhere"] {
        let (status, headers, body) = send(app(), Method::OPTIONS, uri).await;
        assert_eq!(status, StatusCode::OK, "{uri}");
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*", "{uri}");
        assert!(body.is_empty(), "{uri}");
    }
}

#[tokio::test]
async fn explicit_origins_are_respected() {
    let mut config = LensifyConfig::default();
    config.cors.allowed_origins = vec!["https://photos.example".into()];
    let (_, headers, _) = send(router(&config), Method::GET, "/api/health").await;
    assert_eq!(
        headers[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "https://photos.example"
    );
}
