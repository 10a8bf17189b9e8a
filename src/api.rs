//! HTTP API over the two calculations.
//!
//! | Path | Response |
//! |------|----------|
//! | `/health`, `/api`, `/api/`, `/api/health` | `{"status":"ok","version":...}` |
//! | `/calculate`, `/api/calculate` | [`ApertureResult`](crate::aperture::ApertureResult) |
//! | `/focal-equiv`, `/focal-equivalent` (and `/api/` variants) | [`EquivalenceReport`](crate::focal::EquivalenceReport) |
//! | `/sensors`, `/api/sensors` | the registry, in table order |
//! | `/` | HTML calculator page |
//!
//! Query parameters are parsed here and handed to the core as plain numbers;
//! missing or malformed numbers reach the core as `NaN` so the rejection
//! names the right field. Validation failures become `400 {"error": ...}`,
//! unknown paths `404 {"error":"Not Found","path":...}`. A bare `OPTIONS`
//! on any path gets an empty 200 with the CORS headers.

use axum::{
    Json, Router,
    extract::Query,
    handler::Handler,
    http::{HeaderName, HeaderValue, Method, StatusCode, Uri, header},
    response::{Html, IntoResponse, Response},
    routing::{MethodRouter, get},
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Duration;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{debug, info, warn};

use crate::aperture::compute_aperture_equivalence;
use crate::config::{CorsConfig, LensifyConfig};
use crate::error::ValidationError;
use crate::focal::compute_focal_equivalence;
use crate::numeric::parse_or_nan;
use crate::{VERSION, page, sensors};

/// Query string of the aperture endpoint.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApertureQuery {
    pub sensor_size: Option<String>,
    pub aperture: Option<String>,
}

/// Query string of the focal-equivalence endpoint.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FocalQuery {
    pub original_sensor: Option<String>,
    pub original_focal: Option<String>,
    pub new_focal: Option<String>,
    pub aperture: Option<String>,
}

#[derive(Debug, Serialize)]
struct Health {
    status: &'static str,
    version: &'static str,
}

/// A validation failure rendered as a 400 JSON body.
#[derive(Debug)]
pub struct ApiError(pub ValidationError);

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        debug!(field = self.0.field(), error = %self.0, "rejected request");
        (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": self.0.to_string() })),
        )
            .into_response()
    }
}

/// Build the full router: API routes, HTML page, CORS and request tracing.
pub fn router(config: &LensifyConfig) -> Router {
    Router::new()
        .route("/", get_or_options(index))
        .route("/health", get_or_options(health))
        .route("/api", get_or_options(health))
        .route("/api/", get_or_options(health))
        .route("/api/health", get_or_options(health))
        .route("/calculate", get_or_options(calculate))
        .route("/api/calculate", get_or_options(calculate))
        .route("/focal-equiv", get_or_options(focal_equivalent))
        .route("/focal-equivalent", get_or_options(focal_equivalent))
        .route("/api/focal-equiv", get_or_options(focal_equivalent))
        .route("/api/focal-equivalent", get_or_options(focal_equivalent))
        .route("/sensors", get_or_options(list_sensors))
        .route("/api/sensors", get_or_options(list_sensors))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .layer(build_cors_layer(&config.cors))
}

/// `GET` (and `HEAD`) to `handler`, plus a bare `OPTIONS` answered with 200.
///
/// Real preflights never get here: the CORS layer answers them first.
fn get_or_options<H, T>(handler: H) -> MethodRouter
where
    H: Handler<T, ()>,
    T: 'static,
{
    get(handler).options(options_ok)
}

async fn options_ok() -> StatusCode {
    StatusCode::OK
}

/// Build a CORS layer from config. `"*"` entries mean "any".
pub fn build_cors_layer(cors: &CorsConfig) -> CorsLayer {
    let mut layer = CorsLayer::new();

    if cors.allowed_origins.iter().any(|o| o == "*") {
        layer = layer.allow_origin(Any);
    } else {
        let origins: Vec<HeaderValue> = cors
            .allowed_origins
            .iter()
            .filter_map(|s| HeaderValue::from_str(s).ok())
            .collect();
        if origins.len() != cors.allowed_origins.len() {
            warn!("ignoring unparseable entries in cors.allowed_origins");
        }
        if !origins.is_empty() {
            layer = layer.allow_origin(origins);
        }
    }

    if cors.allowed_methods.iter().any(|m| m == "*") {
        layer = layer.allow_methods(Any);
    } else {
        let methods: Vec<Method> = cors
            .allowed_methods
            .iter()
            .filter_map(|s| s.parse().ok())
            .collect();
        if !methods.is_empty() {
            layer = layer.allow_methods(methods);
        }
    }

    if cors.allowed_headers.iter().any(|h| h == "*") {
        layer = layer.allow_headers(Any);
    } else {
        let headers: Vec<HeaderName> = cors
            .allowed_headers
            .iter()
            .filter_map(|s| s.parse().ok())
            .collect();
        if !headers.is_empty() {
            layer = layer.allow_headers(headers);
        }
    }

    if cors.max_age_seconds > 0 {
        layer = layer.max_age(Duration::from_secs(cors.max_age_seconds));
    }

    layer
}

async fn health() -> impl IntoResponse {
    (
        [(header::CACHE_CONTROL, "no-cache")],
        Json(Health {
            status: "ok",
            version: VERSION,
        }),
    )
}

async fn calculate(Query(query): Query<ApertureQuery>) -> Result<Response, ApiError> {
    let sensor = query.sensor_size.as_deref().unwrap_or_default();
    let aperture = parse_or_nan(query.aperture.as_deref());
    debug!(sensor, aperture, "aperture equivalence");

    let result = compute_aperture_equivalence(sensor, aperture)?;
    Ok(Json(result).into_response())
}

async fn focal_equivalent(Query(query): Query<FocalQuery>) -> Result<Response, ApiError> {
    let sensor = query.original_sensor.as_deref().unwrap_or_default();
    let original_focal = parse_or_nan(query.original_focal.as_deref());
    let new_focal = parse_or_nan(query.new_focal.as_deref());
    let aperture = parse_or_nan(query.aperture.as_deref());
    debug!(sensor, original_focal, new_focal, aperture, "focal equivalence");

    let report = compute_focal_equivalence(sensor, original_focal, new_focal, aperture)?;
    Ok(Json(report).into_response())
}

async fn list_sensors() -> impl IntoResponse {
    Json(sensors::all())
}

async fn index(Query(query): Query<page::PageQuery>) -> Html<String> {
    Html(page::render(&query).into_string())
}

async fn not_found(method: Method, uri: Uri) -> Response {
    if method == Method::OPTIONS {
        return StatusCode::OK.into_response();
    }
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "Not Found", "path": uri.path() })),
    )
        .into_response()
}

/// Bind `config.server` and serve until Ctrl-C.
pub async fn serve(config: &LensifyConfig) -> std::io::Result<()> {
    let addr = config.server.address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("HTTP server bound on {}", listener.local_addr()?);

    let shutdown = async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("HTTP server shutting down"),
            Err(err) => {
                warn!("cannot listen for Ctrl-C, serving until killed: {err}");
                std::future::pending::<()>().await;
            }
        }
    };

    axum::serve(listener, router(config))
        .with_graceful_shutdown(shutdown)
        .await
}
