use std::sync::Arc;

use axum::{
    body::{Body, Bytes},
    extract::State,
    http::{
        header::{
            ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
            ACCESS_CONTROL_ALLOW_ORIGIN, CONTENT_TYPE,
        },
        response::Builder,
        Response as HttpResponse, StatusCode,
    },
    response::Response,
    routing::{get, post},
    Router,
};
use journey_protocol::{serialize_json, JourneyRequest, JourneyResponse};
use serde::Serialize;

use crate::service::JourneyService;

type SharedService = Arc<JourneyService>;

#[derive(Debug, Serialize)]
pub struct HealthReport {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

/// `/auth`, `/journey` and `/health`, all CORS-open with OPTIONS preflight.
pub fn router(service: SharedService) -> Router {
    Router::new()
        .route("/auth", post(http_auth).options(http_preflight))
        .route("/journey", post(http_journey).options(http_preflight))
        .route("/health", get(http_health).options(http_preflight))
        .with_state(service)
}

fn with_cors(builder: Builder) -> Builder {
    builder
        .header(ACCESS_CONTROL_ALLOW_ORIGIN, "*")
        .header(ACCESS_CONTROL_ALLOW_HEADERS, "Content-Type")
        .header(ACCESS_CONTROL_ALLOW_METHODS, "GET, POST, OPTIONS")
}

pub(crate) fn build_response<T: Serialize>(
    status: StatusCode,
    payload: &T,
) -> Result<Response, StatusCode> {
    let bytes = serialize_json(payload)
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?
        .into_bytes();

    with_cors(HttpResponse::builder().status(status))
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(bytes))
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}

async fn http_preflight() -> Result<Response, StatusCode> {
    with_cors(HttpResponse::builder().status(StatusCode::OK))
        .header(CONTENT_TYPE, "application/json")
        .body(Body::empty())
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}

/// Always 200: callers branch on `success`.
async fn http_auth(State(service): State<SharedService>) -> Result<Response, StatusCode> {
    let response = service.authenticate().await;
    build_response(StatusCode::OK, &response)
}

async fn http_journey(
    State(service): State<SharedService>,
    body: Bytes,
) -> Result<Response, StatusCode> {
    let request: JourneyRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(err) => {
            log::error!("Journey generation error: invalid request body: {err}");
            let response = JourneyResponse::failure(format!("Invalid JSON request: {err}"));
            return build_response(StatusCode::INTERNAL_SERVER_ERROR, &response);
        }
    };

    let response = service.journey_response(&request).await;
    let status = if response.success {
        StatusCode::OK
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };
    build_response(status, &response)
}

async fn http_health() -> Result<Response, StatusCode> {
    let report = HealthReport {
        status: "ok",
        service: "journey",
        version: env!("CARGO_PKG_VERSION"),
    };
    build_response(StatusCode::OK, &report)
}
