mod pages;

use axum::{
    extract::State,
    http::{header, HeaderName, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use dealfront_views::{PageContext, PageError};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::middleware::{
    enforce_rate_limit, request_id, RateLimitState, RequestId, REQUEST_ID_HEADER,
};

#[derive(Clone)]
pub struct AppState {
    pub pages: PageContext,
}

#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
}

impl ResponseMeta {
    #[must_use]
    pub fn new(request_id: String) -> Self {
        Self {
            request_id,
            timestamp: Utc::now(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub meta: ResponseMeta,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn new(request_id: &RequestId, data: T) -> Json<Self> {
        Json(Self {
            data,
            meta: ResponseMeta::new(request_id.0.clone()),
        })
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: ErrorBody,
    pub meta: ResponseMeta,
}

impl ApiError {
    pub fn new(request_id: &RequestId, code: &str, message: impl Into<String>) -> Self {
        Self {
            error: ErrorBody {
                code: code.to_string(),
                message: message.into(),
            },
            meta: ResponseMeta::new(request_id.0.clone()),
        }
    }

    /// Missing entities become 404s; failed content queries become 503s.
    pub fn from_page(request_id: &RequestId, err: &PageError) -> Self {
        match err {
            PageError::NotFound { .. } => Self::new(request_id, "not_found", err.to_string()),
            PageError::Unavailable { what, source } => {
                tracing::error!(section = what, error = %source, "page content unavailable");
                Self::new(
                    request_id,
                    "upstream_unavailable",
                    format!("{what} is temporarily unavailable"),
                )
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.error.code.as_str() {
            "not_found" => StatusCode::NOT_FOUND,
            "bad_request" | "validation_error" => StatusCode::BAD_REQUEST,
            "rate_limited" => StatusCode::TOO_MANY_REQUESTS,
            "upstream_unavailable" => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

#[derive(Debug, Serialize)]
struct HealthData {
    status: &'static str,
    cms: &'static str,
}

async fn health(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> impl IntoResponse {
    let (status, data) = match state.pages.client().ping().await {
        Ok(()) => (
            StatusCode::OK,
            HealthData {
                status: "ok",
                cms: "ok",
            },
        ),
        Err(e) => {
            tracing::warn!(error = %e, "health check could not reach the content API");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                HealthData {
                    status: "degraded",
                    cms: "unreachable",
                },
            )
        }
    };
    (status, ApiResponse::new(&req_id, data))
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, HeaderName::from_static(REQUEST_ID_HEADER)])
}

pub fn build_app(state: AppState, rate_limit: RateLimitState) -> Router {
    let content_routes = Router::new()
        .route("/api/v1/home", get(pages::home))
        .route("/api/v1/brands", get(pages::list_brands))
        .route("/api/v1/brands/{slug}", get(pages::get_brand))
        .route("/api/v1/categories", get(pages::list_categories))
        .route("/api/v1/categories/{slug}", get(pages::get_category))
        .route("/api/v1/coupons/{slug}", get(pages::get_coupon))
        .route("/api/v1/search", get(pages::search))
        .route("/api/v1/posts", get(pages::list_posts))
        .route("/api/v1/posts/{slug}", get(pages::get_post))
        .route_layer(axum::middleware::from_fn_with_state(
            rate_limit,
            enforce_rate_limit,
        ));

    Router::new()
        .route("/api/v1/health", get(health))
        .merge(content_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(axum::middleware::from_fn(request_id))
                .layer(build_cors()),
        )
        .with_state(state)
}

#[cfg(test)]
#[path = "api_test.rs"]
mod tests;
