pub mod customers;
pub mod employees;
pub mod suppliers;
pub mod pages;

use std::sync::Arc;

use axum::{http::StatusCode, routing::get, Json, Router};
use common::{metrics, types::{Health, Resource}};
use sea_orm::DatabaseConnection;
use service::errors::ServiceError;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{info, Level};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::errors::{JsonApiError, StartupError};
use crate::html::Pages;
use crate::openapi::ApiDoc;

#[derive(Clone)]
pub struct ServerState {
    pub db: DatabaseConnection,
    /// Default `take` for the HTML tables.
    pub page_size: u64,
    pub pages: Arc<Pages>,
}

impl ServerState {
    pub fn new(db: DatabaseConnection, page_size: u64) -> Result<Self, StartupError> {
        Ok(Self { db, page_size, pages: Arc::new(Pages::new()?) })
    }
}

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

async fn metrics_text() -> (StatusCode, String) {
    metrics::encode_metrics()
}

/// Count the outcome of a list query and map failures to a JSON error.
pub(crate) fn observe<T>(resource: Resource, res: Result<Vec<T>, ServiceError>) -> Result<Vec<T>, JsonApiError> {
    match res {
        Ok(list) => {
            info!(%resource, count = list.len(), "list served");
            metrics::record_list_ok(resource, list.len());
            Ok(list)
        }
        Err(e) => {
            metrics::record_list_error(resource);
            Err(e.into())
        }
    }
}

/// Build the full application router: JSON API, HTML tables, docs and metrics
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    let api = Router::new()
        .route("/api/customers/list", get(customers::list))
        .route("/api/employees/list", get(employees::list))
        .route("/api/suppliers/list", get(suppliers::list));

    let html = Router::new()
        .route("/", get(pages::index))
        .route("/customers", get(pages::customers))
        .route("/employees", get(pages::employees))
        .route("/suppliers", get(pages::suppliers));

    Router::new()
        .route("/health", get(health))
        .route("/metrics", get(metrics_text))
        .merge(api)
        .merge(html)
        .with_state(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
