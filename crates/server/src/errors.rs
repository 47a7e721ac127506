use axum::extract::rejection::QueryRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use service::errors::ServiceError;
use thiserror::Error;
use tracing::error;

/// JSON error body: `{"error": <title>, "detail": <message>}`.
#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub title: &'static str,
    pub detail: Option<String>,
}

impl JsonApiError {
    pub fn new(status: StatusCode, title: &'static str, detail: Option<String>) -> Self {
        Self { status, title, detail }
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        (self.status, Json(serde_json::json!({"error": self.title, "detail": self.detail}))).into_response()
    }
}

impl From<ServiceError> for JsonApiError {
    fn from(e: ServiceError) -> Self {
        error!(err = %e, "list query failed");
        JsonApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "List Failed", Some("the records could not be loaded".to_string()))
    }
}

impl From<QueryRejection> for JsonApiError {
    fn from(e: QueryRejection) -> Self {
        JsonApiError::new(StatusCode::BAD_REQUEST, "Invalid Query", Some(e.body_text()))
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("database unavailable: {0}")]
    Database(String),
    #[error("page templates: {0}")]
    Templates(#[from] handlebars::TemplateError),
    #[error(transparent)]
    Any(#[from] anyhow::Error),
}

impl From<models::errors::ModelError> for StartupError {
    fn from(e: models::errors::ModelError) -> Self {
        StartupError::Database(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_failure_hides_database_detail() {
        let e: JsonApiError = ServiceError::Db("relation \"customer\" does not exist".into()).into();
        assert_eq!(e.status, StatusCode::INTERNAL_SERVER_ERROR);
        let detail = e.detail.unwrap_or_default();
        assert!(!detail.contains("customer"));
        assert_eq!(detail, "the records could not be loaded");
    }
}
