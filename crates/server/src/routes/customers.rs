use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::HeaderMap,
    response::{IntoResponse, Response},
    Json,
};
use common::types::Resource;
use service::customers::{self as customer_service, CustomersListQuery};

use crate::errors::JsonApiError;
use crate::negotiate::{customers_to_xml, FormatParam, ResponseFormat, Xml};
use crate::routes::{observe, ServerState};

#[utoipa::path(
    get, path = "/api/customers/list", tag = "customers",
    params(crate::openapi::CustomersListParamsDoc, FormatParam),
    responses(
        (status = 200, description = "Customers as JSON, or XML with format=xml", body = [crate::openapi::CustomerListItemDoc]),
        (status = 400, description = "Invalid Query"),
        (status = 500, description = "List Failed")
    )
)]
pub async fn list(
    State(state): State<ServerState>,
    headers: HeaderMap,
    format: Result<Query<FormatParam>, QueryRejection>,
    query: Result<Query<CustomersListQuery>, QueryRejection>,
) -> Result<Response, JsonApiError> {
    let Query(format) = format?;
    let Query(q) = query?;
    let list = observe(Resource::Customers, customer_service::list_customers(&state.db, &q).await)?;

    match ResponseFormat::select(&format, &headers) {
        ResponseFormat::Xml => Ok(Xml(customers_to_xml(&list)?).into_response()),
        ResponseFormat::Json => Ok(Json(list).into_response()),
    }
}
