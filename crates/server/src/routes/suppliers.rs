use axum::extract::{rejection::QueryRejection, Query, State};
use axum::Json;
use common::types::Resource;
use service::suppliers::{self as supplier_service, SupplierListItem, SuppliersListQuery};

use crate::errors::JsonApiError;
use crate::routes::{observe, ServerState};

#[utoipa::path(
    get, path = "/api/suppliers/list", tag = "suppliers",
    params(crate::openapi::ListParamsDoc),
    responses(
        (status = 200, description = "Suppliers", body = [crate::openapi::SupplierListItemDoc]),
        (status = 400, description = "Invalid Query"),
        (status = 500, description = "List Failed")
    )
)]
pub async fn list(
    State(state): State<ServerState>,
    query: Result<Query<SuppliersListQuery>, QueryRejection>,
) -> Result<Json<Vec<SupplierListItem>>, JsonApiError> {
    let Query(q) = query?;
    let list = observe(Resource::Suppliers, supplier_service::list_suppliers(&state.db, &q).await)?;
    Ok(Json(list))
}
