use axum::extract::{rejection::QueryRejection, Query, State};
use axum::Json;
use common::types::Resource;
use service::employees::{self as employee_service, EmployeeListItem, EmployeesListQuery};

use crate::errors::JsonApiError;
use crate::routes::{observe, ServerState};

#[utoipa::path(
    get, path = "/api/employees/list", tag = "employees",
    params(crate::openapi::ListParamsDoc),
    responses(
        (status = 200, description = "Employees", body = [crate::openapi::EmployeeListItemDoc]),
        (status = 400, description = "Invalid Query"),
        (status = 500, description = "List Failed")
    )
)]
pub async fn list(
    State(state): State<ServerState>,
    query: Result<Query<EmployeesListQuery>, QueryRejection>,
) -> Result<Json<Vec<EmployeeListItem>>, JsonApiError> {
    let Query(q) = query?;
    let list = observe(Resource::Employees, employee_service::list_employees(&state.db, &q).await)?;
    Ok(Json(list))
}
