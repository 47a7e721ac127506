use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    response::Html,
};
use common::types::Resource;
use handlebars::RenderError;
use service::{
    customers::{self as customer_service, CustomersListQuery},
    employees as employee_service,
    suppliers as supplier_service,
    ListParams,
};
use tracing::error;

use crate::errors::JsonApiError;
use crate::html::{Column, Pages, TablePage};
use crate::routes::{observe, ServerState};

type PageResult = Result<Html<String>, (StatusCode, Html<String>)>;

const CUSTOMER_COLUMNS: &[Column] = &[
    Column::sortable("Name", "Name"),
    Column::plain("Address"),
    Column::sortable("Email", "Email"),
    Column::plain("Phone"),
    Column::plain("Iban"),
    Column::plain("CustomerCategory-Code"),
    Column::plain("CustomerCategory-Description"),
];

const EMPLOYEE_COLUMNS: &[Column] = &[
    Column::sortable("Code", "Code"),
    Column::sortable("FirstName", "FirstName"),
    Column::sortable("LastName", "LastName"),
    Column::plain("Address"),
    Column::sortable("Email", "Email"),
    Column::plain("Phone"),
    Column::plain("Department-Code"),
    Column::plain("Department-Description"),
];

const SUPPLIER_COLUMNS: &[Column] = &[
    Column::sortable("Name", "Name"),
    Column::plain("Address"),
    Column::sortable("Email", "Email"),
    Column::plain("Phone"),
];

fn render(result: Result<String, RenderError>) -> PageResult {
    result.map(Html).map_err(|e| {
        error!(err = %e, "page render failed");
        (StatusCode::INTERNAL_SERVER_ERROR, Html("<h1>Page Render Failed</h1>".to_string()))
    })
}

fn error_page(pages: &Pages, e: JsonApiError) -> (StatusCode, Html<String>) {
    let detail = e.detail.unwrap_or_default();
    match render(pages.error(e.title, &detail)) {
        Ok(body) => (e.status, body),
        Err(failed) => failed,
    }
}

/// Pages always paginate; `take` falls back to the configured page size.
fn with_page_size(mut params: ListParams, page_size: u64) -> ListParams {
    if params.take.is_none() {
        params.take = Some(page_size);
    }
    params
}

pub async fn index(State(state): State<ServerState>) -> PageResult {
    render(state.pages.index())
}

pub async fn customers(
    State(state): State<ServerState>,
    query: Result<Query<CustomersListQuery>, QueryRejection>,
) -> PageResult {
    let Query(mut q) = query.map_err(|e| error_page(&state.pages, e.into()))?;
    q.list = with_page_size(q.list, state.page_size);
    let list = observe(Resource::Customers, customer_service::list_customers(&state.db, &q).await)
        .map_err(|e| error_page(&state.pages, e))?;

    let rows = list
        .into_iter()
        .map(|c| {
            let (code, description) = c
                .customer_category
                .map(|cat| (cat.code, cat.description))
                .unwrap_or_default();
            vec![c.name, c.address, c.email, c.phone, c.iban, code, description]
        })
        .collect();
    let page = TablePage {
        title: "Customers",
        path: "/customers",
        columns: CUSTOMER_COLUMNS,
        rows,
        params: &q.list,
        extra: vec![("name", q.name().unwrap_or_default().to_string())],
    };
    render(state.pages.table(&page))
}

pub async fn employees(
    State(state): State<ServerState>,
    query: Result<Query<ListParams>, QueryRejection>,
) -> PageResult {
    let Query(params) = query.map_err(|e| error_page(&state.pages, e.into()))?;
    let params = with_page_size(params, state.page_size);
    let list = observe(Resource::Employees, employee_service::list_employees(&state.db, &params).await)
        .map_err(|e| error_page(&state.pages, e))?;

    let rows = list
        .into_iter()
        .map(|e| {
            let (code, description) = e
                .department
                .map(|d| (d.code, d.description))
                .unwrap_or_default();
            vec![e.code, e.first_name, e.last_name, e.address, e.email, e.phone, code, description]
        })
        .collect();
    let page = TablePage { title: "Employees", path: "/employees", columns: EMPLOYEE_COLUMNS, rows, params: &params, extra: vec![] };
    render(state.pages.table(&page))
}

pub async fn suppliers(
    State(state): State<ServerState>,
    query: Result<Query<ListParams>, QueryRejection>,
) -> PageResult {
    let Query(params) = query.map_err(|e| error_page(&state.pages, e.into()))?;
    let params = with_page_size(params, state.page_size);
    let list = observe(Resource::Suppliers, supplier_service::list_suppliers(&state.db, &params).await)
        .map_err(|e| error_page(&state.pages, e))?;

    let rows = list
        .into_iter()
        .map(|s| vec![s.name, s.address, s.email, s.phone])
        .collect();
    let page = TablePage { title: "Suppliers", path: "/suppliers", columns: SUPPLIER_COLUMNS, rows, params: &params, extra: vec![] };
    render(state.pages.table(&page))
}
