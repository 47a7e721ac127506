use utoipa::{IntoParams, OpenApi, ToSchema};

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(IntoParams)]
#[into_params(parameter_in = Query, rename_all = "camelCase")]
pub struct ListParamsDoc {
    /// Case-insensitive substring filter
    pub search_text: Option<String>,
    /// Field to order by; unknown fields are ignored
    pub sort_by: Option<String>,
    /// Rows to skip, default 0
    pub skip: Option<u64>,
    /// Maximum rows, default unlimited
    pub take: Option<u64>,
}

#[derive(IntoParams)]
#[into_params(parameter_in = Query, rename_all = "camelCase")]
pub struct CustomersListParamsDoc {
    /// Case-insensitive substring on the customer name
    pub name: Option<String>,
    /// Matches name or email
    pub search_text: Option<String>,
    /// `Name` or `Email`
    pub sort_by: Option<String>,
    pub skip: Option<u64>,
    pub take: Option<u64>,
}

#[derive(ToSchema)]
pub struct CodeDescriptionDoc { pub code: String, pub description: String }

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct CustomerListItemDoc {
    pub id: i32,
    pub name: String,
    pub address: String,
    pub email: String,
    pub phone: String,
    pub iban: String,
    pub customer_category: Option<CodeDescriptionDoc>,
}

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct EmployeeListItemDoc {
    pub id: i32,
    pub code: String,
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub email: String,
    pub phone: String,
    pub department: Option<CodeDescriptionDoc>,
}

#[derive(ToSchema)]
pub struct SupplierListItemDoc {
    pub id: i32,
    pub name: String,
    pub address: String,
    pub email: String,
    pub phone: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::customers::list,
        crate::routes::employees::list,
        crate::routes::suppliers::list,
    ),
    components(
        schemas(
            HealthResponse,
            CodeDescriptionDoc,
            CustomerListItemDoc,
            EmployeeListItemDoc,
            SupplierListItemDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "customers"),
        (name = "employees"),
        (name = "suppliers")
    )
)]
pub struct ApiDoc;
