use models::employee;
use sea_orm::{DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use serde::Serialize;
use tracing::{debug, instrument};

use crate::errors::ServiceError;
use crate::listing::{self, search_any, ListParams, SortKey};
use crate::lookup::{self, CodeDescription};

pub type EmployeesListQuery = ListParams;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EmployeeSort { Code, FirstName, LastName, Email }

impl SortKey for EmployeeSort {
    const ALL: &'static [Self] = &[
        EmployeeSort::Code,
        EmployeeSort::FirstName,
        EmployeeSort::LastName,
        EmployeeSort::Email,
    ];

    fn name(&self) -> &'static str {
        match self {
            EmployeeSort::Code => "Code",
            EmployeeSort::FirstName => "FirstName",
            EmployeeSort::LastName => "LastName",
            EmployeeSort::Email => "Email",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeListItem {
    pub id: i32,
    pub code: String,
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub email: String,
    pub phone: String,
    pub department: Option<CodeDescription>,
}

/// Search matches first name, last name or email.
#[instrument(skip(db))]
pub async fn list_employees(db: &DatabaseConnection, params: &EmployeesListQuery) -> Result<Vec<EmployeeListItem>, ServiceError> {
    let mut query = employee::Entity::find();

    if let Some(text) = params.search() {
        query = query.filter(search_any(
            &[employee::Column::FirstName, employee::Column::LastName, employee::Column::Email],
            text,
        ));
    }
    if let Some(sort) = params.sort::<EmployeeSort>() {
        let col = match sort {
            EmployeeSort::Code => employee::Column::Code,
            EmployeeSort::FirstName => employee::Column::FirstName,
            EmployeeSort::LastName => employee::Column::LastName,
            EmployeeSort::Email => employee::Column::Email,
        };
        query = query.order_by_asc(col);
    }
    let rows = listing::window(query.order_by_asc(employee::Column::Id), params)
        .all(db)
        .await?;

    let departments = lookup::departments(db, rows.iter().map(|r| r.department_id)).await?;
    debug!(rows = rows.len(), departments = departments.len(), "employees fetched");

    Ok(rows
        .into_iter()
        .map(|m| EmployeeListItem {
            department: m.department_id.and_then(|id| departments.get(&id).cloned()),
            id: m.id,
            code: m.code,
            first_name: m.first_name,
            last_name: m.last_name,
            address: m.address,
            email: m.email,
            phone: m.phone,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::fixtures;

    async fn seeded() -> anyhow::Result<DatabaseConnection> {
        let db = fixtures::memory_db().await?;
        let it = fixtures::insert_department(&db, "IT", "Information technology").await?;
        let hr = fixtures::insert_department(&db, "HR", "Human resources").await?;
        fixtures::insert_employee(&db, "E003", "Grace", "Hopper", "admiral@corp.test", Some(it.id)).await?;
        fixtures::insert_employee(&db, "E001", "Alan", "Turing", "alan@corp.test", Some(hr.id)).await?;
        fixtures::insert_employee(&db, "E002", "Edsger", "Dijkstra", "ewd@corp.test", None).await?;
        Ok(db)
    }

    #[tokio::test]
    async fn joins_department_and_keeps_missing_as_none() -> anyhow::Result<()> {
        let db = seeded().await?;
        let list = list_employees(&db, &ListParams::default()).await?;
        assert_eq!(list.len(), 3);
        assert_eq!(list[0].department.as_ref().map(|d| d.code.as_str()), Some("IT"));
        assert_eq!(list[1].department.as_ref().map(|d| d.description.as_str()), Some("Human resources"));
        assert!(list[2].department.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn search_matches_last_name_case_insensitively() -> anyhow::Result<()> {
        let db = seeded().await?;
        let params = ListParams { search_text: Some("HOPP".into()), ..Default::default() };
        let list = list_employees(&db, &params).await?;
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].first_name, "Grace");
        Ok(())
    }

    #[tokio::test]
    async fn sorts_by_code_then_windows() -> anyhow::Result<()> {
        let db = seeded().await?;
        let params = ListParams { sort_by: Some("code".into()), skip: Some(1), take: Some(1), ..Default::default() };
        let list = list_employees(&db, &params).await?;
        assert_eq!(list.iter().map(|e| e.code.as_str()).collect::<Vec<_>>(), vec!["E002"]);
        Ok(())
    }

    fn codes(list: &[EmployeeListItem]) -> Vec<&str> {
        list.iter().map(|e| e.code.as_str()).collect()
    }

    #[tokio::test]
    async fn sorts_by_first_name_and_email() -> anyhow::Result<()> {
        let db = seeded().await?;
        let params = ListParams { sort_by: Some("FirstName".into()), ..Default::default() };
        assert_eq!(codes(&list_employees(&db, &params).await?), vec!["E001", "E002", "E003"]);

        let params = ListParams { sort_by: Some("email".into()), ..Default::default() };
        assert_eq!(codes(&list_employees(&db, &params).await?), vec!["E003", "E001", "E002"]);
        Ok(())
    }

    #[tokio::test]
    async fn search_matches_email() -> anyhow::Result<()> {
        let db = seeded().await?;
        let params = ListParams { search_text: Some("EWD@".into()), ..Default::default() };
        assert_eq!(codes(&list_employees(&db, &params).await?), vec!["E002"]);
        Ok(())
    }

    #[tokio::test]
    async fn dangling_department_id_yields_no_department() -> anyhow::Result<()> {
        let db = fixtures::memory_db().await?;
        fixtures::allow_dangling_references(&db).await?;
        fixtures::insert_employee(&db, "E404", "Ada", "Lovelace", "ada@corp.test", Some(404)).await?;
        let list = list_employees(&db, &ListParams::default()).await?;
        assert_eq!(codes(&list), vec!["E404"]);
        assert!(list[0].department.is_none());
        Ok(())
    }
}
