//! Store bootstrap and row builders shared by tests across the workspace.
use sea_orm::{ActiveModelTrait, ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Set};

use crate::{customer, customer_category, department, employee, errors::ModelError, schema, supplier};

/// Fresh in-memory sqlite store with every table created.
///
/// A single pooled connection keeps the in-memory database alive and shared.
pub async fn memory_db() -> Result<DatabaseConnection, ModelError> {
    let mut opt = ConnectOptions::new("sqlite::memory:");
    opt.max_connections(1).min_connections(1).sqlx_logging(false);
    let db = Database::connect(opt).await?;
    schema::create_tables(&db).await?;
    Ok(db)
}

/// Turn off sqlite foreign key checks so rows can point at missing lookups.
pub async fn allow_dangling_references(db: &DatabaseConnection) -> Result<(), ModelError> {
    db.execute_unprepared("PRAGMA foreign_keys = OFF").await?;
    Ok(())
}

pub async fn insert_category(db: &DatabaseConnection, code: &str, description: &str) -> Result<customer_category::Model, ModelError> {
    let am = customer_category::ActiveModel {
        code: Set(code.to_string()),
        description: Set(description.to_string()),
        ..Default::default()
    };
    Ok(am.insert(db).await?)
}

pub async fn insert_customer(
    db: &DatabaseConnection,
    name: &str,
    email: &str,
    category_id: Option<i32>,
) -> Result<customer::Model, ModelError> {
    let am = customer::ActiveModel {
        name: Set(name.to_string()),
        address: Set(format!("{name} street 1")),
        email: Set(email.to_string()),
        phone: Set("+39 055 000000".to_string()),
        iban: Set("IT60X0542811101000000123456".to_string()),
        customer_category_id: Set(category_id),
        ..Default::default()
    };
    Ok(am.insert(db).await?)
}

pub async fn insert_department(db: &DatabaseConnection, code: &str, description: &str) -> Result<department::Model, ModelError> {
    let am = department::ActiveModel {
        code: Set(code.to_string()),
        description: Set(description.to_string()),
        ..Default::default()
    };
    Ok(am.insert(db).await?)
}

pub async fn insert_employee(
    db: &DatabaseConnection,
    code: &str,
    first_name: &str,
    last_name: &str,
    email: &str,
    department_id: Option<i32>,
) -> Result<employee::Model, ModelError> {
    let am = employee::ActiveModel {
        code: Set(code.to_string()),
        first_name: Set(first_name.to_string()),
        last_name: Set(last_name.to_string()),
        address: Set("Via Roma 1".to_string()),
        email: Set(email.to_string()),
        phone: Set("+39 02 000000".to_string()),
        department_id: Set(department_id),
        ..Default::default()
    };
    Ok(am.insert(db).await?)
}

pub async fn insert_supplier(db: &DatabaseConnection, name: &str, email: &str) -> Result<supplier::Model, ModelError> {
    let am = supplier::ActiveModel {
        name: Set(name.to_string()),
        address: Set(format!("{name} avenue 9")),
        email: Set(email.to_string()),
        phone: Set("+39 06 000000".to_string()),
        ..Default::default()
    };
    Ok(am.insert(db).await?)
}
