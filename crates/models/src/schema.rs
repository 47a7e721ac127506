//! Schema bootstrap derived from the entity definitions.
//!
//! Tables are created in dependency order (lookups before the rows that
//! reference them) and only when missing.
use sea_orm::{ConnectionTrait, DatabaseConnection, EntityTrait, Schema};
use tracing::info;

use crate::{customer, customer_category, department, employee, errors::ModelError, supplier};

async fn create_table<E: EntityTrait>(db: &DatabaseConnection, schema: &Schema, entity: E) -> Result<(), ModelError> {
    let backend = db.get_database_backend();
    let table = entity.table_name().to_owned();
    let mut stmt = schema.create_table_from_entity(entity);
    stmt.if_not_exists();
    db.execute(backend.build(&stmt)).await?;
    info!(%table, "table ensured");
    Ok(())
}

pub async fn create_tables(db: &DatabaseConnection) -> Result<(), ModelError> {
    let schema = Schema::new(db.get_database_backend());
    create_table(db, &schema, customer_category::Entity).await?;
    create_table(db, &schema, customer::Entity).await?;
    create_table(db, &schema, department::Entity).await?;
    create_table(db, &schema, employee::Entity).await?;
    create_table(db, &schema, supplier::Entity).await?;
    Ok(())
}
