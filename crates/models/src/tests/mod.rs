use sea_orm::{EntityTrait, ModelTrait, PaginatorTrait};

use crate::fixtures::{self, memory_db};
use crate::{customer, customer_category, employee, schema};

#[tokio::test]
async fn bootstrap_is_idempotent() -> anyhow::Result<()> {
    let db = memory_db().await?;
    schema::create_tables(&db).await?;
    assert_eq!(customer::Entity::find().count(&db).await?, 0);
    Ok(())
}

#[tokio::test]
async fn customer_resolves_its_category() -> anyhow::Result<()> {
    let db = memory_db().await?;
    let cat = fixtures::insert_category(&db, "GOLD", "Gold customers").await?;
    let c = fixtures::insert_customer(&db, "Acme", "info@acme.test", Some(cat.id)).await?;

    let found = c.find_related(customer_category::Entity).one(&db).await?;
    assert_eq!(found.map(|m| m.code), Some("GOLD".to_string()));
    Ok(())
}

#[tokio::test]
async fn employee_without_department_is_stored() -> anyhow::Result<()> {
    let db = memory_db().await?;
    let e = fixtures::insert_employee(&db, "E001", "Ada", "Lovelace", "ada@corp.test", None).await?;
    let got = employee::Entity::find_by_id(e.id).one(&db).await?;
    assert_eq!(got.and_then(|m| m.department_id), None);
    Ok(())
}
