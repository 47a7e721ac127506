use models::supplier;
use sea_orm::{DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use serde::Serialize;
use tracing::{debug, instrument};

use crate::errors::ServiceError;
use crate::listing::{self, search_any, ListParams, SortKey};

pub type SuppliersListQuery = ListParams;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SupplierSort { Name, Email }

impl SortKey for SupplierSort {
    const ALL: &'static [Self] = &[SupplierSort::Name, SupplierSort::Email];

    fn name(&self) -> &'static str {
        match self {
            SupplierSort::Name => "Name",
            SupplierSort::Email => "Email",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplierListItem {
    pub id: i32,
    pub name: String,
    pub address: String,
    pub email: String,
    pub phone: String,
}

#[instrument(skip(db))]
pub async fn list_suppliers(db: &DatabaseConnection, params: &SuppliersListQuery) -> Result<Vec<SupplierListItem>, ServiceError> {
    let mut query = supplier::Entity::find();
    if let Some(text) = params.search() {
        query = query.filter(search_any(&[supplier::Column::Name, supplier::Column::Email], text));
    }
    query = match params.sort::<SupplierSort>() {
        Some(SupplierSort::Name) => query.order_by_asc(supplier::Column::Name),
        Some(SupplierSort::Email) => query.order_by_asc(supplier::Column::Email),
        None => query,
    };
    let rows = listing::window(query.order_by_asc(supplier::Column::Id), params)
        .all(db)
        .await?;
    debug!(rows = rows.len(), "suppliers fetched");

    Ok(rows
        .into_iter()
        .map(|m| SupplierListItem { id: m.id, name: m.name, address: m.address, email: m.email, phone: m.phone })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::fixtures;

    #[tokio::test]
    async fn search_and_sort_by_email() -> anyhow::Result<()> {
        let db = fixtures::memory_db().await?;
        fixtures::insert_supplier(&db, "Zeta Metals", "sales@zeta.test").await?;
        fixtures::insert_supplier(&db, "Alpha Paper", "orders@alpha.test").await?;
        fixtures::insert_supplier(&db, "Beta Inks", "hello@beta.test").await?;

        let params = ListParams { search_text: Some(".TEST".into()), sort_by: Some("Email".into()), ..Default::default() };
        let list = list_suppliers(&db, &params).await?;
        let emails: Vec<_> = list.iter().map(|s| s.email.as_str()).collect();
        assert_eq!(emails, vec!["hello@beta.test", "orders@alpha.test", "sales@zeta.test"]);
        Ok(())
    }

    #[tokio::test]
    async fn like_metacharacters_match_literally() -> anyhow::Result<()> {
        let db = fixtures::memory_db().await?;
        fixtures::insert_supplier(&db, "100% Cotton", "cotton@mill.test").await?;
        fixtures::insert_supplier(&db, "1000 Cottons", "bulk@mill.test").await?;

        let params = ListParams { search_text: Some("0%".into()), ..Default::default() };
        let list = list_suppliers(&db, &params).await?;
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].name, "100% Cotton");
        Ok(())
    }
}
