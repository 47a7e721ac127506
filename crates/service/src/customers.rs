use models::customer;
use sea_orm::{DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::errors::ServiceError;
use crate::listing::{self, contains_ci, search_any, ListParams, SortKey};
use crate::lookup::{self, CodeDescription};

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomersListQuery {
    /// Case-insensitive substring on the customer name.
    #[serde(default, alias = "Name")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub list: ListParams,
}

impl CustomersListQuery {
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref().filter(|s| !s.is_empty())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CustomerSort { Name, Email }

impl SortKey for CustomerSort {
    const ALL: &'static [Self] = &[CustomerSort::Name, CustomerSort::Email];

    fn name(&self) -> &'static str {
        match self {
            CustomerSort::Name => "Name",
            CustomerSort::Email => "Email",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerListItem {
    pub id: i32,
    pub name: String,
    pub address: String,
    pub email: String,
    pub phone: String,
    pub iban: String,
    pub customer_category: Option<CodeDescription>,
}

#[instrument(skip(db))]
pub async fn list_customers(db: &DatabaseConnection, q: &CustomersListQuery) -> Result<Vec<CustomerListItem>, ServiceError> {
    let params = &q.list;
    let mut query = customer::Entity::find();

    if let Some(name) = q.name() {
        query = query.filter(contains_ci(customer::Column::Name, name));
    }
    if let Some(text) = params.search() {
        query = query.filter(search_any(&[customer::Column::Name, customer::Column::Email], text));
    }
    query = match params.sort::<CustomerSort>() {
        Some(CustomerSort::Name) => query.order_by_asc(customer::Column::Name),
        Some(CustomerSort::Email) => query.order_by_asc(customer::Column::Email),
        None => query,
    };
    let rows = listing::window(query.order_by_asc(customer::Column::Id), params)
        .all(db)
        .await?;

    let categories = lookup::customer_categories(db, rows.iter().map(|r| r.customer_category_id)).await?;
    debug!(rows = rows.len(), categories = categories.len(), "customers fetched");

    Ok(rows
        .into_iter()
        .map(|m| CustomerListItem {
            customer_category: m.customer_category_id.and_then(|id| categories.get(&id).cloned()),
            id: m.id,
            name: m.name,
            address: m.address,
            email: m.email,
            phone: m.phone,
            iban: m.iban,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::fixtures;

    async fn seeded() -> anyhow::Result<DatabaseConnection> {
        let db = fixtures::memory_db().await?;
        let gold = fixtures::insert_category(&db, "GOLD", "Gold customers").await?;
        let retail = fixtures::insert_category(&db, "RET", "Retail").await?;
        fixtures::insert_customer(&db, "Umbrella", "contact@umbrella.test", Some(retail.id)).await?;
        fixtures::insert_customer(&db, "Acme", "zz@acme.test", Some(gold.id)).await?;
        fixtures::insert_customer(&db, "Globex", "aa@globex.test", None).await?;
        fixtures::insert_customer(&db, "Initech", "office@initech.test", Some(gold.id)).await?;
        Ok(db)
    }

    fn query(list: ListParams) -> CustomersListQuery {
        CustomersListQuery { name: None, list }
    }

    fn search(text: &str) -> CustomersListQuery {
        query(ListParams { search_text: Some(text.into()), ..Default::default() })
    }

    fn names(list: &[CustomerListItem]) -> Vec<&str> {
        list.iter().map(|c| c.name.as_str()).collect()
    }

    #[tokio::test]
    async fn no_parameters_returns_everything_in_id_order() -> anyhow::Result<()> {
        let db = seeded().await?;
        let list = list_customers(&db, &CustomersListQuery::default()).await?;
        assert_eq!(names(&list), vec!["Umbrella", "Acme", "Globex", "Initech"]);
        assert_eq!(list[1].customer_category.as_ref().map(|c| c.code.as_str()), Some("GOLD"));
        assert!(list[2].customer_category.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn search_text_matches_name_or_email() -> anyhow::Result<()> {
        let db = seeded().await?;
        let q = search("GLOB");
        assert_eq!(names(&list_customers(&db, &q).await?), vec!["Globex"]);

        let q = search("office@");
        assert_eq!(names(&list_customers(&db, &q).await?), vec!["Initech"]);
        Ok(())
    }

    #[tokio::test]
    async fn sort_by_name_and_email_ignore_case_of_field() -> anyhow::Result<()> {
        let db = seeded().await?;
        let q = query(ListParams { sort_by: Some("name".into()), ..Default::default() });
        assert_eq!(names(&list_customers(&db, &q).await?), vec!["Acme", "Globex", "Initech", "Umbrella"]);

        let q = query(ListParams { sort_by: Some("EMAIL".into()), ..Default::default() });
        assert_eq!(names(&list_customers(&db, &q).await?), vec!["Globex", "Umbrella", "Initech", "Acme"]);
        Ok(())
    }

    #[tokio::test]
    async fn unknown_sort_falls_back_to_id_order() -> anyhow::Result<()> {
        let db = seeded().await?;
        let q = query(ListParams { sort_by: Some("Phone".into()), ..Default::default() });
        assert_eq!(names(&list_customers(&db, &q).await?), vec!["Umbrella", "Acme", "Globex", "Initech"]);
        Ok(())
    }

    #[tokio::test]
    async fn skip_and_take_window_after_sorting() -> anyhow::Result<()> {
        let db = seeded().await?;
        let q = query(ListParams { sort_by: Some("Name".into()), skip: Some(1), take: Some(2), ..Default::default() });
        assert_eq!(names(&list_customers(&db, &q).await?), vec!["Globex", "Initech"]);

        let q = query(ListParams { skip: Some(3), ..Default::default() });
        assert_eq!(names(&list_customers(&db, &q).await?), vec!["Initech"]);

        let q = query(ListParams { take: Some(0), ..Default::default() });
        assert!(list_customers(&db, &q).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn name_filter_combines_with_search() -> anyhow::Result<()> {
        let db = seeded().await?;
        let q = CustomersListQuery {
            name: Some("e".into()),
            list: ListParams { search_text: Some(".test".into()), ..Default::default() },
        };
        assert_eq!(names(&list_customers(&db, &q).await?), vec!["Umbrella", "Acme", "Globex", "Initech"]);

        let q = CustomersListQuery { name: Some("ini".into()), ..Default::default() };
        assert_eq!(names(&list_customers(&db, &q).await?), vec!["Initech"]);
        Ok(())
    }

    #[tokio::test]
    async fn dangling_category_id_yields_no_category() -> anyhow::Result<()> {
        let db = fixtures::memory_db().await?;
        fixtures::allow_dangling_references(&db).await?;
        fixtures::insert_customer(&db, "Orphan", "orphan@example.test", Some(9_999)).await?;
        let list = list_customers(&db, &CustomersListQuery::default()).await?;
        assert_eq!(names(&list), vec!["Orphan"]);
        assert!(list[0].customer_category.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn underscore_and_backslash_match_literally() -> anyhow::Result<()> {
        let db = fixtures::memory_db().await?;
        fixtures::insert_customer(&db, "a_b", "one@example.test", None).await?;
        fixtures::insert_customer(&db, "axb", "two@example.test", None).await?;
        fixtures::insert_customer(&db, "c\\d", "three@example.test", None).await?;
        fixtures::insert_customer(&db, "cd", "four@example.test", None).await?;

        assert_eq!(names(&list_customers(&db, &search("a_b")).await?), vec!["a_b"]);
        assert_eq!(names(&list_customers(&db, &search("c\\d")).await?), vec!["c\\d"]);
        Ok(())
    }

    #[tokio::test]
    async fn non_ascii_search_matches_same_case() -> anyhow::Result<()> {
        let db = fixtures::memory_db().await?;
        fixtures::insert_customer(&db, "Ärger GmbH", "info@aerger.test", None).await?;
        fixtures::insert_customer(&db, "Acme", "zz@acme.test", None).await?;

        assert_eq!(names(&list_customers(&db, &search("Ärger")).await?), vec!["Ärger GmbH"]);
        assert_eq!(names(&list_customers(&db, &search("rger gmbh")).await?), vec!["Ärger GmbH"]);
        Ok(())
    }

    #[test]
    fn query_reads_name_and_shared_list_parameters() {
        let q: CustomersListQuery = serde_json::from_value(serde_json::json!({
            "Name": "ac", "SearchText": "x", "sortBy": "Email", "skip": "2", "Take": ""
        }))
        .unwrap();
        assert_eq!(q.name(), Some("ac"));
        assert_eq!(q.list.search(), Some("x"));
        assert_eq!(q.list.sort::<CustomerSort>(), Some(CustomerSort::Email));
        assert_eq!(q.list.skip, Some(2));
        assert_eq!(q.list.take, None);
    }
}
