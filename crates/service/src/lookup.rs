//! Code/description lookups joined onto list rows.
//!
//! A page of rows resolves its lookups with one `IN (...)` query.

use std::collections::{BTreeSet, HashMap};

use models::{customer_category, department};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use serde::Serialize;

use crate::errors::ServiceError;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CodeDescription {
    pub code: String,
    pub description: String,
}

fn distinct_ids(ids: impl IntoIterator<Item = Option<i32>>) -> Vec<i32> {
    ids.into_iter().flatten().collect::<BTreeSet<_>>().into_iter().collect()
}

pub async fn customer_categories(
    db: &DatabaseConnection,
    ids: impl IntoIterator<Item = Option<i32>>,
) -> Result<HashMap<i32, CodeDescription>, ServiceError> {
    let ids = distinct_ids(ids);
    if ids.is_empty() {
        return Ok(HashMap::new());
    }
    let rows = customer_category::Entity::find()
        .filter(customer_category::Column::Id.is_in(ids))
        .all(db)
        .await?;
    Ok(rows
        .into_iter()
        .map(|m| (m.id, CodeDescription { code: m.code, description: m.description }))
        .collect())
}

pub async fn departments(
    db: &DatabaseConnection,
    ids: impl IntoIterator<Item = Option<i32>>,
) -> Result<HashMap<i32, CodeDescription>, ServiceError> {
    let ids = distinct_ids(ids);
    if ids.is_empty() {
        return Ok(HashMap::new());
    }
    let rows = department::Entity::find()
        .filter(department::Column::Id.is_in(ids))
        .all(db)
        .await?;
    Ok(rows
        .into_iter()
        .map(|m| (m.id, CodeDescription { code: m.code, description: m.description }))
        .collect())
}
