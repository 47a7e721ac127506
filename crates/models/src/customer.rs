use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::customer_category;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "customer")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub address: String,
    pub email: String,
    pub phone: String,
    pub iban: String,
    pub customer_category_id: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { CustomerCategory }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::CustomerCategory => Entity::belongs_to(customer_category::Entity)
                .from(Column::CustomerCategoryId)
                .to(customer_category::Column::Id)
                .into(),
        }
    }
}

impl Related<customer_category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CustomerCategory.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
