use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::department;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "employee")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub code: String,
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub email: String,
    pub phone: String,
    pub department_id: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Department }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Department => Entity::belongs_to(department::Entity)
                .from(Column::DepartmentId)
                .to(department::Column::Id)
                .into(),
        }
    }
}

impl Related<department::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Department.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
