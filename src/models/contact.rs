use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::domain::Contact;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "contacts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub document: i32,
    #[sea_orm(unique)]
    pub email: String,
    pub birthdate: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Contact {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            document: model.document,
            email: model.email,
            birthdate: model.birthdate,
        }
    }
}
