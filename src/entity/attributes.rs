use sea_orm::entity::prelude::*;

use crate::enums::{AttributeType, BackendType};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "attributes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: Uuid,
    pub code: String,
    #[sea_orm(column_name = "type")]
    pub kind: AttributeType,
    pub backend_type: BackendType,
    pub is_localizable: bool,
    pub is_scopable: bool,
    pub group_code: Option<String>,
    pub labels: Option<Json>,
    pub config: Option<Json>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::attribute_options::Entity")]
    AttributeOptions,
    #[sea_orm(has_many = "super::product_values::Entity")]
    ProductValues,
}

impl Related<super::attribute_options::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AttributeOptions.def()
    }
}

impl Related<super::product_values::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProductValues.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
