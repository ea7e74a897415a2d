use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "families")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: Uuid,
    pub code: String,
    pub attribute_ids: Vec<Uuid>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::family_variants::Entity")]
    FamilyVariants,
}

impl Related<super::family_variants::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FamilyVariants.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
