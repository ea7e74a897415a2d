use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::enums::{AttributeType, BackendType, EntityType};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Attribute {
    pub id: Uuid,
    pub code: String,
    #[serde(rename = "type")]
    pub kind: AttributeType,
    pub backend_type: BackendType,
    pub is_localizable: bool,
    pub is_scopable: bool,
    pub group_code: Option<String>,
    pub labels: Option<Value>,
    pub config: Option<Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub options: Vec<AttributeOption>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AttributeOption {
    pub id: Uuid,
    pub attribute_id: Uuid,
    pub code: String,
    pub labels: Option<Value>,
    pub sort_order: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Family {
    pub id: Uuid,
    pub code: String,
    pub attribute_ids: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FamilyVariant {
    pub id: Uuid,
    pub family_id: Uuid,
    pub code: String,
    pub level: Option<String>,
    pub axes: Vec<Uuid>,
    pub attributes: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProductModel {
    pub id: Uuid,
    pub code: String,
    pub title: String,
    pub sku: Option<String>,
    pub family_variant_id: Option<Uuid>,
    pub parent_id: Option<Uuid>,
    pub category_ids: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Product {
    pub id: Uuid,
    pub sku: String,
    pub product_model_id: Option<Uuid>,
    pub enabled: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProductValue {
    pub id: Uuid,
    pub entity_type: EntityType,
    pub entity_id: Uuid,
    pub attribute_id: Uuid,
    pub scope: Option<String>,
    pub locale: Option<String>,
    pub value: Option<Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Tagged reference to the entity a value hangs off. The store has no
/// foreign key for this, so every write is preceded by a lookup against
/// the table the tag names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityRef {
    Product(Uuid),
    ProductModel(Uuid),
}

impl EntityRef {
    pub fn new(entity_type: EntityType, id: Uuid) -> Self {
        match entity_type {
            EntityType::Product => EntityRef::Product(id),
            EntityType::ProductModel => EntityRef::ProductModel(id),
        }
    }

    pub fn entity_type(&self) -> EntityType {
        match self {
            EntityRef::Product(_) => EntityType::Product,
            EntityRef::ProductModel(_) => EntityType::ProductModel,
        }
    }

    pub fn id(&self) -> Uuid {
        match self {
            EntityRef::Product(id) | EntityRef::ProductModel(id) => *id,
        }
    }
}
