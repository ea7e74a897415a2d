use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::enums::EntityType;
use crate::models::ProductValue;

/// Upsert payload; the 5-tuple (entity_type, entity_id, attribute_id,
/// scope, locale) is the logical key.
#[derive(Debug, Deserialize, ToSchema)]
pub struct SetValueRequest {
    pub entity_type: EntityType,
    pub entity_id: Uuid,
    pub attribute_id: Uuid,
    pub scope: Option<String>,
    pub locale: Option<String>,
    pub value: Option<Value>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ValueQuery {
    pub attribute_id: Option<Uuid>,
    pub scope: Option<String>,
    pub locale: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct ValueList {
    pub items: Vec<ProductValue>,
}
