use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::enums::{AttributeType, BackendType};
use crate::models::{Attribute, AttributeOption};

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateOptionRequest {
    pub code: String,
    pub labels: Option<Value>,
    pub sort_order: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateOptionRequest {
    pub code: String,
    pub labels: Option<Value>,
    pub sort_order: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateAttributeRequest {
    pub code: String,
    #[serde(rename = "type")]
    pub kind: AttributeType,
    pub backend_type: BackendType,
    #[serde(default)]
    pub is_localizable: bool,
    #[serde(default)]
    pub is_scopable: bool,
    pub group_code: Option<String>,
    pub labels: Option<Value>,
    pub config: Option<Value>,
    #[serde(default)]
    pub options: Vec<CreateOptionRequest>,
}

/// Partial update. When `options` is present (even empty) the whole
/// option set is replaced, not merged.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateAttributeRequest {
    pub code: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<AttributeType>,
    pub backend_type: Option<BackendType>,
    pub is_localizable: Option<bool>,
    pub is_scopable: Option<bool>,
    pub group_code: Option<String>,
    pub labels: Option<Value>,
    pub config: Option<Value>,
    pub options: Option<Vec<CreateOptionRequest>>,
}

#[derive(Serialize, ToSchema)]
pub struct AttributeList {
    pub items: Vec<Attribute>,
}

#[derive(Serialize, ToSchema)]
pub struct OptionList {
    pub items: Vec<AttributeOption>,
}
