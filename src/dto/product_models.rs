use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::ProductModel;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateProductModelRequest {
    pub code: String,
    pub title: String,
    pub sku: Option<String>,
    pub family_variant_id: Option<Uuid>,
    pub parent_id: Option<Uuid>,
    #[serde(default)]
    pub category_ids: Vec<Uuid>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateProductModelRequest {
    pub code: Option<String>,
    pub title: Option<String>,
    pub sku: Option<String>,
    pub family_variant_id: Option<Uuid>,
    pub parent_id: Option<Uuid>,
    pub category_ids: Option<Vec<Uuid>>,
}

#[derive(Serialize, ToSchema)]
pub struct ProductModelList {
    pub items: Vec<ProductModel>,
}
