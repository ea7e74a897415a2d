use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::{Family, FamilyVariant};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateFamilyRequest {
    pub code: String,
    #[serde(default)]
    pub attribute_ids: Vec<Uuid>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateFamilyRequest {
    pub code: Option<String>,
    pub attribute_ids: Option<Vec<Uuid>>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateFamilyVariantRequest {
    pub code: String,
    pub level: Option<String>,
    #[serde(default)]
    pub axes: Vec<Uuid>,
    #[serde(default)]
    pub attributes: Vec<Uuid>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateFamilyVariantRequest {
    pub code: Option<String>,
    pub level: Option<String>,
    pub axes: Option<Vec<Uuid>>,
    pub attributes: Option<Vec<Uuid>>,
}

#[derive(Serialize, ToSchema)]
pub struct FamilyList {
    pub items: Vec<Family>,
}

#[derive(Serialize, ToSchema)]
pub struct FamilyVariantList {
    pub items: Vec<FamilyVariant>,
}
