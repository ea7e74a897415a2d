use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::enums::{AttributeType, BackendType};

#[derive(Debug, Deserialize, ToSchema)]
pub struct Pagination {
    pub page: Option<i64>,
    pub size: Option<i64>,
}

impl Pagination {
    pub fn normalize(&self) -> (i64, i64, i64) {
        let page = self.page.unwrap_or(1).max(1);
        let size = self.size.unwrap_or(20).clamp(1, 100);
        let offset = (page - 1) * size;
        (page, size, offset)
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AttributeQuery {
    #[serde(flatten)]
    pub pagination: Pagination,
    pub search: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<AttributeType>,
    pub backend_type: Option<BackendType>,
    pub group_code: Option<String>,
    pub is_localizable: Option<bool>,
    pub is_scopable: Option<bool>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ProductModelQuery {
    #[serde(flatten)]
    pub pagination: Pagination,
    pub search: Option<String>,
    pub family_variant_id: Option<Uuid>,
    pub parent_id: Option<Uuid>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ProductQuery {
    #[serde(flatten)]
    pub pagination: Pagination,
    pub search: Option<String>,
    pub product_model_id: Option<Uuid>,
    pub enabled: Option<bool>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct FamilyQuery {
    #[serde(flatten)]
    pub pagination: Pagination,
    pub search: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_clamps_and_offsets() {
        let p = Pagination {
            page: Some(3),
            size: Some(10),
        };
        assert_eq!(p.normalize(), (3, 10, 20));

        let defaults = Pagination {
            page: None,
            size: None,
        };
        assert_eq!(defaults.normalize(), (1, 20, 0));

        let out_of_range = Pagination {
            page: Some(0),
            size: Some(1000),
        };
        assert_eq!(out_of_range.normalize(), (1, 100, 0));
    }
}
