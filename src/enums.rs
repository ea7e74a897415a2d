use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Semantic shape of an attribute, as seen by the UI.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "snake_case")]
pub enum AttributeType {
    #[sea_orm(string_value = "text")]
    Text,
    #[sea_orm(string_value = "textarea")]
    Textarea,
    #[sea_orm(string_value = "number")]
    Number,
    #[sea_orm(string_value = "boolean")]
    Boolean,
    #[sea_orm(string_value = "simple_select")]
    SimpleSelect,
    #[sea_orm(string_value = "multi_select")]
    MultiSelect,
    #[sea_orm(string_value = "date")]
    Date,
    #[sea_orm(string_value = "price")]
    Price,
    #[sea_orm(string_value = "image")]
    Image,
}

/// Physical representation of an attribute's values.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "snake_case")]
pub enum BackendType {
    #[sea_orm(string_value = "string")]
    String,
    #[sea_orm(string_value = "float")]
    Float,
    #[sea_orm(string_value = "boolean")]
    Boolean,
    #[sea_orm(string_value = "option")]
    Option,
    #[sea_orm(string_value = "options")]
    Options,
    #[sea_orm(string_value = "date")]
    Date,
    #[sea_orm(string_value = "json")]
    Json,
}

/// Which table an entity reference points into.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    #[sea_orm(string_value = "product")]
    Product,
    #[sea_orm(string_value = "product_model")]
    ProductModel,
}

impl AttributeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttributeType::Text => "text",
            AttributeType::Textarea => "textarea",
            AttributeType::Number => "number",
            AttributeType::Boolean => "boolean",
            AttributeType::SimpleSelect => "simple_select",
            AttributeType::MultiSelect => "multi_select",
            AttributeType::Date => "date",
            AttributeType::Price => "price",
            AttributeType::Image => "image",
        }
    }

    /// Only select attributes own options.
    pub fn supports_options(&self) -> bool {
        matches!(self, AttributeType::SimpleSelect | AttributeType::MultiSelect)
    }

    /// Backend representations this attribute type can be stored as.
    pub fn accepts_backend(&self, backend: BackendType) -> bool {
        match self {
            AttributeType::Text | AttributeType::Textarea => {
                matches!(backend, BackendType::String)
            }
            AttributeType::Number => matches!(backend, BackendType::Float),
            AttributeType::Boolean => matches!(backend, BackendType::Boolean),
            AttributeType::SimpleSelect => matches!(backend, BackendType::Option),
            AttributeType::MultiSelect => matches!(backend, BackendType::Options),
            AttributeType::Date => matches!(backend, BackendType::Date),
            AttributeType::Price => matches!(backend, BackendType::Json | BackendType::Float),
            AttributeType::Image => matches!(backend, BackendType::String | BackendType::Json),
        }
    }
}

impl std::fmt::Display for AttributeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl BackendType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendType::String => "string",
            BackendType::Float => "float",
            BackendType::Boolean => "boolean",
            BackendType::Option => "option",
            BackendType::Options => "options",
            BackendType::Date => "date",
            BackendType::Json => "json",
        }
    }

    /// Whether a JSON payload is storable under this representation.
    pub fn accepts_value(&self, value: &serde_json::Value) -> bool {
        match self {
            BackendType::String | BackendType::Option => value.is_string(),
            BackendType::Float => value.is_number(),
            BackendType::Boolean => value.is_boolean(),
            BackendType::Options => value
                .as_array()
                .is_some_and(|items| items.iter().all(|v| v.is_string())),
            BackendType::Date => value
                .as_str()
                .is_some_and(|s| chrono::NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok()),
            BackendType::Json => true,
        }
    }
}

impl std::fmt::Display for BackendType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl EntityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityType::Product => "product",
            EntityType::ProductModel => "product_model",
        }
    }
}

impl std::fmt::Display for EntityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn select_types_pair_with_option_backends() {
        assert!(AttributeType::SimpleSelect.accepts_backend(BackendType::Option));
        assert!(AttributeType::MultiSelect.accepts_backend(BackendType::Options));
        assert!(!AttributeType::SimpleSelect.accepts_backend(BackendType::Options));
        assert!(!AttributeType::MultiSelect.accepts_backend(BackendType::String));
    }

    #[test]
    fn price_allows_json_or_float() {
        assert!(AttributeType::Price.accepts_backend(BackendType::Json));
        assert!(AttributeType::Price.accepts_backend(BackendType::Float));
        assert!(!AttributeType::Price.accepts_backend(BackendType::String));
    }

    #[test]
    fn text_only_pairs_with_string() {
        assert!(AttributeType::Text.accepts_backend(BackendType::String));
        assert!(!AttributeType::Text.accepts_backend(BackendType::Float));
        assert!(!AttributeType::Textarea.accepts_backend(BackendType::Json));
    }

    #[test]
    fn only_select_types_support_options() {
        assert!(AttributeType::SimpleSelect.supports_options());
        assert!(AttributeType::MultiSelect.supports_options());
        assert!(!AttributeType::Text.supports_options());
        assert!(!AttributeType::Price.supports_options());
    }

    #[test]
    fn value_shapes_follow_backend() {
        assert!(BackendType::String.accepts_value(&json!("red")));
        assert!(!BackendType::String.accepts_value(&json!(42)));
        assert!(BackendType::Float.accepts_value(&json!(19.99)));
        assert!(!BackendType::Float.accepts_value(&json!("19.99")));
        assert!(BackendType::Boolean.accepts_value(&json!(true)));
        assert!(BackendType::Options.accepts_value(&json!(["red", "blue"])));
        assert!(!BackendType::Options.accepts_value(&json!(["red", 2])));
        assert!(BackendType::Date.accepts_value(&json!("2024-06-01")));
        assert!(!BackendType::Date.accepts_value(&json!("June 1st")));
        assert!(BackendType::Json.accepts_value(&json!({"amount": 10, "currency": "USD"})));
    }
}
