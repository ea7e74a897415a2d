use utoipa::OpenApi;
use utoipa::openapi::OpenApi as OpenApiSpec;
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        attributes::{AttributeList, OptionList},
        families::{FamilyList, FamilyVariantList},
        product_models::ProductModelList,
        products::ProductList,
        values::ValueList,
    },
    models::{Attribute, AttributeOption, Family, FamilyVariant, Product, ProductModel, ProductValue},
    response::{ApiResponse, Meta},
    routes::{attribute_options, attributes, families, health, params, product_models, products, values},
};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        attributes::create_attribute,
        attributes::list_attributes,
        attributes::get_attribute,
        attributes::update_attribute,
        attributes::delete_attribute,
        attribute_options::create_option,
        attribute_options::list_options,
        attribute_options::replace_options,
        attribute_options::reorder_options,
        attribute_options::get_option,
        attribute_options::update_option,
        attribute_options::delete_option,
        product_models::create_product_model,
        product_models::list_product_models,
        product_models::get_product_model,
        product_models::update_product_model,
        product_models::delete_product_model,
        product_models::get_children,
        products::create_product,
        products::list_products,
        products::get_product,
        products::update_product,
        products::delete_product,
        families::create_family,
        families::list_families,
        families::get_family,
        families::update_family,
        families::delete_family,
        families::create_variant,
        families::list_variants,
        families::get_variant,
        families::update_variant,
        families::delete_variant,
        values::set_value,
        values::get_values,
        values::delete_entity_values,
        values::delete_value,
    ),
    components(
        schemas(
            Attribute,
            AttributeOption,
            Family,
            FamilyVariant,
            ProductModel,
            Product,
            ProductValue,
            AttributeList,
            OptionList,
            FamilyList,
            FamilyVariantList,
            ProductModelList,
            ProductList,
            ValueList,
            params::Pagination,
            params::AttributeQuery,
            params::ProductModelQuery,
            params::ProductQuery,
            params::FamilyQuery,
            Meta,
            ApiResponse<Attribute>,
            ApiResponse<AttributeList>,
            ApiResponse<AttributeOption>,
            ApiResponse<OptionList>,
            ApiResponse<ProductModel>,
            ApiResponse<ProductModelList>,
            ApiResponse<Product>,
            ApiResponse<ProductList>,
            ApiResponse<ProductValue>,
            ApiResponse<ValueList>
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Attributes", description = "Attribute catalog endpoints"),
        (name = "Attribute Options", description = "Option endpoints for select attributes"),
        (name = "Product Models", description = "Product model hierarchy endpoints"),
        (name = "Products", description = "Product endpoints"),
        (name = "Families", description = "Family and family variant endpoints"),
        (name = "Product Values", description = "Entity value store endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
