pub mod attributes;
pub mod families;
pub mod product_models;
pub mod products;
pub mod values;
