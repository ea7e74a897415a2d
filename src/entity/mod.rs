pub mod attribute_options;
pub mod attributes;
pub mod audit_logs;
pub mod families;
pub mod family_variants;
pub mod product_models;
pub mod product_values;
pub mod products;

pub use attribute_options::Entity as AttributeOptions;
pub use attributes::Entity as Attributes;
pub use audit_logs::Entity as AuditLogs;
pub use families::Entity as Families;
pub use family_variants::Entity as FamilyVariants;
pub use product_models::Entity as ProductModels;
pub use product_values::Entity as ProductValues;
pub use products::Entity as Products;
