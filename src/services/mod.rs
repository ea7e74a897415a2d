pub mod attribute_service;
pub mod family_service;
pub mod option_service;
pub mod product_model_service;
pub mod product_service;
pub mod value_service;
