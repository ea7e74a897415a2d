use axum::Router;

use crate::state::AppState;

pub mod attribute_options;
pub mod attributes;
pub mod doc;
pub mod families;
pub mod health;
pub mod params;
pub mod product_models;
pub mod products;
pub mod values;

// Build the API router without binding state; it will be provided at the top level.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .nest(
            "/attributes",
            attributes::router().merge(attribute_options::router()),
        )
        .nest("/product-models", product_models::router())
        .nest("/products", products::router())
        .nest("/families", families::router())
        .nest("/values", values::router())
}
