use axum::{
    Json, Router,
    extract::{Path, Query, State},
};
use uuid::Uuid;

use crate::{
    dto::product_models::{CreateProductModelRequest, ProductModelList, UpdateProductModelRequest},
    error::AppResult,
    models::ProductModel,
    response::ApiResponse,
    routes::params::{Pagination, ProductModelQuery},
    services::product_model_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", axum::routing::post(create_product_model))
        .route("/", axum::routing::get(list_product_models))
        .route("/{id}", axum::routing::get(get_product_model))
        .route("/{id}", axum::routing::put(update_product_model))
        .route("/{id}", axum::routing::delete(delete_product_model))
        .route("/{id}/children", axum::routing::get(get_children))
}

#[utoipa::path(
    post,
    path = "/api/v1/product-models",
    request_body = CreateProductModelRequest,
    responses(
        (status = 201, description = "Create product model", body = ApiResponse<ProductModel>),
        (status = 409, description = "Duplicate code or sku"),
    ),
    tag = "Product Models"
)]
pub async fn create_product_model(
    State(state): State<AppState>,
    Json(payload): Json<CreateProductModelRequest>,
) -> AppResult<Json<ApiResponse<ProductModel>>> {
    let response = product_model_service::create_product_model(&state, payload).await?;
    Ok(Json(response))
}

#[utoipa::path(
    get,
    path = "/api/v1/product-models",
    params(
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("size" = Option<i64>, Query, description = "Page size, default 20, max 100"),
        ("search" = Option<String>, Query, description = "Code substring"),
        ("family_variant_id" = Option<Uuid>, Query, description = "Filter by family variant"),
        ("parent_id" = Option<Uuid>, Query, description = "Filter by parent"),
    ),
    responses(
        (status = 200, description = "List product models", body = ApiResponse<ProductModelList>)
    ),
    tag = "Product Models"
)]
pub async fn list_product_models(
    State(state): State<AppState>,
    Query(query): Query<ProductModelQuery>,
) -> AppResult<Json<ApiResponse<ProductModelList>>> {
    let response = product_model_service::list_product_models(&state, query).await?;
    Ok(Json(response))
}

#[utoipa::path(
    get,
    path = "/api/v1/product-models/{id}",
    params(
        ("id" = Uuid, Path, description = "Product model ID")
    ),
    responses(
        (status = 200, description = "Get product model", body = ApiResponse<ProductModel>),
        (status = 404, description = "Product model not found"),
    ),
    tag = "Product Models"
)]
pub async fn get_product_model(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<ProductModel>>> {
    let response = product_model_service::get_product_model(&state, id).await?;
    Ok(Json(response))
}

#[utoipa::path(
    put,
    path = "/api/v1/product-models/{id}",
    params(
        ("id" = Uuid, Path, description = "Product model ID")
    ),
    request_body = UpdateProductModelRequest,
    responses(
        (status = 200, description = "Updated product model", body = ApiResponse<ProductModel>),
        (status = 404, description = "Product model not found"),
        (status = 409, description = "Duplicate code"),
    ),
    tag = "Product Models"
)]
pub async fn update_product_model(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateProductModelRequest>,
) -> AppResult<Json<ApiResponse<ProductModel>>> {
    let response = product_model_service::update_product_model(&state, id, payload).await?;
    Ok(Json(response))
}

#[utoipa::path(
    delete,
    path = "/api/v1/product-models/{id}",
    params(
        ("id" = Uuid, Path, description = "Product model ID")
    ),
    responses(
        (status = 200, description = "Deleted product model and its values"),
        (status = 404, description = "Product model not found"),
    ),
    tag = "Product Models"
)]
pub async fn delete_product_model(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let response = product_model_service::delete_product_model(&state, id).await?;
    Ok(Json(response))
}

#[utoipa::path(
    get,
    path = "/api/v1/product-models/{id}/children",
    params(
        ("id" = Uuid, Path, description = "Parent product model ID"),
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("size" = Option<i64>, Query, description = "Page size, default 20, max 100"),
    ),
    responses(
        (status = 200, description = "Direct children", body = ApiResponse<ProductModelList>),
        (status = 404, description = "Product model not found"),
    ),
    tag = "Product Models"
)]
pub async fn get_children(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<ApiResponse<ProductModelList>>> {
    let response = product_model_service::get_children(&state, id, pagination).await?;
    Ok(Json(response))
}
