use axum::{
    Json, Router,
    extract::{Path, Query, State},
};
use uuid::Uuid;

use crate::{
    dto::attributes::{AttributeList, CreateAttributeRequest, UpdateAttributeRequest},
    error::AppResult,
    models::Attribute,
    response::ApiResponse,
    routes::params::AttributeQuery,
    services::attribute_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", axum::routing::post(create_attribute))
        .route("/", axum::routing::get(list_attributes))
        .route("/{id}", axum::routing::get(get_attribute))
        .route("/{id}", axum::routing::put(update_attribute))
        .route("/{id}", axum::routing::delete(delete_attribute))
}

#[utoipa::path(
    post,
    path = "/api/v1/attributes",
    request_body = CreateAttributeRequest,
    responses(
        (status = 201, description = "Create attribute", body = ApiResponse<Attribute>),
        (status = 400, description = "Incompatible backend type"),
        (status = 409, description = "Duplicate code"),
    ),
    tag = "Attributes"
)]
pub async fn create_attribute(
    State(state): State<AppState>,
    Json(payload): Json<CreateAttributeRequest>,
) -> AppResult<Json<ApiResponse<Attribute>>> {
    let response = attribute_service::create_attribute(&state, payload).await?;
    Ok(Json(response))
}

#[utoipa::path(
    get,
    path = "/api/v1/attributes",
    params(
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("size" = Option<i64>, Query, description = "Page size, default 20, max 100"),
        ("search" = Option<String>, Query, description = "Code or label substring"),
        ("type" = Option<String>, Query, description = "Filter by attribute type"),
        ("backend_type" = Option<String>, Query, description = "Filter by backend type"),
        ("group_code" = Option<String>, Query, description = "Filter by group code"),
        ("is_localizable" = Option<bool>, Query, description = "Filter by localizable flag"),
        ("is_scopable" = Option<bool>, Query, description = "Filter by scopable flag"),
    ),
    responses(
        (status = 200, description = "List attributes", body = ApiResponse<AttributeList>)
    ),
    tag = "Attributes"
)]
pub async fn list_attributes(
    State(state): State<AppState>,
    Query(query): Query<AttributeQuery>,
) -> AppResult<Json<ApiResponse<AttributeList>>> {
    let response = attribute_service::list_attributes(&state, query).await?;
    Ok(Json(response))
}

#[utoipa::path(
    get,
    path = "/api/v1/attributes/{id}",
    params(
        ("id" = Uuid, Path, description = "Attribute ID")
    ),
    responses(
        (status = 200, description = "Get attribute", body = ApiResponse<Attribute>),
        (status = 404, description = "Attribute not found"),
    ),
    tag = "Attributes"
)]
pub async fn get_attribute(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Attribute>>> {
    let response = attribute_service::get_attribute(&state, id).await?;
    Ok(Json(response))
}

#[utoipa::path(
    put,
    path = "/api/v1/attributes/{id}",
    params(
        ("id" = Uuid, Path, description = "Attribute ID")
    ),
    request_body = UpdateAttributeRequest,
    responses(
        (status = 200, description = "Updated attribute", body = ApiResponse<Attribute>),
        (status = 404, description = "Attribute not found"),
        (status = 409, description = "Duplicate code"),
    ),
    tag = "Attributes"
)]
pub async fn update_attribute(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateAttributeRequest>,
) -> AppResult<Json<ApiResponse<Attribute>>> {
    let response = attribute_service::update_attribute(&state, id, payload).await?;
    Ok(Json(response))
}

#[utoipa::path(
    delete,
    path = "/api/v1/attributes/{id}",
    params(
        ("id" = Uuid, Path, description = "Attribute ID")
    ),
    responses(
        (status = 200, description = "Deleted attribute with its options and values"),
        (status = 404, description = "Attribute not found"),
    ),
    tag = "Attributes"
)]
pub async fn delete_attribute(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let response = attribute_service::delete_attribute(&state, id).await?;
    Ok(Json(response))
}
