use axum::{
    Json, Router,
    extract::{Path, Query, State},
};
use uuid::Uuid;

use crate::{
    dto::values::{SetValueRequest, ValueList, ValueQuery},
    enums::EntityType,
    error::AppResult,
    models::{EntityRef, ProductValue},
    response::ApiResponse,
    services::value_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", axum::routing::post(set_value))
        .route(
            "/{entity_type}/{entity_id}",
            axum::routing::get(get_values),
        )
        .route(
            "/{entity_type}/{entity_id}",
            axum::routing::delete(delete_entity_values),
        )
        .route("/{id}", axum::routing::delete(delete_value))
}

#[utoipa::path(
    post,
    path = "/api/v1/values",
    request_body = SetValueRequest,
    responses(
        (status = 200, description = "Upsert a value", body = ApiResponse<ProductValue>),
        (status = 400, description = "Value does not match the attribute"),
        (status = 404, description = "Attribute or entity not found"),
    ),
    tag = "Product Values"
)]
pub async fn set_value(
    State(state): State<AppState>,
    Json(payload): Json<SetValueRequest>,
) -> AppResult<Json<ApiResponse<ProductValue>>> {
    let response = value_service::set_value(&state, payload).await?;
    Ok(Json(response))
}

#[utoipa::path(
    get,
    path = "/api/v1/values/{entity_type}/{entity_id}",
    params(
        ("entity_type" = String, Path, description = "product or product_model"),
        ("entity_id" = Uuid, Path, description = "Entity ID"),
        ("attribute_id" = Option<Uuid>, Query, description = "Filter by attribute"),
        ("scope" = Option<String>, Query, description = "Filter by scope"),
        ("locale" = Option<String>, Query, description = "Filter by locale"),
    ),
    responses(
        (status = 200, description = "List entity values", body = ApiResponse<ValueList>)
    ),
    tag = "Product Values"
)]
pub async fn get_values(
    State(state): State<AppState>,
    Path((entity_type, entity_id)): Path<(EntityType, Uuid)>,
    Query(query): Query<ValueQuery>,
) -> AppResult<Json<ApiResponse<ValueList>>> {
    let entity = EntityRef::new(entity_type, entity_id);
    let response = value_service::get_values(&state, entity, query).await?;
    Ok(Json(response))
}

#[utoipa::path(
    delete,
    path = "/api/v1/values/{entity_type}/{entity_id}",
    params(
        ("entity_type" = String, Path, description = "product or product_model"),
        ("entity_id" = Uuid, Path, description = "Entity ID"),
    ),
    responses(
        (status = 200, description = "Deleted all values of the entity")
    ),
    tag = "Product Values"
)]
pub async fn delete_entity_values(
    State(state): State<AppState>,
    Path((entity_type, entity_id)): Path<(EntityType, Uuid)>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let entity = EntityRef::new(entity_type, entity_id);
    let response = value_service::delete_entity_values(&state, entity).await?;
    Ok(Json(response))
}

#[utoipa::path(
    delete,
    path = "/api/v1/values/{id}",
    params(
        ("id" = Uuid, Path, description = "Value ID")
    ),
    responses(
        (status = 200, description = "Deleted value"),
        (status = 404, description = "Value not found"),
    ),
    tag = "Product Values"
)]
pub async fn delete_value(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let response = value_service::delete_value(&state, id).await?;
    Ok(Json(response))
}
