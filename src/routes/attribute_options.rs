use axum::{
    Json, Router,
    extract::{Path, State},
};
use uuid::Uuid;

use crate::{
    dto::attributes::{CreateOptionRequest, OptionList, UpdateOptionRequest},
    error::AppResult,
    models::AttributeOption,
    response::ApiResponse,
    services::option_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{attribute_id}/options", axum::routing::post(create_option))
        .route("/{attribute_id}/options", axum::routing::get(list_options))
        .route("/{attribute_id}/options", axum::routing::put(replace_options))
        .route(
            "/{attribute_id}/options/reorder",
            axum::routing::put(reorder_options),
        )
        .route(
            "/{attribute_id}/options/{option_id}",
            axum::routing::get(get_option),
        )
        .route(
            "/{attribute_id}/options/{option_id}",
            axum::routing::put(update_option),
        )
        .route(
            "/{attribute_id}/options/{option_id}",
            axum::routing::delete(delete_option),
        )
}

#[utoipa::path(
    post,
    path = "/api/v1/attributes/{attribute_id}/options",
    params(
        ("attribute_id" = Uuid, Path, description = "Attribute ID")
    ),
    request_body = CreateOptionRequest,
    responses(
        (status = 201, description = "Create option", body = ApiResponse<AttributeOption>),
        (status = 400, description = "Attribute type does not support options"),
        (status = 404, description = "Attribute not found"),
        (status = 409, description = "Duplicate option code"),
    ),
    tag = "Attribute Options"
)]
pub async fn create_option(
    State(state): State<AppState>,
    Path(attribute_id): Path<Uuid>,
    Json(payload): Json<CreateOptionRequest>,
) -> AppResult<Json<ApiResponse<AttributeOption>>> {
    let response = option_service::add_option(&state, attribute_id, payload).await?;
    Ok(Json(response))
}

#[utoipa::path(
    get,
    path = "/api/v1/attributes/{attribute_id}/options",
    params(
        ("attribute_id" = Uuid, Path, description = "Attribute ID")
    ),
    responses(
        (status = 200, description = "List options", body = ApiResponse<OptionList>),
        (status = 404, description = "Attribute not found"),
    ),
    tag = "Attribute Options"
)]
pub async fn list_options(
    State(state): State<AppState>,
    Path(attribute_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<OptionList>>> {
    let response = option_service::list_options(&state, attribute_id).await?;
    Ok(Json(response))
}

#[utoipa::path(
    put,
    path = "/api/v1/attributes/{attribute_id}/options",
    params(
        ("attribute_id" = Uuid, Path, description = "Attribute ID")
    ),
    request_body = Vec<CreateOptionRequest>,
    responses(
        (status = 200, description = "Replace the whole option set", body = ApiResponse<OptionList>),
        (status = 400, description = "Attribute type does not support options"),
        (status = 404, description = "Attribute not found"),
    ),
    tag = "Attribute Options"
)]
pub async fn replace_options(
    State(state): State<AppState>,
    Path(attribute_id): Path<Uuid>,
    Json(payload): Json<Vec<CreateOptionRequest>>,
) -> AppResult<Json<ApiResponse<OptionList>>> {
    let response = option_service::replace_options(&state, attribute_id, payload).await?;
    Ok(Json(response))
}

#[utoipa::path(
    put,
    path = "/api/v1/attributes/{attribute_id}/options/reorder",
    params(
        ("attribute_id" = Uuid, Path, description = "Attribute ID")
    ),
    request_body = Vec<Uuid>,
    responses(
        (status = 200, description = "Reorder options", body = ApiResponse<OptionList>),
        (status = 400, description = "Foreign option or incomplete set"),
        (status = 404, description = "Attribute not found"),
    ),
    tag = "Attribute Options"
)]
pub async fn reorder_options(
    State(state): State<AppState>,
    Path(attribute_id): Path<Uuid>,
    Json(ordered_ids): Json<Vec<Uuid>>,
) -> AppResult<Json<ApiResponse<OptionList>>> {
    let response = option_service::reorder_options(&state, attribute_id, ordered_ids).await?;
    Ok(Json(response))
}

#[utoipa::path(
    get,
    path = "/api/v1/attributes/{attribute_id}/options/{option_id}",
    params(
        ("attribute_id" = Uuid, Path, description = "Attribute ID"),
        ("option_id" = Uuid, Path, description = "Option ID"),
    ),
    responses(
        (status = 200, description = "Get option", body = ApiResponse<AttributeOption>),
        (status = 404, description = "Option not found for this attribute"),
    ),
    tag = "Attribute Options"
)]
pub async fn get_option(
    State(state): State<AppState>,
    Path((attribute_id, option_id)): Path<(Uuid, Uuid)>,
) -> AppResult<Json<ApiResponse<AttributeOption>>> {
    let response = option_service::get_option(&state, attribute_id, option_id).await?;
    Ok(Json(response))
}

#[utoipa::path(
    put,
    path = "/api/v1/attributes/{attribute_id}/options/{option_id}",
    params(
        ("attribute_id" = Uuid, Path, description = "Attribute ID"),
        ("option_id" = Uuid, Path, description = "Option ID"),
    ),
    request_body = UpdateOptionRequest,
    responses(
        (status = 200, description = "Updated option", body = ApiResponse<AttributeOption>),
        (status = 404, description = "Option not found for this attribute"),
        (status = 409, description = "Duplicate option code"),
    ),
    tag = "Attribute Options"
)]
pub async fn update_option(
    State(state): State<AppState>,
    Path((attribute_id, option_id)): Path<(Uuid, Uuid)>,
    Json(payload): Json<UpdateOptionRequest>,
) -> AppResult<Json<ApiResponse<AttributeOption>>> {
    let response = option_service::update_option(&state, attribute_id, option_id, payload).await?;
    Ok(Json(response))
}

#[utoipa::path(
    delete,
    path = "/api/v1/attributes/{attribute_id}/options/{option_id}",
    params(
        ("attribute_id" = Uuid, Path, description = "Attribute ID"),
        ("option_id" = Uuid, Path, description = "Option ID"),
    ),
    responses(
        (status = 200, description = "Deleted option"),
        (status = 404, description = "Option not found for this attribute"),
    ),
    tag = "Attribute Options"
)]
pub async fn delete_option(
    State(state): State<AppState>,
    Path((attribute_id, option_id)): Path<(Uuid, Uuid)>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let response = option_service::delete_option(&state, attribute_id, option_id).await?;
    Ok(Json(response))
}
