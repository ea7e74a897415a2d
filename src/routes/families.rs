use axum::{
    Json, Router,
    extract::{Path, Query, State},
};
use uuid::Uuid;

use crate::{
    dto::families::{
        CreateFamilyRequest, CreateFamilyVariantRequest, FamilyList, FamilyVariantList,
        UpdateFamilyRequest, UpdateFamilyVariantRequest,
    },
    error::AppResult,
    models::{Family, FamilyVariant},
    response::ApiResponse,
    routes::params::FamilyQuery,
    services::family_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", axum::routing::post(create_family))
        .route("/", axum::routing::get(list_families))
        .route("/{id}", axum::routing::get(get_family))
        .route("/{id}", axum::routing::put(update_family))
        .route("/{id}", axum::routing::delete(delete_family))
        .route("/{family_id}/variants", axum::routing::post(create_variant))
        .route("/{family_id}/variants", axum::routing::get(list_variants))
        .route(
            "/{family_id}/variants/{variant_id}",
            axum::routing::get(get_variant),
        )
        .route(
            "/{family_id}/variants/{variant_id}",
            axum::routing::put(update_variant),
        )
        .route(
            "/{family_id}/variants/{variant_id}",
            axum::routing::delete(delete_variant),
        )
}

#[utoipa::path(
    post,
    path = "/api/v1/families",
    request_body = CreateFamilyRequest,
    responses(
        (status = 201, description = "Create family", body = ApiResponse<Family>),
        (status = 409, description = "Duplicate code"),
    ),
    tag = "Families"
)]
pub async fn create_family(
    State(state): State<AppState>,
    Json(payload): Json<CreateFamilyRequest>,
) -> AppResult<Json<ApiResponse<Family>>> {
    let response = family_service::create_family(&state, payload).await?;
    Ok(Json(response))
}

#[utoipa::path(
    get,
    path = "/api/v1/families",
    params(
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("size" = Option<i64>, Query, description = "Page size, default 20, max 100"),
        ("search" = Option<String>, Query, description = "Code substring"),
    ),
    responses(
        (status = 200, description = "List families", body = ApiResponse<FamilyList>)
    ),
    tag = "Families"
)]
pub async fn list_families(
    State(state): State<AppState>,
    Query(query): Query<FamilyQuery>,
) -> AppResult<Json<ApiResponse<FamilyList>>> {
    let response = family_service::list_families(&state, query).await?;
    Ok(Json(response))
}

#[utoipa::path(
    get,
    path = "/api/v1/families/{id}",
    params(
        ("id" = Uuid, Path, description = "Family ID")
    ),
    responses(
        (status = 200, description = "Get family", body = ApiResponse<Family>),
        (status = 404, description = "Family not found"),
    ),
    tag = "Families"
)]
pub async fn get_family(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Family>>> {
    let response = family_service::get_family(&state, id).await?;
    Ok(Json(response))
}

#[utoipa::path(
    put,
    path = "/api/v1/families/{id}",
    params(
        ("id" = Uuid, Path, description = "Family ID")
    ),
    request_body = UpdateFamilyRequest,
    responses(
        (status = 200, description = "Updated family", body = ApiResponse<Family>),
        (status = 404, description = "Family not found"),
        (status = 409, description = "Duplicate code"),
    ),
    tag = "Families"
)]
pub async fn update_family(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateFamilyRequest>,
) -> AppResult<Json<ApiResponse<Family>>> {
    let response = family_service::update_family(&state, id, payload).await?;
    Ok(Json(response))
}

#[utoipa::path(
    delete,
    path = "/api/v1/families/{id}",
    params(
        ("id" = Uuid, Path, description = "Family ID")
    ),
    responses(
        (status = 200, description = "Deleted family and its variants"),
        (status = 404, description = "Family not found"),
    ),
    tag = "Families"
)]
pub async fn delete_family(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let response = family_service::delete_family(&state, id).await?;
    Ok(Json(response))
}

#[utoipa::path(
    post,
    path = "/api/v1/families/{family_id}/variants",
    params(
        ("family_id" = Uuid, Path, description = "Family ID")
    ),
    request_body = CreateFamilyVariantRequest,
    responses(
        (status = 201, description = "Create family variant", body = ApiResponse<FamilyVariant>),
        (status = 404, description = "Family not found"),
        (status = 409, description = "Duplicate code"),
    ),
    tag = "Families"
)]
pub async fn create_variant(
    State(state): State<AppState>,
    Path(family_id): Path<Uuid>,
    Json(payload): Json<CreateFamilyVariantRequest>,
) -> AppResult<Json<ApiResponse<FamilyVariant>>> {
    let response = family_service::create_variant(&state, family_id, payload).await?;
    Ok(Json(response))
}

#[utoipa::path(
    get,
    path = "/api/v1/families/{family_id}/variants",
    params(
        ("family_id" = Uuid, Path, description = "Family ID")
    ),
    responses(
        (status = 200, description = "List family variants", body = ApiResponse<FamilyVariantList>),
        (status = 404, description = "Family not found"),
    ),
    tag = "Families"
)]
pub async fn list_variants(
    State(state): State<AppState>,
    Path(family_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<FamilyVariantList>>> {
    let response = family_service::list_variants(&state, family_id).await?;
    Ok(Json(response))
}

#[utoipa::path(
    get,
    path = "/api/v1/families/{family_id}/variants/{variant_id}",
    params(
        ("family_id" = Uuid, Path, description = "Family ID"),
        ("variant_id" = Uuid, Path, description = "Variant ID"),
    ),
    responses(
        (status = 200, description = "Get family variant", body = ApiResponse<FamilyVariant>),
        (status = 404, description = "Variant not found for this family"),
    ),
    tag = "Families"
)]
pub async fn get_variant(
    State(state): State<AppState>,
    Path((family_id, variant_id)): Path<(Uuid, Uuid)>,
) -> AppResult<Json<ApiResponse<FamilyVariant>>> {
    let response = family_service::get_variant(&state, family_id, variant_id).await?;
    Ok(Json(response))
}

#[utoipa::path(
    put,
    path = "/api/v1/families/{family_id}/variants/{variant_id}",
    params(
        ("family_id" = Uuid, Path, description = "Family ID"),
        ("variant_id" = Uuid, Path, description = "Variant ID"),
    ),
    request_body = UpdateFamilyVariantRequest,
    responses(
        (status = 200, description = "Updated family variant", body = ApiResponse<FamilyVariant>),
        (status = 404, description = "Variant not found for this family"),
        (status = 409, description = "Duplicate code"),
    ),
    tag = "Families"
)]
pub async fn update_variant(
    State(state): State<AppState>,
    Path((family_id, variant_id)): Path<(Uuid, Uuid)>,
    Json(payload): Json<UpdateFamilyVariantRequest>,
) -> AppResult<Json<ApiResponse<FamilyVariant>>> {
    let response =
        family_service::update_variant(&state, family_id, variant_id, payload).await?;
    Ok(Json(response))
}

#[utoipa::path(
    delete,
    path = "/api/v1/families/{family_id}/variants/{variant_id}",
    params(
        ("family_id" = Uuid, Path, description = "Family ID"),
        ("variant_id" = Uuid, Path, description = "Variant ID"),
    ),
    responses(
        (status = 200, description = "Deleted family variant"),
        (status = 404, description = "Variant not found for this family"),
    ),
    tag = "Families"
)]
pub async fn delete_variant(
    State(state): State<AppState>,
    Path((family_id, variant_id)): Path<(Uuid, Uuid)>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let response = family_service::delete_variant(&state, family_id, variant_id).await?;
    Ok(Json(response))
}
