use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use sea_orm::ActiveValue::NotSet;
use uuid::Uuid;

use crate::{
    audit::log_audit,
    dto::families::{
        CreateFamilyRequest, CreateFamilyVariantRequest, FamilyList, FamilyVariantList,
        UpdateFamilyRequest, UpdateFamilyVariantRequest,
    },
    entity::{
        families::{ActiveModel as FamilyActive, Column as FamilyCol, Entity as Families, Model as FamilyModel},
        family_variants::{
            ActiveModel as VariantActive, Column as VariantCol, Entity as FamilyVariants,
            Model as VariantModel,
        },
    },
    error::{AppError, AppResult, map_unique_violation},
    models::{Family, FamilyVariant},
    response::{ApiResponse, Meta},
    routes::params::FamilyQuery,
    state::AppState,
};

pub async fn create_family(
    state: &AppState,
    payload: CreateFamilyRequest,
) -> AppResult<ApiResponse<Family>> {
    let existing = Families::find()
        .filter(FamilyCol::Code.eq(payload.code.clone()))
        .one(&state.orm)
        .await?;
    if existing.is_some() {
        return Err(AppError::DuplicateCode(payload.code));
    }

    let family = FamilyActive {
        id: Set(Uuid::new_v4()),
        code: Set(payload.code.clone()),
        attribute_ids: Set(payload.attribute_ids),
        created_at: NotSet,
        updated_at: NotSet,
    }
    .insert(&state.orm)
    .await
    .map_err(|err| map_unique_violation(err, AppError::DuplicateCode(payload.code.clone())))?;

    if let Err(err) = log_audit(
        &state.pool,
        "family_create",
        Some("families"),
        Some(serde_json::json!({ "family_id": family.id, "code": family.code })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Family created",
        family_from_entity(family),
        Some(Meta::empty()),
    ))
}

pub async fn list_families(
    state: &AppState,
    query: FamilyQuery,
) -> AppResult<ApiResponse<FamilyList>> {
    let (page, size, offset) = query.pagination.normalize();
    let mut condition = Condition::all();

    if let Some(search) = query.search.as_ref().filter(|s| !s.is_empty()) {
        let pattern = format!("%{}%", search);
        condition = condition.add(Expr::col(FamilyCol::Code).ilike(pattern));
    }

    let finder = Families::find()
        .filter(condition)
        .order_by_desc(FamilyCol::CreatedAt);

    let total = finder.clone().count(&state.orm).await? as i64;

    let items = finder
        .limit(size as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(family_from_entity)
        .collect();

    let meta = Meta::new(page, size, total);
    Ok(ApiResponse::success("Families", FamilyList { items }, Some(meta)))
}

pub async fn get_family(state: &AppState, id: Uuid) -> AppResult<ApiResponse<Family>> {
    let family = find_family(state, id).await?;
    Ok(ApiResponse::success("Family", family_from_entity(family), None))
}

pub async fn update_family(
    state: &AppState,
    id: Uuid,
    payload: UpdateFamilyRequest,
) -> AppResult<ApiResponse<Family>> {
    let existing = find_family(state, id).await?;

    if let Some(code) = payload.code.as_ref().filter(|c| **c != existing.code) {
        let collision = Families::find()
            .filter(FamilyCol::Code.eq(code.clone()))
            .filter(FamilyCol::Id.ne(id))
            .one(&state.orm)
            .await?;
        if collision.is_some() {
            return Err(AppError::DuplicateCode(code.clone()));
        }
    }

    let conflict_code = payload.code.clone().unwrap_or_else(|| existing.code.clone());

    let mut active: FamilyActive = existing.into();
    if let Some(code) = payload.code {
        active.code = Set(code);
    }
    if let Some(attribute_ids) = payload.attribute_ids {
        active.attribute_ids = Set(attribute_ids);
    }
    active.updated_at = Set(Utc::now().into());

    let family = active
        .update(&state.orm)
        .await
        .map_err(|err| map_unique_violation(err, AppError::DuplicateCode(conflict_code)))?;

    if let Err(err) = log_audit(
        &state.pool,
        "family_update",
        Some("families"),
        Some(serde_json::json!({ "family_id": family.id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Updated",
        family_from_entity(family),
        Some(Meta::empty()),
    ))
}

pub async fn delete_family(state: &AppState, id: Uuid) -> AppResult<ApiResponse<serde_json::Value>> {
    // Variants go with the family via FK cascade.
    let result = Families::delete_by_id(id).exec(&state.orm).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound("family"));
    }

    if let Err(err) = log_audit(
        &state.pool,
        "family_delete",
        Some("families"),
        Some(serde_json::json!({ "family_id": id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

pub async fn create_variant(
    state: &AppState,
    family_id: Uuid,
    payload: CreateFamilyVariantRequest,
) -> AppResult<ApiResponse<FamilyVariant>> {
    find_family(state, family_id).await?;

    let existing = FamilyVariants::find()
        .filter(VariantCol::Code.eq(payload.code.clone()))
        .one(&state.orm)
        .await?;
    if existing.is_some() {
        return Err(AppError::DuplicateCode(payload.code));
    }

    let variant = VariantActive {
        id: Set(Uuid::new_v4()),
        family_id: Set(family_id),
        code: Set(payload.code.clone()),
        level: Set(payload.level),
        axes: Set(payload.axes),
        attributes: Set(payload.attributes),
        created_at: NotSet,
        updated_at: NotSet,
    }
    .insert(&state.orm)
    .await
    .map_err(|err| map_unique_violation(err, AppError::DuplicateCode(payload.code.clone())))?;

    if let Err(err) = log_audit(
        &state.pool,
        "family_variant_create",
        Some("family_variants"),
        Some(serde_json::json!({ "family_id": family_id, "variant_id": variant.id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Family variant created",
        variant_from_entity(variant),
        Some(Meta::empty()),
    ))
}

pub async fn list_variants(
    state: &AppState,
    family_id: Uuid,
) -> AppResult<ApiResponse<FamilyVariantList>> {
    find_family(state, family_id).await?;

    let items = FamilyVariants::find()
        .filter(VariantCol::FamilyId.eq(family_id))
        .order_by_desc(VariantCol::CreatedAt)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(variant_from_entity)
        .collect();

    Ok(ApiResponse::success(
        "Family variants",
        FamilyVariantList { items },
        None,
    ))
}

pub async fn get_variant(
    state: &AppState,
    family_id: Uuid,
    variant_id: Uuid,
) -> AppResult<ApiResponse<FamilyVariant>> {
    let variant = find_variant(state, family_id, variant_id).await?;
    Ok(ApiResponse::success(
        "Family variant",
        variant_from_entity(variant),
        None,
    ))
}

pub async fn update_variant(
    state: &AppState,
    family_id: Uuid,
    variant_id: Uuid,
    payload: UpdateFamilyVariantRequest,
) -> AppResult<ApiResponse<FamilyVariant>> {
    let existing = find_variant(state, family_id, variant_id).await?;

    if let Some(code) = payload.code.as_ref().filter(|c| **c != existing.code) {
        let collision = FamilyVariants::find()
            .filter(VariantCol::Code.eq(code.clone()))
            .filter(VariantCol::Id.ne(variant_id))
            .one(&state.orm)
            .await?;
        if collision.is_some() {
            return Err(AppError::DuplicateCode(code.clone()));
        }
    }

    let conflict_code = payload.code.clone().unwrap_or_else(|| existing.code.clone());

    let mut active: VariantActive = existing.into();
    if let Some(code) = payload.code {
        active.code = Set(code);
    }
    if let Some(level) = payload.level {
        active.level = Set(Some(level));
    }
    if let Some(axes) = payload.axes {
        active.axes = Set(axes);
    }
    if let Some(attributes) = payload.attributes {
        active.attributes = Set(attributes);
    }
    active.updated_at = Set(Utc::now().into());

    let variant = active
        .update(&state.orm)
        .await
        .map_err(|err| map_unique_violation(err, AppError::DuplicateCode(conflict_code)))?;

    if let Err(err) = log_audit(
        &state.pool,
        "family_variant_update",
        Some("family_variants"),
        Some(serde_json::json!({ "family_id": family_id, "variant_id": variant.id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Updated",
        variant_from_entity(variant),
        Some(Meta::empty()),
    ))
}

pub async fn delete_variant(
    state: &AppState,
    family_id: Uuid,
    variant_id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let result = FamilyVariants::delete_many()
        .filter(VariantCol::Id.eq(variant_id))
        .filter(VariantCol::FamilyId.eq(family_id))
        .exec(&state.orm)
        .await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound("family variant"));
    }

    if let Err(err) = log_audit(
        &state.pool,
        "family_variant_delete",
        Some("family_variants"),
        Some(serde_json::json!({ "family_id": family_id, "variant_id": variant_id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

async fn find_family(state: &AppState, id: Uuid) -> AppResult<FamilyModel> {
    let family = Families::find_by_id(id).one(&state.orm).await?;
    match family {
        Some(f) => Ok(f),
        None => Err(AppError::NotFound("family")),
    }
}

async fn find_variant(
    state: &AppState,
    family_id: Uuid,
    variant_id: Uuid,
) -> AppResult<VariantModel> {
    let variant = FamilyVariants::find_by_id(variant_id)
        .filter(VariantCol::FamilyId.eq(family_id))
        .one(&state.orm)
        .await?;
    match variant {
        Some(v) => Ok(v),
        None => Err(AppError::NotFound("family variant")),
    }
}

fn family_from_entity(model: FamilyModel) -> Family {
    Family {
        id: model.id,
        code: model.code,
        attribute_ids: model.attribute_ids,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    }
}

fn variant_from_entity(model: VariantModel) -> FamilyVariant {
    FamilyVariant {
        id: model.id,
        family_id: model.family_id,
        code: model.code,
        level: model.level,
        axes: model.axes,
        attributes: model.attributes,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    }
}
