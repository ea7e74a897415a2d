use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};
use sea_orm::ActiveValue::NotSet;
use uuid::Uuid;

use crate::{
    audit::log_audit,
    dto::product_models::{CreateProductModelRequest, ProductModelList, UpdateProductModelRequest},
    entity::product_models::{
        ActiveModel as ModelActive, Column as ModelCol, Entity as ProductModels,
        Model as ProductModelEntity,
    },
    error::{AppError, AppResult, map_unique_violation},
    models::{EntityRef, ProductModel},
    response::{ApiResponse, Meta},
    routes::params::{Pagination, ProductModelQuery},
    services::value_service::purge_entity_values,
    state::AppState,
};

pub async fn create_product_model(
    state: &AppState,
    payload: CreateProductModelRequest,
) -> AppResult<ApiResponse<ProductModel>> {
    let existing = ProductModels::find()
        .filter(ModelCol::Code.eq(payload.code.clone()))
        .one(&state.orm)
        .await?;
    if existing.is_some() {
        return Err(AppError::DuplicateCode(payload.code));
    }

    let conflict_code = payload.sku.clone().unwrap_or_else(|| payload.code.clone());
    let model = ModelActive {
        id: Set(Uuid::new_v4()),
        code: Set(payload.code.clone()),
        title: Set(payload.title),
        sku: Set(payload.sku),
        family_variant_id: Set(payload.family_variant_id),
        parent_id: Set(payload.parent_id),
        category_ids: Set(payload.category_ids),
        created_at: NotSet,
        updated_at: NotSet,
    }
    .insert(&state.orm)
    .await
    .map_err(|err| map_unique_violation(err, AppError::DuplicateCode(conflict_code)))?;

    if let Err(err) = log_audit(
        &state.pool,
        "product_model_create",
        Some("product_models"),
        Some(serde_json::json!({ "product_model_id": model.id, "code": model.code })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Product model created",
        product_model_from_entity(model),
        Some(Meta::empty()),
    ))
}

pub async fn list_product_models(
    state: &AppState,
    query: ProductModelQuery,
) -> AppResult<ApiResponse<ProductModelList>> {
    let (page, size, offset) = query.pagination.normalize();
    let mut condition = Condition::all();

    if let Some(search) = query.search.as_ref().filter(|s| !s.is_empty()) {
        let pattern = format!("%{}%", search);
        condition = condition.add(Expr::col(ModelCol::Code).ilike(pattern));
    }
    if let Some(family_variant_id) = query.family_variant_id {
        condition = condition.add(ModelCol::FamilyVariantId.eq(family_variant_id));
    }
    if let Some(parent_id) = query.parent_id {
        condition = condition.add(ModelCol::ParentId.eq(parent_id));
    }

    let finder = ProductModels::find()
        .filter(condition)
        .order_by_desc(ModelCol::CreatedAt);

    let total = finder.clone().count(&state.orm).await? as i64;

    let items = finder
        .limit(size as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(product_model_from_entity)
        .collect();

    let meta = Meta::new(page, size, total);
    Ok(ApiResponse::success(
        "Product models",
        ProductModelList { items },
        Some(meta),
    ))
}

pub async fn get_product_model(state: &AppState, id: Uuid) -> AppResult<ApiResponse<ProductModel>> {
    let model = ProductModels::find_by_id(id).one(&state.orm).await?;
    let model = match model {
        Some(m) => m,
        None => return Err(AppError::NotFound("product model")),
    };
    Ok(ApiResponse::success(
        "Product model",
        product_model_from_entity(model),
        None,
    ))
}

pub async fn update_product_model(
    state: &AppState,
    id: Uuid,
    payload: UpdateProductModelRequest,
) -> AppResult<ApiResponse<ProductModel>> {
    let existing = ProductModels::find_by_id(id).one(&state.orm).await?;
    let existing = match existing {
        Some(m) => m,
        None => return Err(AppError::NotFound("product model")),
    };

    if let Some(code) = payload.code.as_ref().filter(|c| **c != existing.code) {
        let collision = ProductModels::find()
            .filter(ModelCol::Code.eq(code.clone()))
            .filter(ModelCol::Id.ne(id))
            .one(&state.orm)
            .await?;
        if collision.is_some() {
            return Err(AppError::DuplicateCode(code.clone()));
        }
    }

    let conflict_code = payload
        .sku
        .clone()
        .or_else(|| payload.code.clone())
        .unwrap_or_else(|| existing.code.clone());

    let mut active: ModelActive = existing.into();
    if let Some(code) = payload.code {
        active.code = Set(code);
    }
    if let Some(title) = payload.title {
        active.title = Set(title);
    }
    if let Some(sku) = payload.sku {
        active.sku = Set(Some(sku));
    }
    if let Some(family_variant_id) = payload.family_variant_id {
        active.family_variant_id = Set(Some(family_variant_id));
    }
    if let Some(parent_id) = payload.parent_id {
        active.parent_id = Set(Some(parent_id));
    }
    if let Some(category_ids) = payload.category_ids {
        active.category_ids = Set(category_ids);
    }
    active.updated_at = Set(Utc::now().into());

    let model = active
        .update(&state.orm)
        .await
        .map_err(|err| map_unique_violation(err, AppError::DuplicateCode(conflict_code)))?;

    if let Err(err) = log_audit(
        &state.pool,
        "product_model_update",
        Some("product_models"),
        Some(serde_json::json!({ "product_model_id": model.id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Updated",
        product_model_from_entity(model),
        Some(Meta::empty()),
    ))
}

pub async fn delete_product_model(
    state: &AppState,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let txn = state.orm.begin().await?;

    let result = ProductModels::delete_by_id(id).exec(&txn).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound("product model"));
    }

    // The untyped entity reference cannot cascade; purge values here.
    purge_entity_values(&txn, EntityRef::ProductModel(id)).await?;

    txn.commit().await?;

    if let Err(err) = log_audit(
        &state.pool,
        "product_model_delete",
        Some("product_models"),
        Some(serde_json::json!({ "product_model_id": id })),
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

/// Direct children only, not a subtree walk.
pub async fn get_children(
    state: &AppState,
    id: Uuid,
    pagination: Pagination,
) -> AppResult<ApiResponse<ProductModelList>> {
    let parent = ProductModels::find_by_id(id).one(&state.orm).await?;
    if parent.is_none() {
        return Err(AppError::NotFound("product model"));
    }

    let (page, size, offset) = pagination.normalize();
    let finder = ProductModels::find()
        .filter(ModelCol::ParentId.eq(id))
        .order_by_desc(ModelCol::CreatedAt);

    let total = finder.clone().count(&state.orm).await? as i64;

    let items = finder
        .limit(size as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(product_model_from_entity)
        .collect();

    let meta = Meta::new(page, size, total);
    Ok(ApiResponse::success(
        "Children",
        ProductModelList { items },
        Some(meta),
    ))
}

fn product_model_from_entity(model: ProductModelEntity) -> ProductModel {
    ProductModel {
        id: model.id,
        code: model.code,
        title: model.title,
        sku: model.sku,
        family_variant_id: model.family_variant_id,
        parent_id: model.parent_id,
        category_ids: model.category_ids,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    }
}
