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
    dto::products::{CreateProductRequest, ProductList, UpdateProductRequest},
    entity::{
        product_models::Entity as ProductModels,
        products::{ActiveModel as ProductActive, Column as ProductCol, Entity as Products, Model as ProductEntity},
    },
    error::{AppError, AppResult, map_unique_violation},
    models::{EntityRef, Product},
    response::{ApiResponse, Meta},
    routes::params::ProductQuery,
    services::value_service::purge_entity_values,
    state::AppState,
};

pub async fn create_product(
    state: &AppState,
    payload: CreateProductRequest,
) -> AppResult<ApiResponse<Product>> {
    let existing = Products::find()
        .filter(ProductCol::Sku.eq(payload.sku.clone()))
        .one(&state.orm)
        .await?;
    if existing.is_some() {
        return Err(AppError::DuplicateCode(payload.sku));
    }

    if let Some(product_model_id) = payload.product_model_id {
        let model = ProductModels::find_by_id(product_model_id)
            .one(&state.orm)
            .await?;
        if model.is_none() {
            return Err(AppError::NotFound("product model"));
        }
    }

    let product = ProductActive {
        id: Set(Uuid::new_v4()),
        sku: Set(payload.sku.clone()),
        product_model_id: Set(payload.product_model_id),
        enabled: Set(payload.enabled),
        created_at: NotSet,
        updated_at: NotSet,
    }
    .insert(&state.orm)
    .await
    .map_err(|err| map_unique_violation(err, AppError::DuplicateCode(payload.sku.clone())))?;

    if let Err(err) = log_audit(
        &state.pool,
        "product_create",
        Some("products"),
        Some(serde_json::json!({ "product_id": product.id, "sku": product.sku })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Product created",
        product_from_entity(product),
        Some(Meta::empty()),
    ))
}

pub async fn list_products(
    state: &AppState,
    query: ProductQuery,
) -> AppResult<ApiResponse<ProductList>> {
    let (page, size, offset) = query.pagination.normalize();
    let mut condition = Condition::all();

    if let Some(search) = query.search.as_ref().filter(|s| !s.is_empty()) {
        let pattern = format!("%{}%", search);
        condition = condition.add(Expr::col(ProductCol::Sku).ilike(pattern));
    }
    if let Some(product_model_id) = query.product_model_id {
        condition = condition.add(ProductCol::ProductModelId.eq(product_model_id));
    }
    if let Some(enabled) = query.enabled {
        condition = condition.add(ProductCol::Enabled.eq(enabled));
    }

    let finder = Products::find()
        .filter(condition)
        .order_by_desc(ProductCol::CreatedAt);

    let total = finder.clone().count(&state.orm).await? as i64;

    let items = finder
        .limit(size as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(product_from_entity)
        .collect();

    let meta = Meta::new(page, size, total);
    Ok(ApiResponse::success(
        "Products",
        ProductList { items },
        Some(meta),
    ))
}

pub async fn get_product(state: &AppState, id: Uuid) -> AppResult<ApiResponse<Product>> {
    let product = Products::find_by_id(id).one(&state.orm).await?;
    let product = match product {
        Some(p) => p,
        None => return Err(AppError::NotFound("product")),
    };
    Ok(ApiResponse::success("Product", product_from_entity(product), None))
}

pub async fn update_product(
    state: &AppState,
    id: Uuid,
    payload: UpdateProductRequest,
) -> AppResult<ApiResponse<Product>> {
    let existing = Products::find_by_id(id).one(&state.orm).await?;
    let existing = match existing {
        Some(p) => p,
        None => return Err(AppError::NotFound("product")),
    };

    if let Some(sku) = payload.sku.as_ref().filter(|s| **s != existing.sku) {
        let collision = Products::find()
            .filter(ProductCol::Sku.eq(sku.clone()))
            .filter(ProductCol::Id.ne(id))
            .one(&state.orm)
            .await?;
        if collision.is_some() {
            return Err(AppError::DuplicateCode(sku.clone()));
        }
    }

    if let Some(product_model_id) = payload.product_model_id {
        let model = ProductModels::find_by_id(product_model_id)
            .one(&state.orm)
            .await?;
        if model.is_none() {
            return Err(AppError::NotFound("product model"));
        }
    }

    let conflict_code = payload.sku.clone().unwrap_or_else(|| existing.sku.clone());

    let mut active: ProductActive = existing.into();
    if let Some(sku) = payload.sku {
        active.sku = Set(sku);
    }
    if let Some(product_model_id) = payload.product_model_id {
        active.product_model_id = Set(Some(product_model_id));
    }
    if let Some(enabled) = payload.enabled {
        active.enabled = Set(enabled);
    }
    active.updated_at = Set(Utc::now().into());

    let product = active
        .update(&state.orm)
        .await
        .map_err(|err| map_unique_violation(err, AppError::DuplicateCode(conflict_code)))?;

    if let Err(err) = log_audit(
        &state.pool,
        "product_update",
        Some("products"),
        Some(serde_json::json!({ "product_id": product.id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Updated",
        product_from_entity(product),
        Some(Meta::empty()),
    ))
}

pub async fn delete_product(
    state: &AppState,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let txn = state.orm.begin().await?;

    let result = Products::delete_by_id(id).exec(&txn).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound("product"));
    }

    // The untyped entity reference cannot cascade; purge values here.
    purge_entity_values(&txn, EntityRef::Product(id)).await?;

    txn.commit().await?;

    if let Err(err) = log_audit(
        &state.pool,
        "product_delete",
        Some("products"),
        Some(serde_json::json!({ "product_id": id })),
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

fn product_from_entity(model: ProductEntity) -> Product {
    Product {
        id: model.id,
        sku: model.sku,
        product_model_id: model.product_model_id,
        enabled: model.enabled,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    }
}
