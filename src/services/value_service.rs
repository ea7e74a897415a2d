use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use sea_orm::ActiveValue::NotSet;
use uuid::Uuid;

use crate::{
    audit::log_audit,
    dto::values::{SetValueRequest, ValueList, ValueQuery},
    entity::{
        attributes::Entity as Attributes,
        product_models::Entity as ProductModels,
        product_values::{
            ActiveModel as ValueActive, Column as ValueCol, Entity as ProductValues,
            Model as ValueModel,
        },
        products::Entity as Products,
    },
    error::{AppError, AppResult},
    models::{EntityRef, ProductValue},
    response::{ApiResponse, Meta},
    state::AppState,
};

/// Upsert keyed by (entity_type, entity_id, attribute_id, scope, locale).
pub async fn set_value(
    state: &AppState,
    payload: SetValueRequest,
) -> AppResult<ApiResponse<ProductValue>> {
    let attribute = Attributes::find_by_id(payload.attribute_id)
        .one(&state.orm)
        .await?;
    let attribute = match attribute {
        Some(a) => a,
        None => return Err(AppError::NotFound("attribute")),
    };

    if payload.locale.is_some() && !attribute.is_localizable {
        return Err(AppError::Validation(format!(
            "attribute '{}' is not localizable",
            attribute.code
        )));
    }
    if payload.scope.is_some() && !attribute.is_scopable {
        return Err(AppError::Validation(format!(
            "attribute '{}' is not scopable",
            attribute.code
        )));
    }
    if let Some(value) = payload.value.as_ref() {
        if !attribute.backend_type.accepts_value(value) {
            return Err(AppError::Validation(format!(
                "value does not match backend type '{}'",
                attribute.backend_type
            )));
        }
    }

    let entity = EntityRef::new(payload.entity_type, payload.entity_id);
    ensure_entity_exists(state, entity).await?;

    let txn = state.orm.begin().await?;

    let existing = ProductValues::find()
        .filter(key_condition(
            entity,
            payload.attribute_id,
            &payload.scope,
            &payload.locale,
        ))
        .one(&txn)
        .await?;

    let value = match existing {
        Some(row) => {
            let mut active: ValueActive = row.into();
            active.value = Set(payload.value);
            active.updated_at = Set(Utc::now().into());
            active.update(&txn).await?
        }
        None => ValueActive {
            id: Set(Uuid::new_v4()),
            entity_type: Set(payload.entity_type),
            entity_id: Set(payload.entity_id),
            attribute_id: Set(payload.attribute_id),
            scope: Set(payload.scope),
            locale: Set(payload.locale),
            value: Set(payload.value),
            created_at: NotSet,
            updated_at: NotSet,
        }
        .insert(&txn)
        .await?,
    };

    txn.commit().await?;

    if let Err(err) = log_audit(
        &state.pool,
        "value_set",
        Some("product_values"),
        Some(serde_json::json!({ "value_id": value.id, "attribute_id": value.attribute_id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Value set",
        value_from_entity(value),
        Some(Meta::empty()),
    ))
}

/// All values of one entity; no implicit locale fallback.
pub async fn get_values(
    state: &AppState,
    entity: EntityRef,
    query: ValueQuery,
) -> AppResult<ApiResponse<ValueList>> {
    let mut condition = Condition::all()
        .add(ValueCol::EntityType.eq(entity.entity_type()))
        .add(ValueCol::EntityId.eq(entity.id()));

    if let Some(attribute_id) = query.attribute_id {
        condition = condition.add(ValueCol::AttributeId.eq(attribute_id));
    }
    if let Some(scope) = query.scope.as_ref().filter(|s| !s.is_empty()) {
        condition = condition.add(ValueCol::Scope.eq(scope.clone()));
    }
    if let Some(locale) = query.locale.as_ref().filter(|s| !s.is_empty()) {
        condition = condition.add(ValueCol::Locale.eq(locale.clone()));
    }

    let items = ProductValues::find()
        .filter(condition)
        .order_by_asc(ValueCol::CreatedAt)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(value_from_entity)
        .collect();

    Ok(ApiResponse::success("Values", ValueList { items }, None))
}

pub async fn delete_value(state: &AppState, id: Uuid) -> AppResult<ApiResponse<serde_json::Value>> {
    let result = ProductValues::delete_by_id(id).exec(&state.orm).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound("product value"));
    }

    if let Err(err) = log_audit(
        &state.pool,
        "value_delete",
        Some("product_values"),
        Some(serde_json::json!({ "value_id": id })),
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

/// Entity deletion cannot cascade through the untyped reference, so the
/// owning service calls this cleanup explicitly.
pub async fn delete_entity_values(
    state: &AppState,
    entity: EntityRef,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let deleted = purge_entity_values(&state.orm, entity).await?;

    if let Err(err) = log_audit(
        &state.pool,
        "entity_values_delete",
        Some("product_values"),
        Some(serde_json::json!({
            "entity_type": entity.entity_type(),
            "entity_id": entity.id(),
            "deleted": deleted,
        })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Deleted",
        serde_json::json!({ "deleted": deleted }),
        Some(Meta::empty()),
    ))
}

pub(crate) async fn purge_entity_values<C: sea_orm::ConnectionTrait>(
    conn: &C,
    entity: EntityRef,
) -> AppResult<u64> {
    let result = ProductValues::delete_many()
        .filter(ValueCol::EntityType.eq(entity.entity_type()))
        .filter(ValueCol::EntityId.eq(entity.id()))
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}

async fn ensure_entity_exists(state: &AppState, entity: EntityRef) -> AppResult<()> {
    match entity {
        EntityRef::Product(id) => {
            if Products::find_by_id(id).one(&state.orm).await?.is_none() {
                return Err(AppError::NotFound("product"));
            }
        }
        EntityRef::ProductModel(id) => {
            if ProductModels::find_by_id(id).one(&state.orm).await?.is_none() {
                return Err(AppError::NotFound("product model"));
            }
        }
    }
    Ok(())
}

fn key_condition(
    entity: EntityRef,
    attribute_id: Uuid,
    scope: &Option<String>,
    locale: &Option<String>,
) -> Condition {
    let mut condition = Condition::all()
        .add(ValueCol::EntityType.eq(entity.entity_type()))
        .add(ValueCol::EntityId.eq(entity.id()))
        .add(ValueCol::AttributeId.eq(attribute_id));
    condition = match scope {
        Some(scope) => condition.add(ValueCol::Scope.eq(scope.clone())),
        None => condition.add(ValueCol::Scope.is_null()),
    };
    match locale {
        Some(locale) => condition.add(ValueCol::Locale.eq(locale.clone())),
        None => condition.add(ValueCol::Locale.is_null()),
    }
}

fn value_from_entity(model: ValueModel) -> ProductValue {
    ProductValue {
        id: model.id,
        entity_type: model.entity_type,
        entity_id: model.entity_id,
        attribute_id: model.attribute_id,
        scope: model.scope,
        locale: model.locale,
        value: model.value,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    }
}
