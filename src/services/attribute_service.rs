use std::collections::{HashMap, HashSet};

use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use sea_orm::ActiveValue::NotSet;
use uuid::Uuid;

use crate::{
    audit::log_audit,
    dto::attributes::{AttributeList, CreateAttributeRequest, CreateOptionRequest, UpdateAttributeRequest},
    entity::{
        attribute_options::{
            ActiveModel as OptionActive, Column as OptionCol, Entity as AttributeOptions,
            Model as OptionModel,
        },
        attributes::{ActiveModel as AttributeActive, Column as AttrCol, Entity as Attributes, Model as AttributeModel},
    },
    enums::{AttributeType, BackendType},
    error::{AppError, AppResult, map_unique_violation},
    models::{Attribute, AttributeOption},
    response::{ApiResponse, Meta},
    routes::params::AttributeQuery,
    state::AppState,
};

pub async fn create_attribute(
    state: &AppState,
    payload: CreateAttributeRequest,
) -> AppResult<ApiResponse<Attribute>> {
    check_compatibility(payload.kind, payload.backend_type)?;
    if !payload.options.is_empty() && !payload.kind.supports_options() {
        return Err(AppError::Validation(format!(
            "attribute type '{}' does not accept options",
            payload.kind
        )));
    }
    check_duplicate_option_codes(&payload.options)?;

    let txn = state.orm.begin().await?;

    let existing = Attributes::find()
        .filter(AttrCol::Code.eq(payload.code.clone()))
        .one(&txn)
        .await?;
    if existing.is_some() {
        return Err(AppError::DuplicateCode(payload.code));
    }

    let attribute = AttributeActive {
        id: Set(Uuid::new_v4()),
        code: Set(payload.code.clone()),
        kind: Set(payload.kind),
        backend_type: Set(payload.backend_type),
        is_localizable: Set(payload.is_localizable),
        is_scopable: Set(payload.is_scopable),
        group_code: Set(payload.group_code),
        labels: Set(payload.labels),
        config: Set(payload.config),
        created_at: NotSet,
        updated_at: NotSet,
    }
    .insert(&txn)
    .await
    .map_err(|err| map_unique_violation(err, AppError::DuplicateCode(payload.code.clone())))?;

    let options = insert_options(&txn, attribute.id, &payload.options).await?;

    txn.commit().await?;

    if let Err(err) = log_audit(
        &state.pool,
        "attribute_create",
        Some("attributes"),
        Some(serde_json::json!({ "attribute_id": attribute.id, "code": attribute.code })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Attribute created",
        attribute_from_entity(attribute, options),
        Some(Meta::empty()),
    ))
}

pub async fn get_attribute(state: &AppState, id: Uuid) -> AppResult<ApiResponse<Attribute>> {
    let attribute = Attributes::find_by_id(id).one(&state.orm).await?;
    let attribute = match attribute {
        Some(a) => a,
        None => return Err(AppError::NotFound("attribute")),
    };

    let options = load_options(&state.orm, attribute.id).await?;
    Ok(ApiResponse::success(
        "Attribute",
        attribute_from_entity(attribute, options),
        None,
    ))
}

pub async fn list_attributes(
    state: &AppState,
    query: AttributeQuery,
) -> AppResult<ApiResponse<AttributeList>> {
    let (page, size, offset) = query.pagination.normalize();
    let mut condition = Condition::all();

    if let Some(search) = query.search.as_ref().filter(|s| !s.is_empty()) {
        let pattern = format!("%{}%", search);
        condition = condition.add(
            Condition::any()
                .add(Expr::col(AttrCol::Code).ilike(pattern.clone()))
                .add(Expr::cust_with_values("CAST(labels AS TEXT) ILIKE ?", [pattern])),
        );
    }
    if let Some(kind) = query.kind {
        condition = condition.add(AttrCol::Kind.eq(kind));
    }
    if let Some(backend_type) = query.backend_type {
        condition = condition.add(AttrCol::BackendType.eq(backend_type));
    }
    if let Some(group_code) = query.group_code.as_ref().filter(|s| !s.is_empty()) {
        condition = condition.add(AttrCol::GroupCode.eq(group_code.clone()));
    }
    if let Some(is_localizable) = query.is_localizable {
        condition = condition.add(AttrCol::IsLocalizable.eq(is_localizable));
    }
    if let Some(is_scopable) = query.is_scopable {
        condition = condition.add(AttrCol::IsScopable.eq(is_scopable));
    }

    let finder = Attributes::find()
        .filter(condition)
        .order_by_desc(AttrCol::CreatedAt);

    let total = finder.clone().count(&state.orm).await? as i64;

    let attributes = finder
        .limit(size as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?;

    let ids: Vec<Uuid> = attributes.iter().map(|a| a.id).collect();
    let mut grouped: HashMap<Uuid, Vec<OptionModel>> = HashMap::new();
    if !ids.is_empty() {
        for option in AttributeOptions::find()
            .filter(OptionCol::AttributeId.is_in(ids))
            .all(&state.orm)
            .await?
        {
            grouped.entry(option.attribute_id).or_default().push(option);
        }
    }

    let items = attributes
        .into_iter()
        .map(|attribute| {
            let mut options = grouped.remove(&attribute.id).unwrap_or_default();
            sort_options(&mut options);
            attribute_from_entity(attribute, options)
        })
        .collect();

    let meta = Meta::new(page, size, total);
    Ok(ApiResponse::success(
        "Attributes",
        AttributeList { items },
        Some(meta),
    ))
}

pub async fn update_attribute(
    state: &AppState,
    id: Uuid,
    payload: UpdateAttributeRequest,
) -> AppResult<ApiResponse<Attribute>> {
    let txn = state.orm.begin().await?;

    let existing = Attributes::find_by_id(id).one(&txn).await?;
    let existing = match existing {
        Some(a) => a,
        None => return Err(AppError::NotFound("attribute")),
    };

    if let Some(code) = payload.code.as_ref().filter(|c| **c != existing.code) {
        let collision = Attributes::find()
            .filter(AttrCol::Code.eq(code.clone()))
            .filter(AttrCol::Id.ne(id))
            .one(&txn)
            .await?;
        if collision.is_some() {
            return Err(AppError::DuplicateCode(code.clone()));
        }
    }

    let kind = payload.kind.unwrap_or(existing.kind);
    let backend_type = payload.backend_type.unwrap_or(existing.backend_type);
    check_compatibility(kind, backend_type)?;

    let code_for_conflict = payload.code.clone().unwrap_or_else(|| existing.code.clone());

    let mut active: AttributeActive = existing.into();
    if let Some(code) = payload.code {
        active.code = Set(code);
    }
    if let Some(kind) = payload.kind {
        active.kind = Set(kind);
    }
    if let Some(backend_type) = payload.backend_type {
        active.backend_type = Set(backend_type);
    }
    if let Some(is_localizable) = payload.is_localizable {
        active.is_localizable = Set(is_localizable);
    }
    if let Some(is_scopable) = payload.is_scopable {
        active.is_scopable = Set(is_scopable);
    }
    if let Some(group_code) = payload.group_code {
        active.group_code = Set(Some(group_code));
    }
    if let Some(labels) = payload.labels {
        active.labels = Set(Some(labels));
    }
    if let Some(config) = payload.config {
        active.config = Set(Some(config));
    }
    active.updated_at = Set(Utc::now().into());

    let attribute = active
        .update(&txn)
        .await
        .map_err(|err| map_unique_violation(err, AppError::DuplicateCode(code_for_conflict)))?;

    // A supplied option set replaces the existing one wholesale.
    let options = match payload.options {
        Some(new_set) => {
            if !attribute.kind.supports_options() {
                return Err(AppError::WrongAttributeType(attribute.kind));
            }
            check_duplicate_option_codes(&new_set)?;
            AttributeOptions::delete_many()
                .filter(OptionCol::AttributeId.eq(attribute.id))
                .exec(&txn)
                .await?;
            insert_options(&txn, attribute.id, &new_set).await?
        }
        None => load_options(&txn, attribute.id).await?,
    };

    txn.commit().await?;

    if let Err(err) = log_audit(
        &state.pool,
        "attribute_update",
        Some("attributes"),
        Some(serde_json::json!({ "attribute_id": attribute.id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Updated",
        attribute_from_entity(attribute, options),
        Some(Meta::empty()),
    ))
}

pub async fn delete_attribute(state: &AppState, id: Uuid) -> AppResult<ApiResponse<serde_json::Value>> {
    // Options and product values go with the attribute via FK cascade.
    let result = Attributes::delete_by_id(id).exec(&state.orm).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound("attribute"));
    }

    if let Err(err) = log_audit(
        &state.pool,
        "attribute_delete",
        Some("attributes"),
        Some(serde_json::json!({ "attribute_id": id })),
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

fn check_compatibility(kind: AttributeType, backend_type: BackendType) -> AppResult<()> {
    if !kind.accepts_backend(backend_type) {
        return Err(AppError::Validation(format!(
            "backend type '{}' is not compatible with attribute type '{}'",
            backend_type, kind
        )));
    }
    Ok(())
}

fn check_duplicate_option_codes(options: &[CreateOptionRequest]) -> AppResult<()> {
    let mut seen = HashSet::new();
    for option in options {
        if !seen.insert(option.code.as_str()) {
            return Err(AppError::DuplicateOptionCode(option.code.clone()));
        }
    }
    Ok(())
}

/// Insert a batch of options; positions fill in missing sort keys so a
/// freshly created set lists in creation order.
pub(crate) async fn insert_options<C: ConnectionTrait>(
    conn: &C,
    attribute_id: Uuid,
    options: &[CreateOptionRequest],
) -> AppResult<Vec<OptionModel>> {
    let mut created = Vec::with_capacity(options.len());
    for (index, option) in options.iter().enumerate() {
        let sort_order = option
            .sort_order
            .clone()
            .unwrap_or_else(|| (index + 1).to_string());
        let inserted = OptionActive {
            id: Set(Uuid::new_v4()),
            attribute_id: Set(attribute_id),
            code: Set(option.code.clone()),
            labels: Set(option.labels.clone()),
            sort_order: Set(Some(sort_order)),
            created_at: NotSet,
        }
        .insert(conn)
        .await
        .map_err(|err| {
            map_unique_violation(err, AppError::DuplicateOptionCode(option.code.clone()))
        })?;
        created.push(inserted);
    }
    Ok(created)
}

pub(crate) async fn load_options<C: ConnectionTrait>(
    conn: &C,
    attribute_id: Uuid,
) -> AppResult<Vec<OptionModel>> {
    let mut options = AttributeOptions::find()
        .filter(OptionCol::AttributeId.eq(attribute_id))
        .all(conn)
        .await?;
    sort_options(&mut options);
    Ok(options)
}

/// Display order is (sort_order, code), nulls last. sort_order is a
/// string key, so "10" sorts before "2".
pub(crate) fn sort_options(options: &mut [OptionModel]) {
    options.sort_by(|a, b| {
        let left = (a.sort_order.is_none(), &a.sort_order, &a.code);
        let right = (b.sort_order.is_none(), &b.sort_order, &b.code);
        left.cmp(&right)
    });
}

pub(crate) fn attribute_from_entity(
    model: AttributeModel,
    options: Vec<OptionModel>,
) -> Attribute {
    Attribute {
        id: model.id,
        code: model.code,
        kind: model.kind,
        backend_type: model.backend_type,
        is_localizable: model.is_localizable,
        is_scopable: model.is_scopable,
        group_code: model.group_code,
        labels: model.labels,
        config: model.config,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
        options: options.into_iter().map(option_from_entity).collect(),
    }
}

pub(crate) fn option_from_entity(model: OptionModel) -> AttributeOption {
    AttributeOption {
        id: model.id,
        attribute_id: model.attribute_id,
        code: model.code,
        labels: model.labels,
        sort_order: model.sort_order,
    }
}
