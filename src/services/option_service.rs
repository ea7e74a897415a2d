use std::collections::HashMap;

use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set, TransactionTrait,
};
use sea_orm::ActiveValue::NotSet;
use uuid::Uuid;

use crate::{
    audit::log_audit,
    dto::attributes::{CreateOptionRequest, OptionList, UpdateOptionRequest},
    entity::{
        attribute_options::{
            ActiveModel as OptionActive, Column as OptionCol, Entity as AttributeOptions,
        },
        attributes::{Entity as Attributes, Model as AttributeModel},
    },
    error::{AppError, AppResult, map_unique_violation},
    models::AttributeOption,
    response::{ApiResponse, Meta},
    services::attribute_service::{insert_options, load_options, option_from_entity, sort_options},
    state::AppState,
};

pub async fn add_option(
    state: &AppState,
    attribute_id: Uuid,
    payload: CreateOptionRequest,
) -> AppResult<ApiResponse<AttributeOption>> {
    let attribute = find_select_attribute(state, attribute_id).await?;

    let existing = AttributeOptions::find()
        .filter(OptionCol::AttributeId.eq(attribute.id))
        .filter(OptionCol::Code.eq(payload.code.clone()))
        .one(&state.orm)
        .await?;
    if existing.is_some() {
        return Err(AppError::DuplicateOptionCode(payload.code));
    }

    let option = OptionActive {
        id: Set(Uuid::new_v4()),
        attribute_id: Set(attribute.id),
        code: Set(payload.code.clone()),
        labels: Set(payload.labels),
        sort_order: Set(payload.sort_order),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await
    .map_err(|err| map_unique_violation(err, AppError::DuplicateOptionCode(payload.code.clone())))?;

    if let Err(err) = log_audit(
        &state.pool,
        "option_add",
        Some("attribute_options"),
        Some(serde_json::json!({ "attribute_id": attribute.id, "option_id": option.id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Option created",
        option_from_entity(option),
        Some(Meta::empty()),
    ))
}

pub async fn list_options(
    state: &AppState,
    attribute_id: Uuid,
) -> AppResult<ApiResponse<OptionList>> {
    let attribute = find_attribute(state, attribute_id).await?;
    let options = load_options(&state.orm, attribute.id).await?;
    let items = options.into_iter().map(option_from_entity).collect();
    Ok(ApiResponse::success("Options", OptionList { items }, None))
}

pub async fn get_option(
    state: &AppState,
    attribute_id: Uuid,
    option_id: Uuid,
) -> AppResult<ApiResponse<AttributeOption>> {
    let option = AttributeOptions::find_by_id(option_id)
        .filter(OptionCol::AttributeId.eq(attribute_id))
        .one(&state.orm)
        .await?;
    let option = match option {
        Some(o) => o,
        None => return Err(AppError::NotFound("attribute option")),
    };
    Ok(ApiResponse::success("Option", option_from_entity(option), None))
}

pub async fn update_option(
    state: &AppState,
    attribute_id: Uuid,
    option_id: Uuid,
    payload: UpdateOptionRequest,
) -> AppResult<ApiResponse<AttributeOption>> {
    let option = AttributeOptions::find_by_id(option_id)
        .filter(OptionCol::AttributeId.eq(attribute_id))
        .one(&state.orm)
        .await?;
    let option = match option {
        Some(o) => o,
        None => return Err(AppError::NotFound("attribute option")),
    };

    // Renaming re-validates per-attribute code uniqueness.
    if payload.code != option.code {
        let collision = AttributeOptions::find()
            .filter(OptionCol::AttributeId.eq(attribute_id))
            .filter(OptionCol::Code.eq(payload.code.clone()))
            .filter(OptionCol::Id.ne(option_id))
            .one(&state.orm)
            .await?;
        if collision.is_some() {
            return Err(AppError::DuplicateOptionCode(payload.code));
        }
    }

    let mut active: OptionActive = option.into();
    active.code = Set(payload.code.clone());
    active.labels = Set(payload.labels);
    active.sort_order = Set(payload.sort_order);
    let option = active
        .update(&state.orm)
        .await
        .map_err(|err| map_unique_violation(err, AppError::DuplicateOptionCode(payload.code.clone())))?;

    if let Err(err) = log_audit(
        &state.pool,
        "option_update",
        Some("attribute_options"),
        Some(serde_json::json!({ "attribute_id": attribute_id, "option_id": option.id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Updated",
        option_from_entity(option),
        Some(Meta::empty()),
    ))
}

pub async fn delete_option(
    state: &AppState,
    attribute_id: Uuid,
    option_id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let result = AttributeOptions::delete_many()
        .filter(OptionCol::Id.eq(option_id))
        .filter(OptionCol::AttributeId.eq(attribute_id))
        .exec(&state.orm)
        .await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound("attribute option"));
    }

    if let Err(err) = log_audit(
        &state.pool,
        "option_delete",
        Some("attribute_options"),
        Some(serde_json::json!({ "attribute_id": attribute_id, "option_id": option_id })),
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

/// Total reorder: the id list must cover the attribute's option set
/// exactly; sort keys are reassigned positionally, 1-based.
pub async fn reorder_options(
    state: &AppState,
    attribute_id: Uuid,
    ordered_ids: Vec<Uuid>,
) -> AppResult<ApiResponse<OptionList>> {
    find_attribute(state, attribute_id).await?;

    let txn = state.orm.begin().await?;

    let options = AttributeOptions::find()
        .filter(OptionCol::AttributeId.eq(attribute_id))
        .all(&txn)
        .await?;
    let by_id: HashMap<Uuid, _> = options.iter().map(|o| (o.id, o.clone())).collect();

    for option_id in &ordered_ids {
        if !by_id.contains_key(option_id) {
            return Err(AppError::ForeignOption(*option_id));
        }
    }

    let distinct: std::collections::HashSet<Uuid> = ordered_ids.iter().copied().collect();
    if distinct.len() != options.len() || ordered_ids.len() != options.len() {
        return Err(AppError::IncompleteSet {
            expected: options.len(),
            given: ordered_ids.len(),
        });
    }

    for (index, option_id) in ordered_ids.iter().enumerate() {
        let mut active: OptionActive = by_id[option_id].clone().into();
        active.sort_order = Set(Some((index + 1).to_string()));
        active.update(&txn).await?;
    }

    txn.commit().await?;

    if let Err(err) = log_audit(
        &state.pool,
        "options_reorder",
        Some("attribute_options"),
        Some(serde_json::json!({ "attribute_id": attribute_id, "count": ordered_ids.len() })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    let reordered = load_options(&state.orm, attribute_id).await?;
    let items = reordered.into_iter().map(option_from_entity).collect();
    Ok(ApiResponse::success(
        "Reordered",
        OptionList { items },
        Some(Meta::empty()),
    ))
}

/// Destructive replace of the whole option set, delete-then-insert in
/// one transaction.
pub async fn replace_options(
    state: &AppState,
    attribute_id: Uuid,
    new_set: Vec<CreateOptionRequest>,
) -> AppResult<ApiResponse<OptionList>> {
    let attribute = find_select_attribute(state, attribute_id).await?;

    let mut seen = std::collections::HashSet::new();
    for option in &new_set {
        if !seen.insert(option.code.as_str()) {
            return Err(AppError::DuplicateOptionCode(option.code.clone()));
        }
    }

    let txn = state.orm.begin().await?;

    AttributeOptions::delete_many()
        .filter(OptionCol::AttributeId.eq(attribute.id))
        .exec(&txn)
        .await?;
    let mut options = insert_options(&txn, attribute.id, &new_set).await?;

    txn.commit().await?;

    if let Err(err) = log_audit(
        &state.pool,
        "options_replace",
        Some("attribute_options"),
        Some(serde_json::json!({ "attribute_id": attribute.id, "count": options.len() })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    sort_options(&mut options);
    let items = options.into_iter().map(option_from_entity).collect();
    Ok(ApiResponse::success(
        "Options replaced",
        OptionList { items },
        Some(Meta::empty()),
    ))
}

async fn find_attribute(state: &AppState, attribute_id: Uuid) -> AppResult<AttributeModel> {
    let attribute = Attributes::find_by_id(attribute_id).one(&state.orm).await?;
    match attribute {
        Some(a) => Ok(a),
        None => Err(AppError::NotFound("attribute")),
    }
}

async fn find_select_attribute(state: &AppState, attribute_id: Uuid) -> AppResult<AttributeModel> {
    let attribute = find_attribute(state, attribute_id).await?;
    if !attribute.kind.supports_options() {
        return Err(AppError::WrongAttributeType(attribute.kind));
    }
    Ok(attribute)
}
