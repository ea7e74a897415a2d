use pim_catalog_api::{
    db::{create_orm_conn, create_pool, run_migrations},
    dto::{
        attributes::{CreateAttributeRequest, CreateOptionRequest},
        product_models::CreateProductModelRequest,
        products::CreateProductRequest,
        values::{SetValueRequest, ValueQuery},
    },
    entity::product_values::{Column as ValueCol, Entity as ProductValues},
    enums::{AttributeType, BackendType, EntityType},
    error::AppError,
    models::EntityRef,
    services::{attribute_service, product_model_service, product_service, value_service},
    state::AppState,
};
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Statement};
use uuid::Uuid;

// Integration flow: the 5-tuple upsert, shape/dimension validation, and
// explicit cleanup when entities or attributes go away.
#[tokio::test]
async fn value_upsert_and_cascades() -> anyhow::Result<()> {
    // Allow skipping when no DB is configured in the environment.
    let database_url = match std::env::var("TEST_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
    {
        Ok(url) => url,
        Err(_) => {
            eprintln!(
                "Skipping test: set TEST_DATABASE_URL or DATABASE_URL to run integration flow tests."
            );
            return Ok(());
        }
    };

    let state = setup_state(&database_url).await?;

    // Catalog setup: a select attribute, a localizable+scopable one, a
    // numeric one, a product model, and a product.
    let color = attribute_service::create_attribute(
        &state,
        CreateAttributeRequest {
            code: "color".into(),
            kind: AttributeType::SimpleSelect,
            backend_type: BackendType::Option,
            is_localizable: false,
            is_scopable: false,
            group_code: None,
            labels: None,
            config: None,
            options: vec![
                CreateOptionRequest {
                    code: "red".into(),
                    labels: None,
                    sort_order: None,
                },
                CreateOptionRequest {
                    code: "blue".into(),
                    labels: None,
                    sort_order: None,
                },
            ],
        },
    )
    .await?
    .data
    .unwrap();

    let description = attribute_service::create_attribute(
        &state,
        CreateAttributeRequest {
            code: "description".into(),
            kind: AttributeType::Textarea,
            backend_type: BackendType::String,
            is_localizable: true,
            is_scopable: true,
            group_code: None,
            labels: None,
            config: None,
            options: vec![],
        },
    )
    .await?
    .data
    .unwrap();

    let weight = attribute_service::create_attribute(
        &state,
        CreateAttributeRequest {
            code: "weight".into(),
            kind: AttributeType::Number,
            backend_type: BackendType::Float,
            is_localizable: false,
            is_scopable: false,
            group_code: None,
            labels: None,
            config: None,
            options: vec![],
        },
    )
    .await?
    .data
    .unwrap();

    let model = product_model_service::create_product_model(
        &state,
        CreateProductModelRequest {
            code: "IPHONE_16".into(),
            title: "iPhone 16".into(),
            sku: None,
            family_variant_id: None,
            parent_id: None,
            category_ids: vec![],
        },
    )
    .await?
    .data
    .unwrap();

    let product = product_service::create_product(
        &state,
        CreateProductRequest {
            sku: "IPHONE_16_RED_128".into(),
            product_model_id: Some(model.id),
            enabled: true,
        },
    )
    .await?
    .data
    .unwrap();

    // Upsert: a second write to the same 5-tuple overwrites the first.
    value_service::set_value(
        &state,
        SetValueRequest {
            entity_type: EntityType::ProductModel,
            entity_id: model.id,
            attribute_id: color.id,
            scope: None,
            locale: None,
            value: Some(serde_json::json!("red")),
        },
    )
    .await?;
    value_service::set_value(
        &state,
        SetValueRequest {
            entity_type: EntityType::ProductModel,
            entity_id: model.id,
            attribute_id: color.id,
            scope: None,
            locale: None,
            value: Some(serde_json::json!("blue")),
        },
    )
    .await?;

    let values = value_service::get_values(
        &state,
        EntityRef::ProductModel(model.id),
        ValueQuery {
            attribute_id: Some(color.id),
            scope: None,
            locale: None,
        },
    )
    .await?
    .data
    .unwrap();
    assert_eq!(values.items.len(), 1, "the key admits one row");
    assert_eq!(values.items[0].value, Some(serde_json::json!("blue")));

    // Shape validation against the backend type.
    let bad_shape = value_service::set_value(
        &state,
        SetValueRequest {
            entity_type: EntityType::Product,
            entity_id: product.id,
            attribute_id: weight.id,
            scope: None,
            locale: None,
            value: Some(serde_json::json!("not a number")),
        },
    )
    .await;
    assert!(matches!(bad_shape, Err(AppError::Validation(_))));

    // Dimensions must be enabled on the attribute.
    let not_localizable = value_service::set_value(
        &state,
        SetValueRequest {
            entity_type: EntityType::Product,
            entity_id: product.id,
            attribute_id: weight.id,
            scope: None,
            locale: Some("en_US".into()),
            value: Some(serde_json::json!(1.5)),
        },
    )
    .await;
    assert!(matches!(not_localizable, Err(AppError::Validation(_))));

    // Unknown attribute and unknown entity both fail closed.
    let no_attribute = value_service::set_value(
        &state,
        SetValueRequest {
            entity_type: EntityType::Product,
            entity_id: product.id,
            attribute_id: Uuid::new_v4(),
            scope: None,
            locale: None,
            value: Some(serde_json::json!(1.5)),
        },
    )
    .await;
    assert!(matches!(no_attribute, Err(AppError::NotFound(_))));

    let no_entity = value_service::set_value(
        &state,
        SetValueRequest {
            entity_type: EntityType::Product,
            entity_id: Uuid::new_v4(),
            attribute_id: weight.id,
            scope: None,
            locale: None,
            value: Some(serde_json::json!(1.5)),
        },
    )
    .await;
    assert!(matches!(no_entity, Err(AppError::NotFound(_))));

    // Locale/scope partition values; filters narrow, no fallback.
    for locale in ["en_US", "fr_FR"] {
        value_service::set_value(
            &state,
            SetValueRequest {
                entity_type: EntityType::Product,
                entity_id: product.id,
                attribute_id: description.id,
                scope: Some("ecommerce".into()),
                locale: Some(locale.into()),
                value: Some(serde_json::json!(format!("text in {locale}"))),
            },
        )
        .await?;
    }
    let localized = value_service::get_values(
        &state,
        EntityRef::Product(product.id),
        ValueQuery {
            attribute_id: Some(description.id),
            scope: None,
            locale: Some("en_US".into()),
        },
    )
    .await?
    .data
    .unwrap();
    assert_eq!(localized.items.len(), 1);

    let all_values = value_service::get_values(
        &state,
        EntityRef::Product(product.id),
        ValueQuery {
            attribute_id: None,
            scope: None,
            locale: None,
        },
    )
    .await?
    .data
    .unwrap();
    assert_eq!(all_values.items.len(), 2);

    // Deleting the product model purges its values explicitly.
    product_model_service::delete_product_model(&state, model.id).await?;
    let model_rows = ProductValues::find()
        .filter(ValueCol::EntityId.eq(model.id))
        .all(&state.orm)
        .await?;
    assert!(model_rows.is_empty(), "entity deletion must clean values up");

    // Deleting an attribute cascades to its values.
    let weight_id = weight.id;
    value_service::set_value(
        &state,
        SetValueRequest {
            entity_type: EntityType::Product,
            entity_id: product.id,
            attribute_id: weight_id,
            scope: None,
            locale: None,
            value: Some(serde_json::json!(0.195)),
        },
    )
    .await?;
    attribute_service::delete_attribute(&state, weight_id).await?;
    let weight_rows = ProductValues::find()
        .filter(ValueCol::AttributeId.eq(weight_id))
        .all(&state.orm)
        .await?;
    assert!(weight_rows.is_empty(), "values must cascade with the attribute");

    // Deleting the product purges the remaining localized values.
    product_service::delete_product(&state, product.id).await?;
    let product_rows = ProductValues::find()
        .filter(ValueCol::EntityId.eq(product.id))
        .all(&state.orm)
        .await?;
    assert!(product_rows.is_empty());

    Ok(())
}

async fn setup_state(database_url: &str) -> anyhow::Result<AppState> {
    let pool = create_pool(database_url).await?;
    let orm = create_orm_conn(database_url).await?;
    run_migrations(&orm).await?;

    // Clean tables between runs
    let backend = orm.get_database_backend();
    orm.execute(Statement::from_string(
        backend,
        "TRUNCATE TABLE product_values, attribute_options, attributes, products, product_models, family_variants, families, audit_logs RESTART IDENTITY CASCADE",
    ))
    .await?;

    Ok(AppState { pool, orm })
}
