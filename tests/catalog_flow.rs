use pim_catalog_api::{
    db::{create_orm_conn, create_pool, run_migrations},
    dto::{
        families::{CreateFamilyRequest, CreateFamilyVariantRequest},
        product_models::{CreateProductModelRequest, UpdateProductModelRequest},
        products::CreateProductRequest,
    },
    entity::family_variants::{Column as VariantCol, Entity as FamilyVariants},
    error::AppError,
    routes::params::{FamilyQuery, Pagination, ProductModelQuery},
    services::{family_service, product_model_service, product_service},
    state::AppState,
};
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Statement};
use uuid::Uuid;

// Integration flow: product model tree, family/variant CRUD, and the
// global code/sku uniqueness rules.
#[tokio::test]
async fn product_model_tree_and_families() -> anyhow::Result<()> {
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

    // A parent with three direct children.
    let parent = product_model_service::create_product_model(
        &state,
        model_payload("IPHONE_16", "iPhone 16", None),
    )
    .await?
    .data
    .unwrap();

    for (code, title) in [
        ("IPHONE_16_128", "iPhone 16 128GB"),
        ("IPHONE_16_256", "iPhone 16 256GB"),
        ("IPHONE_16_512", "iPhone 16 512GB"),
    ] {
        product_model_service::create_product_model(
            &state,
            model_payload(code, title, Some(parent.id)),
        )
        .await?;
    }

    // Children are paged, direct descendants only.
    let children = product_model_service::get_children(
        &state,
        parent.id,
        Pagination {
            page: Some(2),
            size: Some(2),
        },
    )
    .await?;
    let meta = children.meta.unwrap();
    assert_eq!(children.data.unwrap().items.len(), 1);
    assert_eq!(meta.total, Some(3));
    assert_eq!(meta.pages, Some(2));

    let missing_parent = product_model_service::get_children(
        &state,
        Uuid::new_v4(),
        Pagination {
            page: None,
            size: None,
        },
    )
    .await;
    assert!(matches!(missing_parent, Err(AppError::NotFound(_))));

    // Code collisions, at create and at update.
    let duplicate = product_model_service::create_product_model(
        &state,
        model_payload("IPHONE_16", "again", None),
    )
    .await;
    assert!(matches!(duplicate, Err(AppError::DuplicateCode(_))));

    let collision = product_model_service::update_product_model(
        &state,
        parent.id,
        UpdateProductModelRequest {
            code: Some("IPHONE_16_128".into()),
            title: None,
            sku: None,
            family_variant_id: None,
            parent_id: None,
            category_ids: None,
        },
    )
    .await;
    assert!(matches!(collision, Err(AppError::DuplicateCode(_))));

    // Model listing filters by parent.
    let filtered = product_model_service::list_product_models(
        &state,
        ProductModelQuery {
            pagination: Pagination {
                page: None,
                size: None,
            },
            search: None,
            family_variant_id: None,
            parent_id: Some(parent.id),
        },
    )
    .await?;
    assert_eq!(filtered.meta.unwrap().total, Some(3));

    // Families with nested variants.
    let family = family_service::create_family(
        &state,
        CreateFamilyRequest {
            code: "smartphones".into(),
            attribute_ids: vec![],
        },
    )
    .await?
    .data
    .unwrap();

    let no_family = family_service::create_variant(
        &state,
        Uuid::new_v4(),
        variant_payload("by_storage"),
    )
    .await;
    assert!(matches!(no_family, Err(AppError::NotFound(_))));

    let variant = family_service::create_variant(&state, family.id, variant_payload("by_storage"))
        .await?
        .data
        .unwrap();
    let dup_variant =
        family_service::create_variant(&state, family.id, variant_payload("by_storage")).await;
    assert!(matches!(dup_variant, Err(AppError::DuplicateCode(_))));

    let fetched = family_service::get_variant(&state, family.id, variant.id).await?;
    assert_eq!(fetched.data.unwrap().code, "by_storage");

    let families = family_service::list_families(
        &state,
        FamilyQuery {
            pagination: Pagination {
                page: None,
                size: None,
            },
            search: Some("smart".into()),
        },
    )
    .await?;
    assert_eq!(families.meta.unwrap().total, Some(1));

    // Family deletion takes its variants along.
    family_service::delete_family(&state, family.id).await?;
    let orphans = FamilyVariants::find()
        .filter(VariantCol::FamilyId.eq(family.id))
        .all(&state.orm)
        .await?;
    assert!(orphans.is_empty(), "variants must cascade with the family");

    // Product sku uniqueness, and model reference validation.
    product_service::create_product(
        &state,
        CreateProductRequest {
            sku: "SKU001".into(),
            product_model_id: Some(parent.id),
            enabled: true,
        },
    )
    .await?;
    let dup_sku = product_service::create_product(
        &state,
        CreateProductRequest {
            sku: "SKU001".into(),
            product_model_id: None,
            enabled: true,
        },
    )
    .await;
    assert!(matches!(dup_sku, Err(AppError::DuplicateCode(_))));

    let bad_model = product_service::create_product(
        &state,
        CreateProductRequest {
            sku: "SKU002".into(),
            product_model_id: Some(Uuid::new_v4()),
            enabled: true,
        },
    )
    .await;
    assert!(matches!(bad_model, Err(AppError::NotFound(_))));

    Ok(())
}

fn model_payload(code: &str, title: &str, parent_id: Option<Uuid>) -> CreateProductModelRequest {
    CreateProductModelRequest {
        code: code.into(),
        title: title.into(),
        sku: None,
        family_variant_id: None,
        parent_id,
        category_ids: vec![],
    }
}

fn variant_payload(code: &str) -> CreateFamilyVariantRequest {
    CreateFamilyVariantRequest {
        code: code.into(),
        level: Some("1".into()),
        axes: vec![],
        attributes: vec![],
    }
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
