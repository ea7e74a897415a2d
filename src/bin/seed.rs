use pim_catalog_api::{config::AppConfig, db::create_pool};
use uuid::Uuid;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let pool = create_pool(&config.database_url).await?;
    // Ensure migrations are applied.
    sqlx::migrate!("./migrations").run(&pool).await?;

    let color_id = seed_attributes(&pool).await?;
    seed_product_models(&pool, color_id).await?;

    println!("Seed completed");
    Ok(())
}

async fn seed_attributes(pool: &sqlx::PgPool) -> anyhow::Result<Uuid> {
    let attributes = vec![
        ("color", "simple_select", "option", false, false),
        ("description", "textarea", "string", true, true),
        ("weight", "number", "float", false, false),
        ("release_date", "date", "date", false, false),
        ("price", "price", "json", false, true),
    ];

    for (code, kind, backend_type, is_localizable, is_scopable) in attributes {
        sqlx::query(
            r#"
            INSERT INTO attributes (id, code, type, backend_type, is_localizable, is_scopable, labels)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (code) DO NOTHING
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(code)
        .bind(kind)
        .bind(backend_type)
        .bind(is_localizable)
        .bind(is_scopable)
        .bind(serde_json::json!({ "en_US": code }))
        .execute(pool)
        .await?;
    }

    let (color_id,): (Uuid,) = sqlx::query_as("SELECT id FROM attributes WHERE code = 'color'")
        .fetch_one(pool)
        .await?;

    let options = vec![("red", "1"), ("green", "2"), ("blue", "3")];
    for (code, sort_order) in options {
        sqlx::query(
            r#"
            INSERT INTO attribute_options (id, attribute_id, code, labels, sort_order)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (attribute_id, code) DO NOTHING
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(color_id)
        .bind(code)
        .bind(serde_json::json!({ "en_US": code }))
        .bind(sort_order)
        .execute(pool)
        .await?;
    }

    println!("Seeded attributes");
    Ok(color_id)
}

async fn seed_product_models(pool: &sqlx::PgPool, color_id: Uuid) -> anyhow::Result<()> {
    let model_id = Uuid::new_v4();
    sqlx::query(
        r#"
        INSERT INTO product_models (id, code, title, sku)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (code) DO NOTHING
        "#,
    )
    .bind(model_id)
    .bind("IPHONE_16")
    .bind("iPhone 16")
    .bind("SKU12345")
    .execute(pool)
    .await?;

    let (model_id,): (Uuid,) =
        sqlx::query_as("SELECT id FROM product_models WHERE code = 'IPHONE_16'")
            .fetch_one(pool)
            .await?;

    sqlx::query(
        r#"
        INSERT INTO product_values (id, entity_type, entity_id, attribute_id, value)
        VALUES ($1, 'product_model', $2, $3, $4)
        ON CONFLICT (entity_type, entity_id, attribute_id, COALESCE(scope, ''), COALESCE(locale, ''))
        DO NOTHING
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(model_id)
    .bind(color_id)
    .bind(serde_json::json!("red"))
    .execute(pool)
    .await?;

    println!("Seeded product models");
    Ok(())
}
