mod common;

use anyhow::Result;
use serde_json::json;
use shared::{
    abstract_trait::{
        ProductCommandRepositoryTrait, ProductCommandServiceTrait, ProductQueryRepositoryTrait,
        ProductQueryServiceTrait,
    },
    domain::requests::UpdateProductRequest,
    errors::ServiceError,
};

#[tokio::test]
async fn create_resolves_names_and_records_history() -> Result<()> {
    let pool = common::memory_pool().await?;
    let repo = common::product_repository(&pool);

    let id = repo
        .command
        .create_product(&common::create_request(
            "Widget",
            Some("Tools"),
            Some(5),
            Some("Shelf A"),
        ))
        .await?;

    let listed = repo.query.find_all().await?;
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, id);
    assert_eq!(listed[0].name, "Widget");
    assert_eq!(listed[0].category.as_deref(), Some("Tools"));
    assert_eq!(listed[0].quantity, Some(5));
    assert_eq!(listed[0].location.as_deref(), Some("Shelf A"));

    let history = common::history(&pool).await?;
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].product_id, Some(id));
    assert_eq!(history[0].change, 5);
    assert!(history[0].timestamp.is_some());
    Ok(())
}

#[tokio::test]
async fn blank_names_fall_back_to_default_rows() -> Result<()> {
    let pool = common::memory_pool().await?;
    let repo = common::product_repository(&pool);

    repo.command
        .create_product(&common::create_request("Widget", Some(""), Some(2), None))
        .await?;

    let listed = repo.query.find_all().await?;
    assert_eq!(listed[0].category.as_deref(), Some("Sin Categoría"));
    assert_eq!(listed[0].location.as_deref(), Some("Sin Ubicación"));
    Ok(())
}

#[tokio::test]
async fn repeated_names_share_one_lookup_row() -> Result<()> {
    let pool = common::memory_pool().await?;
    let repo = common::product_repository(&pool);

    for name in ["Hammer", "Wrench"] {
        repo.command
            .create_product(&common::create_request(name, Some("Tools"), Some(1), Some("Bin 3")))
            .await?;
    }

    assert_eq!(common::count(&pool, "SELECT COUNT(*) FROM categories").await?, 1);
    assert_eq!(common::count(&pool, "SELECT COUNT(*) FROM locations").await?, 1);
    assert_eq!(common::count(&pool, "SELECT COUNT(*) FROM products").await?, 2);
    Ok(())
}

#[tokio::test]
async fn history_failure_keeps_the_product() -> Result<()> {
    let pool = common::memory_pool().await?;
    let repo = common::product_repository(&pool);

    sqlx::query("DROP TABLE transactions").execute(&pool).await?;

    let id = repo
        .command
        .create_product(&common::create_request("Widget", None, Some(3), None))
        .await?;

    let listed = repo.query.find_all().await?;
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, id);
    Ok(())
}

#[tokio::test]
async fn failed_insert_rolls_back_lookup_rows() -> Result<()> {
    let pool = common::memory_pool().await?;
    let repo = common::product_repository(&pool);

    sqlx::query(
        "CREATE TRIGGER block_products BEFORE INSERT ON products \
         BEGIN SELECT RAISE(ABORT, 'blocked'); END",
    )
    .execute(&pool)
    .await?;

    let result = repo
        .command
        .create_product(&common::create_request("Widget", Some("Fresh"), Some(1), Some("New Shelf")))
        .await;

    assert!(result.is_err());
    assert_eq!(common::count(&pool, "SELECT COUNT(*) FROM categories").await?, 0);
    assert_eq!(common::count(&pool, "SELECT COUNT(*) FROM locations").await?, 0);
    Ok(())
}

#[tokio::test]
async fn update_rewrites_the_row() -> Result<()> {
    let pool = common::memory_pool().await?;
    let repo = common::product_repository(&pool);

    let id = repo
        .command
        .create_product(&common::create_request("Widget", Some("Tools"), Some(5), Some("Shelf A")))
        .await?;

    let changes = repo
        .command
        .update_product(&UpdateProductRequest {
            id,
            name: "Gadget".to_string(),
            category: Some("Parts".to_string()),
            quantity: Some(7),
            location: None,
        })
        .await?;
    assert_eq!(changes, 1);

    let row = sqlx::query_as::<_, common::ProductRow>(
        "SELECT id, name, category_id, quantity, location_id FROM products WHERE id = ?",
    )
    .bind(id)
    .fetch_one(&pool)
    .await?;
    assert_eq!(row.name, "Gadget");
    assert_eq!(row.quantity, Some(7));
    assert!(row.category_id.is_some());

    let listed = repo.query.find_all().await?;
    assert_eq!(listed[0].category.as_deref(), Some("Parts"));
    assert_eq!(listed[0].location.as_deref(), Some("Sin Ubicación"));
    Ok(())
}

#[tokio::test]
async fn update_of_missing_id_reports_no_changes() -> Result<()> {
    let pool = common::memory_pool().await?;
    let repo = common::product_repository(&pool);

    let changes = repo
        .command
        .update_product(&UpdateProductRequest {
            id: 999,
            name: "Ghost".to_string(),
            category: None,
            quantity: Some(1),
            location: None,
        })
        .await?;

    assert_eq!(changes, 0);
    assert!(repo.query.find_all().await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn delete_detaches_history_and_is_idempotent() -> Result<()> {
    let pool = common::memory_pool().await?;
    let repo = common::product_repository(&pool);

    let id = repo
        .command
        .create_product(&common::create_request("Widget", None, Some(5), None))
        .await?;

    assert_eq!(repo.command.delete_product(id).await?, 1);
    assert_eq!(repo.command.delete_product(id).await?, 0);
    assert!(repo.query.find_all().await?.is_empty());

    let history = common::history(&pool).await?;
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].product_id, None);
    Ok(())
}

#[tokio::test]
async fn sync_replaces_every_row() -> Result<()> {
    let pool = common::memory_pool().await?;
    let repo = common::product_repository(&pool);

    repo.command
        .create_product(&common::create_request("Old", None, Some(1), None))
        .await?;

    let outcome = repo
        .command
        .sync_products(&[
            common::sync_record(Some(10), Some("A")),
            common::sync_record(None, Some("B")),
        ])
        .await?;

    assert!(outcome.is_committed());
    assert_eq!(outcome.inserted, 2);

    let listed = repo.query.find_all().await?;
    let names: Vec<_> = listed.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["A", "B"]);
    assert_eq!(listed[0].id, 10);
    assert!(listed[1].id > 10);

    assert_eq!(
        common::count(&pool, "SELECT COUNT(*) FROM transactions WHERE product_id IS NOT NULL")
            .await?,
        0
    );
    Ok(())
}

#[tokio::test]
async fn sync_with_a_bad_record_keeps_the_previous_table() -> Result<()> {
    let pool = common::memory_pool().await?;
    let repo = common::product_repository(&pool);

    repo.command
        .create_product(&common::create_request("Keep", Some("Tools"), Some(4), None))
        .await?;
    let categories_before = common::count(&pool, "SELECT COUNT(*) FROM categories").await?;

    let mut nameless = common::sync_record(None, None);
    nameless.category = Some("Brand New".to_string());

    let outcome = repo
        .command
        .sync_products(&[common::sync_record(None, Some("A")), nameless])
        .await?;

    assert!(!outcome.is_committed());
    assert_eq!(outcome.inserted, 1);
    assert_eq!(outcome.failures.len(), 1);
    assert_eq!(outcome.failures[0].0, 1);

    let listed = repo.query.find_all().await?;
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].name, "Keep");
    assert_eq!(
        common::count(&pool, "SELECT COUNT(*) FROM categories").await?,
        categories_before
    );
    Ok(())
}

#[tokio::test]
async fn sync_with_duplicate_ids_is_rejected() -> Result<()> {
    let pool = common::memory_pool().await?;
    let repo = common::product_repository(&pool);

    let outcome = repo
        .command
        .sync_products(&[
            common::sync_record(Some(5), Some("A")),
            common::sync_record(Some(5), Some("B")),
        ])
        .await?;

    assert_eq!(outcome.failures.len(), 1);
    assert_eq!(outcome.failures[0].0, 1);
    assert!(repo.query.find_all().await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn service_rejects_zero_quantity_before_the_store() -> Result<()> {
    let pool = common::memory_pool().await?;
    let service = common::product_service(&pool).await?;

    let result = service
        .command
        .create_product(&common::create_request("Widget", None, Some(0), None))
        .await;

    match result {
        Err(ServiceError::Validation(messages)) => {
            assert_eq!(messages, vec!["Quantity is required".to_string()]);
        }
        other => panic!("expected validation error, got {other:?}"),
    }
    assert_eq!(common::count(&pool, "SELECT COUNT(*) FROM categories").await?, 0);
    Ok(())
}

#[tokio::test]
async fn service_rejects_malformed_sync_records_untouched() -> Result<()> {
    let pool = common::memory_pool().await?;
    let service = common::product_service(&pool).await?;

    service
        .command
        .create_product(&common::create_request("Keep", None, Some(1), None))
        .await?;

    let result = service
        .command
        .sync_products(vec![json!({ "name": "Fine" }), json!({ "name": 42 })])
        .await;

    match result {
        Err(ServiceError::SyncRejected(failures)) => {
            assert_eq!(failures.len(), 1);
            assert_eq!(failures[0].index, 1);
            assert_eq!(failures[0].product, json!({ "name": 42 }));
        }
        other => panic!("expected sync rejection, got {other:?}"),
    }

    let listed = service.query.find_all().await?;
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].name, "Keep");
    Ok(())
}
