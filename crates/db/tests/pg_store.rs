//! Integration tests for the Postgres record store.
//!
//! Exercises the jsonb-based statements against a real database. Ignored by
//! default; run with `DATABASE_URL` set and `--ignored`.

use assert_matches::assert_matches;
use atelier_core::entity::EntityKind;
use atelier_core::query::{ListParams, ListQuery};
use atelier_core::types::Row;
use atelier_db::capability::{Elevated, Restricted};
use atelier_db::error::StoreError;
use atelier_db::models::activity::NewActivity;
use atelier_db::models::{AdminUsers, Project, Projects};
use atelier_db::repositories::PgRecordStore;
use atelier_db::store::{ActivityLog, AdminDirectory, RecordReader, RecordWriter};
use serde_json::{json, Value};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn row(value: Value) -> Row {
    value.as_object().cloned().unwrap()
}

fn new_project(title: &str, slug: &str, sort_order: i32, published: bool) -> Row {
    row(json!({
        "title": title,
        "slug": slug,
        "category": "residential",
        "sort_order": sort_order,
        "is_published": published,
        "gallery_images": ["a.jpg", "b.jpg"],
    }))
}

fn list(params: ListParams) -> ListQuery {
    ListQuery::build(&params, Projects::SEARCH_FIELDS, Projects::DEFAULT_SORT)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "needs DATABASE_URL"]
async fn insert_returns_typed_row(pool: PgPool) {
    let store = PgRecordStore::<Elevated>::from_pool(pool);
    let stored = store
        .insert(
            Projects::TABLE,
            Projects::COLUMNS,
            &new_project("Riverside House", "riverside", 0, true),
        )
        .await
        .unwrap();

    let project: Project = serde_json::from_value(Value::Object(stored)).unwrap();
    assert_eq!(project.title, "Riverside House");
    assert_eq!(project.gallery_images, vec!["a.jpg", "b.jpg"]);
    assert!(project.is_published);
    assert!(!project.id.is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "needs DATABASE_URL"]
async fn unique_index_rejects_duplicate_slug(pool: PgPool) {
    let store = PgRecordStore::<Elevated>::from_pool(pool);
    store
        .insert(Projects::TABLE, Projects::COLUMNS, &new_project("A", "same", 0, true))
        .await
        .unwrap();
    let err = store
        .insert(Projects::TABLE, Projects::COLUMNS, &new_project("B", "same", 1, true))
        .await
        .unwrap_err();
    assert_matches!(err, StoreError::UniqueViolation { constraint } if constraint == "uq_projects_slug");
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "needs DATABASE_URL"]
async fn select_page_filters_sorts_and_counts(pool: PgPool) {
    let store = PgRecordStore::<Elevated>::from_pool(pool.clone());
    for i in 0..25 {
        store
            .insert(
                Projects::TABLE,
                Projects::COLUMNS,
                &new_project(&format!("P{i}"), &format!("p-{i}"), i, i % 2 == 0),
            )
            .await
            .unwrap();
    }

    let query = list(ListParams {
        page: Some(2),
        limit: Some(5),
        filters: vec![("published".into(), "true".into())],
        ..Default::default()
    });
    let reader = PgRecordStore::<Restricted>::from_pool(pool);
    let (rows, total) = reader
        .select_page(Projects::TABLE, Projects::COLUMNS, &query)
        .await
        .unwrap();

    assert_eq!(total, 13);
    let orders: Vec<i64> = rows.iter().map(|r| r["sort_order"].as_i64().unwrap()).collect();
    assert_eq!(orders, vec![10, 12, 14, 16, 18]);
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "needs DATABASE_URL"]
async fn search_escapes_like_wildcards(pool: PgPool) {
    let store = PgRecordStore::<Elevated>::from_pool(pool);
    store
        .insert(Projects::TABLE, Projects::COLUMNS, &new_project("100% Timber", "timber", 0, true))
        .await
        .unwrap();
    store
        .insert(Projects::TABLE, Projects::COLUMNS, &new_project("100 Homes", "homes", 1, true))
        .await
        .unwrap();

    let query = list(ListParams {
        search: Some("100%".into()),
        ..Default::default()
    });
    let (rows, total) = store
        .select_page(Projects::TABLE, Projects::COLUMNS, &query)
        .await
        .unwrap();
    assert_eq!(total, 1);
    assert_eq!(rows[0]["title"], "100% Timber");
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "needs DATABASE_URL"]
async fn update_merges_and_delete_removes(pool: PgPool) {
    let store = PgRecordStore::<Elevated>::from_pool(pool);
    let stored = store
        .insert(Projects::TABLE, Projects::COLUMNS, &new_project("Loft", "loft", 0, false))
        .await
        .unwrap();
    let id = stored["id"].as_str().unwrap().to_string();

    let patch = row(json!({ "title": "Urban Loft", "updated_at": "2030-01-01T00:00:00Z" }));
    let updated = store
        .update(Projects::TABLE, Projects::COLUMNS, &id, &patch)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated["title"], "Urban Loft");
    assert_eq!(updated["slug"], "loft");

    assert!(store.slug_exists(Projects::TABLE, "loft", None).await.unwrap());
    assert!(!store.slug_exists(Projects::TABLE, "loft", Some(&id)).await.unwrap());

    assert!(store.delete(Projects::TABLE, &id).await.unwrap());
    assert!(!store.delete(Projects::TABLE, &id).await.unwrap());
    assert!(store
        .find_by_id(Projects::TABLE, Projects::COLUMNS, &id)
        .await
        .unwrap()
        .is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "needs DATABASE_URL"]
async fn non_uuid_ids_match_nothing(pool: PgPool) {
    let store = PgRecordStore::<Elevated>::from_pool(pool);
    store
        .insert(
            Projects::TABLE,
            Projects::COLUMNS,
            &new_project("Loft", "loft", 0, true),
        )
        .await
        .unwrap();

    for id in ["42", "not-a-uuid", ""] {
        let found = store.find_by_id(Projects::TABLE, Projects::COLUMNS, id).await;
        assert_matches!(found, Ok(None), "find {id:?}");

        let updated = store
            .update(Projects::TABLE, Projects::COLUMNS, id, &row(json!({ "title": "x" })))
            .await;
        assert_matches!(updated, Ok(None), "update {id:?}");

        assert!(!store.delete(Projects::TABLE, id).await.unwrap(), "delete {id:?}");
    }
    assert!(store.slug_exists(Projects::TABLE, "loft", Some("42")).await.unwrap());
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "needs DATABASE_URL"]
async fn directory_and_activity_log_share_the_elevated_pool(pool: PgPool) {
    let store = PgRecordStore::<Elevated>::from_pool(pool.clone());
    store
        .insert(
            AdminUsers::TABLE,
            AdminUsers::COLUMNS,
            &row(json!({ "user_id": "user-1", "email": "ada@studio.test", "role": "admin" })),
        )
        .await
        .unwrap();

    let profile = store
        .admin_directory()
        .find_active_profile("user-1")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(profile.email, "ada@studio.test");
    assert!(profile.is_active);

    store
        .activity_log()
        .append(&NewActivity {
            actor_id: "user-1".into(),
            action: "create".into(),
            entity_type: "projects".into(),
            entity_id: Some("abc".into()),
            details: json!({ "name": "Loft" }),
        })
        .await
        .unwrap();

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM activity_logs")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 1);
}
