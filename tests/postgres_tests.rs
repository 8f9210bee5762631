//! Backend tests against PostgreSQL. Each test creates its own database and
//! is skipped when `DATABASE_URL` is not set.

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use uuid::Uuid;

use hireflow::models::action::TagConfig;
use hireflow::models::{
    ActionKind, NewCandidate, NewTag, Trigger, TriggerEvent, Workflow, WorkflowAction,
    WorkflowDraft,
};
use hireflow::store::{EntityStore, PgStore, StoreError, TagStore, WorkflowStore};

struct TestDb {
    pool: PgPool,
    admin_url: String,
    db_name: String,
}

impl TestDb {
    async fn cleanup(self) {
        self.pool.close().await;
        if let Ok(admin_pool) = PgPoolOptions::new()
            .max_connections(1)
            .connect(&self.admin_url)
            .await
        {
            let _ = sqlx::query(&format!(
                "DROP DATABASE IF EXISTS \"{}\" WITH (FORCE)",
                self.db_name
            ))
            .execute(&admin_pool)
            .await;
            admin_pool.close().await;
        }
    }
}

/// A fresh migrated database, or `None` when no server is configured.
async fn test_db() -> Option<TestDb> {
    let _ = dotenvy::dotenv();
    let base_url = std::env::var("DATABASE_URL").ok()?;

    let db_name = format!("hireflow_test_{}", Uuid::now_v7().simple());
    let (base, _) = base_url.rsplit_once('/')?;
    let admin_url = format!("{base}/postgres");
    let test_url = format!("{base}/{db_name}");

    let admin_pool = PgPoolOptions::new()
        .max_connections(1)
        .connect(&admin_url)
        .await
        .expect("Failed to connect to postgres for test DB creation");
    sqlx::query(&format!("CREATE DATABASE \"{db_name}\""))
        .execute(&admin_pool)
        .await
        .expect("Failed to create test database");
    admin_pool.close().await;

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&test_url)
        .await
        .expect("Failed to connect to test database");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations on test database");

    Some(TestDb {
        pool,
        admin_url,
        db_name,
    })
}

fn candidate(name: &str, email: &str) -> NewCandidate {
    NewCandidate {
        name: name.to_string(),
        email: email.to_string(),
        status: None,
        skills: vec![],
    }
}

#[tokio::test]
async fn apply_tag_tags_candidates_and_counts_usage() {
    let Some(db) = test_db().await else {
        return;
    };
    let store = PgStore::new(db.pool.clone());

    let a = store.create_candidate(candidate("Ada", "ada@example.com")).await.unwrap();
    let b = store.create_candidate(candidate("Bo", "bo@example.com")).await.unwrap();
    let tag = store
        .create_tag(NewTag {
            name: "python".to_string(),
            color: None,
            category: None,
        })
        .await
        .unwrap();

    let affected = store
        .apply_tag(tag.id, &[a.id, b.id, a.id, Uuid::now_v7()])
        .await
        .unwrap();
    assert_eq!(affected, 2);

    let tag = store.find_tag(tag.id).await.unwrap().unwrap();
    assert_eq!(tag.usage_count, 2);
    let a = store.find_candidate(a.id).await.unwrap().unwrap();
    assert_eq!(a.tags, vec!["python"]);

    let missing = store.apply_tag(Uuid::now_v7(), &[b.id]).await.unwrap_err();
    assert!(matches!(missing, StoreError::NotFound(_)));

    db.cleanup().await;
}

#[tokio::test]
async fn candidate_email_is_unique_ignoring_case() {
    let Some(db) = test_db().await else {
        return;
    };
    let store = PgStore::new(db.pool.clone());

    store.create_candidate(candidate("Ada", "ada@example.com")).await.unwrap();
    let err = store
        .create_candidate(candidate("Ada", "ADA@example.com"))
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::Conflict(_)));

    db.cleanup().await;
}

#[tokio::test]
async fn toggle_and_trigger_count_leave_definition_alone() {
    let Some(db) = test_db().await else {
        return;
    };
    let store = PgStore::new(db.pool.clone());

    let original = store
        .insert(&Workflow::from_draft(WorkflowDraft {
            name: "Original".to_string(),
            description: None,
            is_active: true,
            trigger: Trigger {
                event: TriggerEvent::CandidateCreated,
                conditions: vec![],
            },
            actions: vec![WorkflowAction::new(
                ActionKind::AddTag(TagConfig {
                    tag: "new".to_string(),
                }),
                1,
            )],
        }))
        .await
        .unwrap();

    let mut edited = original.clone();
    edited.name = "Edited".to_string();
    store.update(&edited).await.unwrap();

    let toggled = store.toggle(original.id).await.unwrap();
    assert!(!toggled.is_active);
    assert_eq!(toggled.name, "Edited");

    store.record_trigger(original.id, chrono::Utc::now()).await.unwrap();
    store.record_trigger(original.id, chrono::Utc::now()).await.unwrap();
    let stored = store.find_by_id(original.id).await.unwrap().unwrap();
    assert_eq!(stored.times_triggered, 2);
    assert_eq!(stored.name, "Edited");

    let err = store.toggle(Uuid::now_v7()).await.unwrap_err();
    assert!(matches!(err, StoreError::NotFound(_)));

    db.cleanup().await;
}
