use std::sync::Arc;

use hireflow::models::action::TagConfig;
use hireflow::models::{
    ActionKind, NewCandidate, NewTag, Trigger, TriggerEvent, Workflow, WorkflowAction,
    WorkflowDraft,
};
use hireflow::store::{EntityStore, MemoryStore, StoreError, TagStore, WorkflowStore};

fn candidate(email: &str) -> NewCandidate {
    NewCandidate {
        name: "Ada".to_string(),
        email: email.to_string(),
        status: None,
        skills: vec![],
    }
}

fn workflow(name: &str, event: TriggerEvent) -> Workflow {
    Workflow::from_draft(WorkflowDraft {
        name: name.to_string(),
        description: None,
        is_active: true,
        trigger: Trigger {
            event,
            conditions: vec![],
        },
        actions: vec![WorkflowAction::new(
            ActionKind::AddTag(TagConfig {
                tag: name.to_lowercase(),
            }),
            1,
        )],
    })
}

// ── Uniqueness ──────────────────────────────────────────────────

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_candidates_with_same_email_store_one() {
    for round in 0..50 {
        let store = Arc::new(MemoryStore::new());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = store.clone();
                let email = if i % 2 == 0 {
                    "dup@example.com"
                } else {
                    "DUP@example.com"
                };
                tokio::spawn(async move { store.create_candidate(candidate(email)).await })
            })
            .collect();

        let mut created = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => created += 1,
                Err(StoreError::Conflict(_)) => {}
                Err(e) => panic!("unexpected error: {e}"),
            }
        }
        assert_eq!(created, 1, "round {round} stored {created} candidates");
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_tags_with_same_name_store_one() {
    for round in 0..50 {
        let store = Arc::new(MemoryStore::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = store.clone();
                tokio::spawn(async move {
                    store
                        .create_tag(NewTag {
                            name: "python".to_string(),
                            color: None,
                            category: None,
                        })
                        .await
                })
            })
            .collect();

        let mut created = 0;
        for handle in handles {
            if handle.await.unwrap().is_ok() {
                created += 1;
            }
        }
        assert_eq!(created, 1, "round {round} stored {created} tags");
        assert_eq!(store.list_tags().await.unwrap().len(), 1);
    }
}

#[tokio::test]
async fn deleted_tag_name_can_be_reused() {
    let store = MemoryStore::new();
    let new_tag = || NewTag {
        name: "remote".to_string(),
        color: None,
        category: None,
    };

    let tag = store.create_tag(new_tag()).await.unwrap();
    assert!(matches!(
        store.create_tag(new_tag()).await,
        Err(StoreError::Conflict(_))
    ));

    assert!(store.delete_tag(tag.id).await.unwrap());
    store.create_tag(new_tag()).await.unwrap();
}

// ── Toggle ──────────────────────────────────────────────────────

#[tokio::test]
async fn toggle_keeps_latest_definition() {
    let store = MemoryStore::new();
    let original = store
        .insert(&workflow("Original", TriggerEvent::CandidateCreated))
        .await
        .unwrap();

    // A concurrent edit lands after a caller has already read `original`.
    let mut edited = original.clone();
    edited.name = "Edited".to_string();
    edited.trigger.event = TriggerEvent::OfferSent;
    store.update(&edited).await.unwrap();

    let toggled = store.toggle(original.id).await.unwrap();
    assert!(!toggled.is_active);
    assert_eq!(toggled.name, "Edited");
    assert_eq!(toggled.trigger.event, TriggerEvent::OfferSent);

    let toggled = store.toggle(original.id).await.unwrap();
    assert!(toggled.is_active);
}

#[tokio::test]
async fn toggle_unknown_workflow_is_not_found() {
    let store = MemoryStore::new();

    let err = store.toggle(uuid::Uuid::now_v7()).await.unwrap_err();
    assert!(matches!(err, StoreError::NotFound(_)));
}
