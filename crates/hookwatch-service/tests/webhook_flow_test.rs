//! End-to-end flow: register hooks, observe repository state, flag the hook
//! that missed a push, recover it through confirmed deliveries.

mod helpers;

use std::sync::Arc;

use chrono::Utc;

use helpers::{StubActions, StubHost, manager, repo, revisions, user};
use hookwatch_core::config::{AppConfig, StoreConfig};
use hookwatch_core::events::{RepoStateBus, RepoStateEvent};
use hookwatch_entity::RegisterOutcome;
use hookwatch_service::{ConsistencyVerdict, WebLinks, WebhookManager};

#[tokio::test]
async fn test_divergent_push_flags_only_the_stale_hook() {
    let manager = manager();
    let alice = user("alice");
    let fresh = repo("fresh");
    let stale = repo("stale");

    assert_eq!(
        manager.register(&fresh, &StubHost, &alice).await.unwrap(),
        RegisterOutcome::Created
    );
    assert_eq!(
        manager.register(&stale, &StubHost, &alice).await.unwrap(),
        RegisterOutcome::Created
    );
    assert!(!manager.has_incorrect_hooks().await.unwrap());

    let bus = RepoStateBus::new(16);
    manager.start(&bus).await;

    // First observation becomes each hook's baseline.
    bus.publish(RepoStateEvent::new(
        fresh.clone(),
        revisions(&[]),
        revisions(&[("main", "h1")]),
    ));
    bus.publish(RepoStateEvent::new(
        stale.clone(),
        revisions(&[]),
        revisions(&[("main", "h1")]),
    ));
    // The stale repository moves on without its hook having reported the push.
    bus.publish(RepoStateEvent::new(
        stale.clone(),
        revisions(&[("main", "h1")]),
        revisions(&[("main", "h2")]),
    ));

    manager.stop().await;

    let incorrect = manager.incorrect_hooks().await.unwrap();
    assert_eq!(incorrect.len(), 1);
    assert_eq!(incorrect[0].0, stale);
    assert!(manager.has_incorrect_hooks().await.unwrap());
    // The old baseline survives as evidence of what the hook last reflected.
    assert_eq!(
        incorrect[0].1.last_branch_revisions,
        Some(revisions(&[("main", "h1")]))
    );

    let fresh_record = manager.context().hook(&fresh).await.unwrap().unwrap();
    assert!(fresh_record.correct);
    assert_eq!(
        fresh_record.last_branch_revisions,
        Some(revisions(&[("main", "h1")]))
    );
}

#[tokio::test]
async fn test_confirmed_delivery_recovers_a_flagged_hook() {
    let manager = manager();
    let alice = user("alice");
    let key = repo("widgets");
    manager.register(&key, &StubHost, &alice).await.unwrap();

    let engine = manager.engine();
    assert_eq!(
        engine
            .check_consistency(&key, &revisions(&[("main", "h1")]))
            .await
            .unwrap(),
        ConsistencyVerdict::Consistent
    );

    let verdict = engine
        .check_consistency(&key, &revisions(&[("main", "h2")]))
        .await
        .unwrap();
    assert_eq!(verdict.mismatch().unwrap().found.as_deref(), Some("h1"));
    assert!(manager.has_incorrect_hooks().await.unwrap());

    // A delivery arrives carrying the pushed state: the hook works after all.
    manager
        .merge_branch_revisions(&key, &revisions(&[("main", "h2")]))
        .await
        .unwrap();
    manager.record_usage(&key, Utc::now()).await.unwrap();

    assert!(!manager.has_incorrect_hooks().await.unwrap());
    assert!(manager.recently_used(&key).await.unwrap());
    assert_eq!(
        engine
            .check_consistency(&key, &revisions(&[("main", "h2")]))
            .await
            .unwrap(),
        ConsistencyVerdict::Consistent
    );
}

#[tokio::test]
async fn test_file_backed_manager_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let config = AppConfig {
        store: StoreConfig {
            backend: "file".to_string(),
            path: dir.path().to_str().unwrap().to_string(),
        },
        ..AppConfig::default()
    };
    let alice = user("alice");
    let key = repo("durable");

    {
        let manager = WebhookManager::from_config(
            &config,
            Arc::new(StubActions),
            WebLinks::new("https://ci.example.com"),
        )
        .await
        .unwrap();
        manager.register(&key, &StubHost, &alice).await.unwrap();
        manager
            .engine()
            .check_consistency(&key, &revisions(&[("main", "h1")]))
            .await
            .unwrap();
        manager.stop().await;
    }

    let reopened = WebhookManager::from_config(
        &config,
        Arc::new(StubActions),
        WebLinks::new("https://ci.example.com"),
    )
    .await
    .unwrap();

    assert_eq!(
        reopened.register(&key, &StubHost, &alice).await.unwrap(),
        RegisterOutcome::AlreadyExists
    );
    let record = reopened.context().hook(&key).await.unwrap().unwrap();
    assert_eq!(record.added_by.as_deref(), Some("alice"));
    assert_eq!(
        record.last_branch_revisions,
        Some(revisions(&[("main", "h1")]))
    );
}

#[tokio::test]
async fn test_unknown_store_backend_is_rejected() {
    let config = AppConfig {
        store: StoreConfig {
            backend: "sqlite".to_string(),
            path: "unused".to_string(),
        },
        ..AppConfig::default()
    };

    let err = WebhookManager::from_config(
        &config,
        Arc::new(StubActions),
        WebLinks::new("https://ci.example.com"),
    )
    .await
    .unwrap_err();
    assert_eq!(err.kind(), "configuration");
}
