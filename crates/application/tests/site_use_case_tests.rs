use sitefence_application::use_cases::{
    BlockSiteUseCase, GetBlockedSitesUseCase, UnblockSiteUseCase, UpdateSiteUseCase,
};
use sitefence_domain::{BlockPolicy, DomainError};
use std::sync::Arc;

mod helpers;
use helpers::{MockBlockListStore, RecordingGateway};

fn stack() -> (Arc<MockBlockListStore>, Arc<RecordingGateway>) {
    (
        Arc::new(MockBlockListStore::new()),
        Arc::new(RecordingGateway::new()),
    )
}

#[tokio::test]
async fn test_block_site_normalizes_and_allocates_rule_id() {
    let (store, gateway) = stack();
    let use_case = BlockSiteUseCase::new(store.clone(), gateway.clone());

    let entry = use_case
        .execute("https://www.Example.com/path", BlockPolicy::Permanent)
        .await
        .unwrap();

    assert_eq!(entry.hostname, "example.com");
    assert_eq!(entry.rule_id, 1);
    assert_eq!(entry.expires_at, None);

    let snapshot = store.snapshot().await;
    assert_eq!(snapshot.next_rule_id, 2);
    assert_eq!(gateway.applied().await.len(), 1);
}

#[tokio::test]
async fn test_block_site_rejects_duplicates_without_side_effects() {
    let (store, gateway) = stack();
    let use_case = BlockSiteUseCase::new(store.clone(), gateway.clone());

    use_case.execute("foo.com", BlockPolicy::Permanent).await.unwrap();
    let err = use_case
        .execute("https://www.foo.com", BlockPolicy::Permanent)
        .await
        .unwrap_err();

    assert!(matches!(err, DomainError::DuplicateHostname(h) if h == "foo.com"));
    assert_eq!(store.snapshot().await.blocked_sites.len(), 1);
    assert_eq!(store.snapshot().await.next_rule_id, 2);
    assert_eq!(gateway.applied().await.len(), 1);
}

#[tokio::test]
async fn test_block_site_rejects_invalid_input_before_persisting() {
    let (store, gateway) = stack();
    let use_case = BlockSiteUseCase::new(store.clone(), gateway.clone());

    assert!(use_case
        .execute("not a url", BlockPolicy::Permanent)
        .await
        .is_err());
    assert!(use_case
        .execute("foo.com", BlockPolicy::Duration { duration_minutes: 0 })
        .await
        .is_err());

    assert_eq!(store.save_calls(), 0);
    assert!(gateway.applied().await.is_empty());
}

#[tokio::test]
async fn test_rule_ids_are_never_reused_across_delete() {
    let (store, gateway) = stack();
    let block = BlockSiteUseCase::new(store.clone(), gateway.clone());
    let unblock = UnblockSiteUseCase::new(store.clone(), gateway.clone());

    let a = block.execute("a.com", BlockPolicy::Permanent).await.unwrap();
    let b = block.execute("b.com", BlockPolicy::Permanent).await.unwrap();
    assert_eq!((a.rule_id, b.rule_id), (1, 2));

    unblock.execute(&b.id).await.unwrap();
    let c = block.execute("c.com", BlockPolicy::Permanent).await.unwrap();

    // b's id is retired, not recycled.
    assert_eq!(c.rule_id, 3);
    assert_eq!(store.snapshot().await.next_rule_id, 4);
}

#[tokio::test]
async fn test_update_preserves_ids_and_recomputes_expiry() {
    let (store, gateway) = stack();
    let block = BlockSiteUseCase::new(store.clone(), gateway.clone());
    let update = UpdateSiteUseCase::new(store.clone(), gateway.clone());

    let created = block.execute("foo.com", BlockPolicy::Permanent).await.unwrap();
    let updated = update
        .execute(
            &created.id,
            "foo.com",
            BlockPolicy::Duration {
                duration_minutes: 45,
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.rule_id, created.rule_id);
    assert!(updated.expires_at.is_some());
    assert_eq!(store.snapshot().await.next_rule_id, 2, "edit must not advance the counter");
}

#[tokio::test]
async fn test_update_allows_keeping_own_hostname_but_rejects_stealing() {
    let (store, gateway) = stack();
    let block = BlockSiteUseCase::new(store.clone(), gateway.clone());
    let update = UpdateSiteUseCase::new(store.clone(), gateway.clone());

    let a = block.execute("a.com", BlockPolicy::Permanent).await.unwrap();
    block.execute("b.com", BlockPolicy::Permanent).await.unwrap();

    assert!(update.execute(&a.id, "a.com", BlockPolicy::Permanent).await.is_ok());
    assert!(matches!(
        update.execute(&a.id, "b.com", BlockPolicy::Permanent).await,
        Err(DomainError::DuplicateHostname(_))
    ));
}

#[tokio::test]
async fn test_unblock_unknown_id_errors() {
    let (store, gateway) = stack();
    let unblock = UnblockSiteUseCase::new(store, gateway);

    assert!(matches!(
        unblock.execute("nope").await,
        Err(DomainError::EntryNotFound(_))
    ));
}

#[tokio::test]
async fn test_get_blocked_sites_lists_current_entries() {
    let (store, gateway) = stack();
    let block = BlockSiteUseCase::new(store.clone(), gateway.clone());
    let list = GetBlockedSitesUseCase::new(store.clone());

    block.execute("a.com", BlockPolicy::Permanent).await.unwrap();
    block.execute("b.com", BlockPolicy::Permanent).await.unwrap();

    let entries = list.execute().await.unwrap();
    let hostnames: Vec<&str> = entries.iter().map(|e| e.hostname.as_str()).collect();
    assert_eq!(hostnames, vec!["a.com", "b.com"]);
}
