//! Engine tests against a scripted catalog double.
//!
//! The double records every call so tests can assert not just outcomes but
//! which remote operations were (and were not) issued.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use setsync_catalog::error::{CatalogError, CatalogResult};
use setsync_catalog::ids::{CatalogId, ProductSetId, RetailerId};
use setsync_catalog::payload::ProductSetPayload;
use setsync_catalog::traits::ProductSetOps;

use setsync_engine::{
    CatalogIdentityProvider, Category, CategoryEventHandler, CategoryId, CategoryStore,
    DeleteOutcome, FullSyncRunner, InMemoryThrottleStore, Reconciler, StaticCatalog, SyncError,
    SyncPass, SyncResult, TaxonomyInstanceId, UpsertOutcome,
};

// =============================================================================
// Test Doubles
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
enum Call {
    Read { retailer: String },
    Create { retailer: String, name: String },
    Update { set: String, name: String },
    Delete { set: String, allow_live: bool },
}

/// Scripted catalog double: an in-memory retailer-id → set-id map plus
/// switches for injecting failures.
#[derive(Default)]
struct MockCatalog {
    sets: Mutex<HashMap<String, String>>,
    calls: Mutex<Vec<Call>>,
    fail_reads: AtomicBool,
    fail_deletes: AtomicBool,
    fail_writes_for: Mutex<HashSet<String>>,
    next_id: AtomicU64,
}

impl MockCatalog {
    fn new() -> Self {
        Self::default()
    }

    fn with_existing(self, retailer: &RetailerId, set: &str) -> Self {
        self.sets
            .lock()
            .unwrap()
            .insert(retailer.as_str().to_string(), set.to_string());
        self
    }

    fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    fn fail_deletes(&self, fail: bool) {
        self.fail_deletes.store(fail, Ordering::SeqCst);
    }

    fn fail_writes_for(&self, retailer: &RetailerId) {
        self.fail_writes_for
            .lock()
            .unwrap()
            .insert(retailer.as_str().to_string());
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn create_calls(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, Call::Create { .. }))
            .count()
    }

    fn update_calls(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, Call::Update { .. }))
            .count()
    }

    fn delete_calls(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, Call::Delete { .. }))
            .count()
    }
}

#[async_trait]
impl ProductSetOps for MockCatalog {
    async fn read(
        &self,
        _catalog: &CatalogId,
        retailer: &RetailerId,
    ) -> CatalogResult<Option<ProductSetId>> {
        self.calls.lock().unwrap().push(Call::Read {
            retailer: retailer.as_str().to_string(),
        });

        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(CatalogError::connection_failed("read refused"));
        }

        Ok(self
            .sets
            .lock()
            .unwrap()
            .get(retailer.as_str())
            .map(|id| ProductSetId::new(id.clone())))
    }

    async fn create(
        &self,
        _catalog: &CatalogId,
        payload: &ProductSetPayload,
    ) -> CatalogResult<ProductSetId> {
        self.calls.lock().unwrap().push(Call::Create {
            retailer: payload.retailer_id.as_str().to_string(),
            name: payload.name.clone(),
        });

        if self
            .fail_writes_for
            .lock()
            .unwrap()
            .contains(payload.retailer_id.as_str())
        {
            return Err(CatalogError::unavailable("create rejected"));
        }

        let id = format!("set-{}", self.next_id.fetch_add(1, Ordering::SeqCst) + 1);
        self.sets
            .lock()
            .unwrap()
            .insert(payload.retailer_id.as_str().to_string(), id.clone());
        Ok(ProductSetId::new(id))
    }

    async fn update(&self, set: &ProductSetId, payload: &ProductSetPayload) -> CatalogResult<()> {
        self.calls.lock().unwrap().push(Call::Update {
            set: set.as_str().to_string(),
            name: payload.name.clone(),
        });

        if self
            .fail_writes_for
            .lock()
            .unwrap()
            .contains(payload.retailer_id.as_str())
        {
            return Err(CatalogError::unavailable("update rejected"));
        }

        Ok(())
    }

    async fn delete(&self, set: &ProductSetId, allow_live_deletion: bool) -> CatalogResult<()> {
        self.calls.lock().unwrap().push(Call::Delete {
            set: set.as_str().to_string(),
            allow_live: allow_live_deletion,
        });

        if self.fail_deletes.load(Ordering::SeqCst) {
            return Err(CatalogError::unavailable("delete rejected"));
        }

        self.sets
            .lock()
            .unwrap()
            .retain(|_, id| id != set.as_str());
        Ok(())
    }
}

/// Fixed category list with an enumeration counter.
struct VecStore {
    categories: Vec<Category>,
    enumerations: AtomicUsize,
}

impl VecStore {
    fn new(categories: Vec<Category>) -> Self {
        Self {
            categories,
            enumerations: AtomicUsize::new(0),
        }
    }

    fn enumerations(&self) -> usize {
        self.enumerations.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CategoryStore for VecStore {
    async fn list_categories(&self) -> SyncResult<Vec<Category>> {
        self.enumerations.fetch_add(1, Ordering::SeqCst);
        Ok(self.categories.clone())
    }
}

struct FailingStore;

#[async_trait]
impl CategoryStore for FailingStore {
    async fn list_categories(&self) -> SyncResult<Vec<Category>> {
        Err(SyncError::store("taxonomy unavailable"))
    }
}

struct NoCatalog;

#[async_trait]
impl CatalogIdentityProvider for NoCatalog {
    async fn catalog_id(&self) -> SyncResult<CatalogId> {
        Err(SyncError::missing_catalog("installation not connected"))
    }
}

// =============================================================================
// Helpers
// =============================================================================

fn category(id: i64, name: &str) -> Category {
    Category {
        id: CategoryId::new(id),
        instance_id: TaxonomyInstanceId::new(),
        name: name.to_string(),
        description: String::new(),
        url: String::new(),
        thumbnail_url: None,
    }
}

fn reconciler(catalog: Arc<MockCatalog>) -> Arc<Reconciler> {
    Arc::new(Reconciler::new(
        catalog,
        Arc::new(StaticCatalog::new(CatalogId::new("catalog-1"))),
    ))
}

// =============================================================================
// Upsert
// =============================================================================

#[tokio::test]
async fn test_upsert_creates_when_unlinked() {
    let catalog = Arc::new(MockCatalog::new());
    let cat = category(1, "Shoes");

    let outcome = reconciler(catalog.clone()).upsert(&cat).await.unwrap();

    assert!(matches!(outcome, UpsertOutcome::Created(_)));
    assert_eq!(catalog.create_calls(), 1);
    assert_eq!(catalog.update_calls(), 0);
}

#[tokio::test]
async fn test_upsert_updates_when_linked() {
    let cat = category(1, "Shoes");
    let catalog = Arc::new(MockCatalog::new().with_existing(&cat.retailer_id(), "set-existing"));

    let outcome = reconciler(catalog.clone()).upsert(&cat).await.unwrap();

    assert_eq!(
        outcome,
        UpsertOutcome::Updated(ProductSetId::new("set-existing"))
    );
    assert_eq!(catalog.create_calls(), 0);
    assert_eq!(
        catalog.calls().last(),
        Some(&Call::Update {
            set: "set-existing".to_string(),
            name: "Shoes".to_string(),
        })
    );
}

#[tokio::test]
async fn test_upsert_twice_is_idempotent() {
    let catalog = Arc::new(MockCatalog::new());
    let cat = category(1, "Shoes");
    let reconciler = reconciler(catalog.clone());

    let first = reconciler.upsert(&cat).await.unwrap();
    let second = reconciler.upsert(&cat).await.unwrap();

    // One remote set, created once, updated the second time.
    assert!(matches!(first, UpsertOutcome::Created(_)));
    assert!(matches!(second, UpsertOutcome::Updated(_)));
    assert_eq!(second.set_id(), first.set_id());
    assert_eq!(catalog.create_calls(), 1);
    assert_eq!(catalog.sets.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_rename_updates_same_set() {
    let catalog = Arc::new(MockCatalog::new());
    let mut cat = category(1, "Shoes");
    let reconciler = reconciler(catalog.clone());

    let created = reconciler.upsert(&cat).await.unwrap();

    cat.name = "Footwear".to_string();
    let renamed = reconciler.upsert(&cat).await.unwrap();

    assert_eq!(renamed.set_id(), created.set_id());
    assert_eq!(catalog.create_calls(), 1);
    assert_eq!(
        catalog.calls().last(),
        Some(&Call::Update {
            set: created.set_id().as_str().to_string(),
            name: "Footwear".to_string(),
        })
    );
}

#[tokio::test]
async fn test_upsert_propagates_read_failure_without_writing() {
    let catalog = Arc::new(MockCatalog::new());
    catalog.fail_reads(true);
    let cat = category(1, "Shoes");

    let err = reconciler(catalog.clone()).upsert(&cat).await.unwrap_err();

    // A failed lookup is never treated as not-found: no create, no update.
    assert!(matches!(err, SyncError::Lookup { .. }));
    assert!(err.is_retryable());
    assert_eq!(catalog.create_calls(), 0);
    assert_eq!(catalog.update_calls(), 0);
}

#[tokio::test]
async fn test_upsert_propagates_write_failure() {
    let catalog = Arc::new(MockCatalog::new());
    let cat = category(1, "Shoes");
    catalog.fail_writes_for(&cat.retailer_id());

    let err = reconciler(catalog.clone()).upsert(&cat).await.unwrap_err();

    assert!(matches!(err, SyncError::Write { .. }));
    assert_eq!(err.error_code(), "TARGET_UNAVAILABLE");
}

#[tokio::test]
async fn test_upsert_requires_catalog_identity() {
    let catalog = Arc::new(MockCatalog::new());
    let reconciler = Reconciler::new(catalog.clone(), Arc::new(NoCatalog));
    let cat = category(1, "Shoes");

    let err = reconciler.upsert(&cat).await.unwrap_err();

    assert!(matches!(err, SyncError::MissingCatalog { .. }));
    assert!(catalog.calls().is_empty());
}

// =============================================================================
// Delete
// =============================================================================

#[tokio::test]
async fn test_delete_noop_when_unlinked() {
    let catalog = Arc::new(MockCatalog::new());
    let identity = category(1, "Shoes").identity();

    let outcome = reconciler(catalog.clone()).delete(&identity).await;

    assert_eq!(outcome, DeleteOutcome::NotLinked);
    assert_eq!(catalog.delete_calls(), 0);
}

#[tokio::test]
async fn test_delete_forces_removal_of_linked_set() {
    let cat = category(1, "Shoes");
    let catalog = Arc::new(MockCatalog::new().with_existing(&cat.retailer_id(), "set-1"));

    let outcome = reconciler(catalog.clone()).delete(&cat.identity()).await;

    assert_eq!(outcome, DeleteOutcome::Deleted(ProductSetId::new("set-1")));
    assert_eq!(
        catalog.calls().last(),
        Some(&Call::Delete {
            set: "set-1".to_string(),
            allow_live: true,
        })
    );
}

#[tokio::test]
async fn test_delete_absorbs_remote_failure() {
    let cat = category(1, "Shoes");
    let catalog = Arc::new(MockCatalog::new().with_existing(&cat.retailer_id(), "set-1"));
    catalog.fail_deletes(true);

    let outcome = reconciler(catalog.clone()).delete(&cat.identity()).await;

    assert_eq!(outcome, DeleteOutcome::Failed);
}

#[tokio::test]
async fn test_delete_absorbs_lookup_failure() {
    let catalog = Arc::new(MockCatalog::new());
    catalog.fail_reads(true);

    let outcome = reconciler(catalog.clone())
        .delete(&category(1, "Shoes").identity())
        .await;

    assert_eq!(outcome, DeleteOutcome::Failed);
    assert_eq!(catalog.delete_calls(), 0);
}

// =============================================================================
// Event handler boundary
// =============================================================================

#[tokio::test]
async fn test_event_handler_absorbs_sync_failures() {
    let catalog = Arc::new(MockCatalog::new());
    catalog.fail_reads(true);
    let handler = CategoryEventHandler::new(reconciler(catalog.clone()));

    // Must not panic or propagate: the mutation already happened locally.
    handler.on_category_created(&category(1, "Shoes")).await;
    handler.on_category_updated(&category(2, "Hats")).await;
    handler
        .on_category_deleted(&category(3, "Socks").identity())
        .await;
}

#[tokio::test]
async fn test_event_handler_delegates_upsert() {
    let catalog = Arc::new(MockCatalog::new());
    let handler = CategoryEventHandler::new(reconciler(catalog.clone()));

    handler.on_category_created(&category(1, "Shoes")).await;

    assert_eq!(catalog.create_calls(), 1);
}

// =============================================================================
// Full sync
// =============================================================================

fn runner(
    catalog: Arc<MockCatalog>,
    store: Arc<VecStore>,
    throttle: Arc<InMemoryThrottleStore>,
) -> FullSyncRunner {
    FullSyncRunner::new(reconciler(catalog), store, throttle)
}

#[tokio::test]
async fn test_full_sync_reconciles_every_category() {
    let existing = category(2, "Hats");
    let catalog = Arc::new(MockCatalog::new().with_existing(&existing.retailer_id(), "set-hats"));
    let store = Arc::new(VecStore::new(vec![category(1, "Shoes"), existing]));
    let throttle = Arc::new(InMemoryThrottleStore::new());

    let pass = runner(catalog.clone(), store, throttle)
        .run_if_due()
        .await
        .unwrap();

    let SyncPass::Completed(report) = pass else {
        panic!("Expected a completed pass");
    };
    assert_eq!(report.total, 2);
    assert_eq!(report.created, 1);
    assert_eq!(report.updated, 1);
    assert_eq!(report.failed, 0);
}

#[tokio::test]
async fn test_full_sync_throttles_second_trigger() {
    let catalog = Arc::new(MockCatalog::new());
    let store = Arc::new(VecStore::new(vec![category(1, "Shoes")]));
    let throttle = Arc::new(InMemoryThrottleStore::new());
    let runner = runner(catalog, store.clone(), throttle);

    let first = runner.run_if_due().await.unwrap();
    let second = runner.run_if_due().await.unwrap();

    assert!(matches!(first, SyncPass::Completed(_)));
    assert_eq!(second, SyncPass::Throttled);
    assert_eq!(store.enumerations(), 1);
}

#[tokio::test]
async fn test_full_sync_runs_again_after_ttl_expiry() {
    let catalog = Arc::new(MockCatalog::new());
    let store = Arc::new(VecStore::new(vec![category(1, "Shoes")]));
    let throttle = Arc::new(InMemoryThrottleStore::new());
    let runner = runner(catalog, store.clone(), throttle)
        .with_throttle_ttl(Duration::from_millis(30));

    assert!(matches!(
        runner.run_if_due().await.unwrap(),
        SyncPass::Completed(_)
    ));

    tokio::time::sleep(Duration::from_millis(60)).await;

    assert!(matches!(
        runner.run_if_due().await.unwrap(),
        SyncPass::Completed(_)
    ));
    assert_eq!(store.enumerations(), 2);
}

#[tokio::test]
async fn test_full_sync_isolates_per_category_failures() {
    let failing = category(2, "Hats");
    let catalog = Arc::new(MockCatalog::new());
    catalog.fail_writes_for(&failing.retailer_id());
    let store = Arc::new(VecStore::new(vec![
        category(3, "Socks"),
        failing,
        category(1, "Shoes"),
    ]));
    let throttle = Arc::new(InMemoryThrottleStore::new());

    let pass = runner(catalog.clone(), store, throttle)
        .run_if_due()
        .await
        .unwrap();

    let SyncPass::Completed(report) = pass else {
        panic!("Expected a completed pass");
    };

    // The failure in the middle did not stop the categories after it.
    assert_eq!(report.total, 3);
    assert_eq!(report.created, 2);
    assert_eq!(report.failed, 1);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].name, "Hats");
    assert_eq!(report.failures[0].error_code, "TARGET_UNAVAILABLE");
    assert_eq!(catalog.create_calls(), 3);
}

#[tokio::test]
async fn test_full_sync_processes_in_ascending_id_order() {
    let a = category(5, "Shoes");
    let b = category(2, "Hats");
    let c = category(9, "Socks");
    let expected = vec![
        b.retailer_id().as_str().to_string(),
        a.retailer_id().as_str().to_string(),
        c.retailer_id().as_str().to_string(),
    ];

    let catalog = Arc::new(MockCatalog::new());
    let store = Arc::new(VecStore::new(vec![a, b, c]));
    let throttle = Arc::new(InMemoryThrottleStore::new());

    runner(catalog.clone(), store, throttle)
        .run_if_due()
        .await
        .unwrap();

    let reads: Vec<String> = catalog
        .calls()
        .into_iter()
        .filter_map(|c| match c {
            Call::Read { retailer } => Some(retailer),
            _ => None,
        })
        .collect();
    assert_eq!(reads, expected);
}

#[tokio::test]
async fn test_full_sync_claims_window_before_enumerating() {
    let catalog = Arc::new(MockCatalog::new());
    let throttle = Arc::new(InMemoryThrottleStore::new());
    let reconciler = reconciler(catalog);
    let runner = FullSyncRunner::new(reconciler.clone(), Arc::new(FailingStore), throttle.clone());

    // The pass itself fails, but the window is already claimed.
    assert!(runner.run_if_due().await.is_err());

    let store = Arc::new(VecStore::new(vec![category(1, "Shoes")]));
    let retry = FullSyncRunner::new(reconciler, store.clone(), throttle);
    assert_eq!(retry.run_if_due().await.unwrap(), SyncPass::Throttled);
    assert_eq!(store.enumerations(), 0);
}

#[tokio::test]
async fn test_daily_tick_never_panics() {
    let catalog = Arc::new(MockCatalog::new());
    catalog.fail_reads(true);
    let store = Arc::new(VecStore::new(vec![category(1, "Shoes")]));
    let throttle = Arc::new(InMemoryThrottleStore::new());
    let runner = runner(catalog, store, throttle);

    runner.on_daily_tick().await;
    runner.on_daily_tick().await;
}
