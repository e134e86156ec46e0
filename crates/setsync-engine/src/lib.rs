//! # Product-Set Sync Engine
//!
//! One-way reconciliation keeping a remote catalog's product sets in line
//! with the local category taxonomy.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────┐     ┌──────────────┐     ┌──────────────────┐
//! │ Taxonomy store │────►│    Event     │────►│    Reconciler    │
//! │  (mutations)   │     │   handler    │     │ (read-then-write)│
//! └────────────────┘     └──────────────┘     └────────┬─────────┘
//!                                                      │
//! ┌────────────────┐     ┌──────────────┐              ▼
//! │  Daily tick    │────►│  Full sync   │────►┌──────────────────┐
//! │                │     │  (throttled) │     │  Catalog client  │
//! └────────────────┘     └──────────────┘     └──────────────────┘
//! ```
//!
//! Both triggers drive the same per-category upsert, so the event path and
//! the repair path share one correctness contract: resolve linkage by
//! retailer id, then create or full-replace — never create twice.
//!
//! ## Example
//!
//! ```ignore
//! use setsync_engine::{CategoryEventHandler, FullSyncRunner, Reconciler, StaticCatalog};
//! use setsync_engine::throttle::InMemoryThrottleStore;
//!
//! let reconciler = Arc::new(Reconciler::new(client, Arc::new(StaticCatalog::new(catalog))));
//! let events = CategoryEventHandler::new(reconciler.clone());
//! let full_sync = FullSyncRunner::new(reconciler, store, Arc::new(InMemoryThrottleStore::new()));
//!
//! events.on_category_updated(&category).await;
//! full_sync.on_daily_tick().await;
//! ```

pub mod category;
pub mod error;
pub mod events;
pub mod full_sync;
pub mod reconciler;
pub mod throttle;
pub mod traits;

// Re-exports for convenience
pub use category::{Category, CategoryId, CategoryIdentity, TaxonomyInstanceId};
pub use error::{SyncError, SyncResult, WriteOperation};
pub use events::CategoryEventHandler;
pub use full_sync::{FullSyncRunner, SyncFailure, SyncPass, SyncReport, THROTTLE_KEY, THROTTLE_TTL};
pub use reconciler::{DeleteOutcome, Reconciler, UpsertOutcome};
pub use throttle::{InMemoryThrottleStore, ThrottleStore};
pub use traits::{CatalogIdentityProvider, CategoryStore, StaticCatalog};
