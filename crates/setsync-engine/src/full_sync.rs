//! Throttled full reconciliation pass.
//!
//! Repairs missed or out-of-order updates by driving every category through
//! the same upsert path the event handlers use. At most one pass per
//! throttle window; the flag is set before any category is processed so a
//! slow pass or a mid-pass crash cannot admit a concurrent second pass.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::category::CategoryId;
use crate::error::SyncResult;
use crate::reconciler::{Reconciler, UpsertOutcome};
use crate::throttle::ThrottleStore;
use crate::traits::CategoryStore;

/// Flag key gating the pass.
pub const THROTTLE_KEY: &str = "product_sets_sync_throttle";

/// Slightly under 24 hours, so a daily tick lands after expiry.
pub const THROTTLE_TTL: Duration = Duration::from_secs(84_600);

/// One category the pass could not reconcile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncFailure {
    /// Store-local id of the category.
    pub category_id: CategoryId,
    /// Display name at the time of the pass.
    pub name: String,
    /// Classification of the failure.
    pub error_code: String,
}

/// Counters for one completed pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncReport {
    /// Categories enumerated.
    pub total: usize,
    /// Remote sets created.
    pub created: usize,
    /// Remote sets updated.
    pub updated: usize,
    /// Categories that failed and were skipped.
    pub failed: usize,
    /// Per-category failure records.
    pub failures: Vec<SyncFailure>,
    /// When the pass started.
    pub started_at: DateTime<Utc>,
    /// When the pass finished.
    pub finished_at: DateTime<Utc>,
}

/// Outcome of a full-sync trigger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncPass {
    /// A pass already ran inside the current window; nothing was enumerated.
    Throttled,
    /// The pass ran to completion over every category.
    Completed(SyncReport),
}

/// Drives the throttled pass over all local categories.
pub struct FullSyncRunner {
    reconciler: Arc<Reconciler>,
    store: Arc<dyn CategoryStore>,
    throttle: Arc<dyn ThrottleStore>,
    throttle_ttl: Duration,
}

impl FullSyncRunner {
    /// Create a runner with the default throttle window.
    pub fn new(
        reconciler: Arc<Reconciler>,
        store: Arc<dyn CategoryStore>,
        throttle: Arc<dyn ThrottleStore>,
    ) -> Self {
        Self {
            reconciler,
            store,
            throttle,
            throttle_ttl: THROTTLE_TTL,
        }
    }

    /// Override the throttle window.
    #[must_use]
    pub fn with_throttle_ttl(mut self, ttl: Duration) -> Self {
        self.throttle_ttl = ttl;
        self
    }

    /// Scheduled trigger entry point.
    ///
    /// Outermost boundary for the batch path: logs the outcome and never
    /// propagates, matching the event handlers' contract toward the host
    /// scheduler.
    #[instrument(skip(self))]
    pub async fn on_daily_tick(&self) {
        match self.run_if_due().await {
            Ok(SyncPass::Throttled) => debug!("Full sync throttled, skipping"),
            Ok(SyncPass::Completed(report)) => info!(
                total = report.total,
                created = report.created,
                updated = report.updated,
                failed = report.failed,
                "Full sync pass completed"
            ),
            Err(e) => warn!(
                error = %e,
                error_code = e.error_code(),
                "Full sync pass could not run"
            ),
        }
    }

    /// Run a pass unless one already ran inside the current window.
    ///
    /// Per-category failures are recorded and do not abort the loop; only
    /// failures that preclude the pass itself (store enumeration, missing
    /// catalog surfacing through every upsert) reach the caller as `Err`.
    pub async fn run_if_due(&self) -> SyncResult<SyncPass> {
        if self.throttle.get(THROTTLE_KEY).await.is_some() {
            return Ok(SyncPass::Throttled);
        }

        // Claim the window before any category work so a slow pass cannot
        // be doubled by the next trigger.
        self.throttle.set(THROTTLE_KEY, "1", self.throttle_ttl).await;

        let started_at = Utc::now();
        let mut categories = self.store.list_categories().await?;
        categories.sort_by_key(|c| c.id);

        info!(count = categories.len(), "Starting full sync pass");

        let mut report = SyncReport {
            total: categories.len(),
            created: 0,
            updated: 0,
            failed: 0,
            failures: Vec::new(),
            started_at,
            finished_at: started_at,
        };

        for category in &categories {
            match self.reconciler.upsert(category).await {
                Ok(UpsertOutcome::Created(_)) => report.created += 1,
                Ok(UpsertOutcome::Updated(_)) => report.updated += 1,
                Err(e) => {
                    warn!(
                        category_id = %category.id,
                        name = %category.name,
                        error = %e,
                        error_code = e.error_code(),
                        "Category failed during full sync, continuing"
                    );
                    report.failed += 1;
                    report.failures.push(SyncFailure {
                        category_id: category.id,
                        name: category.name.clone(),
                        error_code: e.error_code().to_string(),
                    });
                }
            }
        }

        report.finished_at = Utc::now();
        Ok(SyncPass::Completed(report))
    }
}
