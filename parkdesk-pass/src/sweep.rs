use crate::lifecycle::{display_status, DisplayStatus};
use crate::models::{MonthlyPass, PassStatus};
use crate::repository::{PassRepository, PassUpdate};
use chrono::{DateTime, Utc};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{error, info};

/// Reconciles the persisted status of monthly passes with wall-clock
/// reality. Runs on every refresh of the passes view; overlapping sweeps
/// over stale snapshots are tolerated because the correction is idempotent.
pub struct LifecycleSweep {
    repo: Arc<dyn PassRepository>,
}

#[derive(Debug, Default)]
pub struct SweepOutcome {
    pub updated: HashSet<String>,
    pub failed: Vec<String>,
}

impl SweepOutcome {
    /// True when at least one correction was persisted and the caller
    /// should reload its view of the collection.
    pub fn needs_refresh(&self) -> bool {
        !self.updated.is_empty()
    }
}

impl LifecycleSweep {
    pub fn new(repo: Arc<dyn PassRepository>) -> Self {
        Self { repo }
    }

    /// Select every pass still persisted as active whose validity ended
    /// before `now` and flip it to expired. Updates are independent and
    /// best-effort: one failure is logged and does not block the rest.
    pub async fn sweep_expired(
        &self,
        passes: &[MonthlyPass],
        now: DateTime<Utc>,
    ) -> SweepOutcome {
        let mut outcome = SweepOutcome::default();
        let mut selected: HashSet<&str> = HashSet::new();

        for pass in passes {
            if pass.status != PassStatus::Active
                || display_status(pass, now) != DisplayStatus::Expired
            {
                continue;
            }
            // One update per identifier per invocation, even when the
            // snapshot carries duplicates.
            if pass.id.is_empty() || !selected.insert(pass.id.as_str()) {
                continue;
            }

            match self
                .repo
                .update_pass(&pass.id, &PassUpdate::expired_at(now))
                .await
            {
                Ok(()) => {
                    info!("Pass {} marked expired", pass.id);
                    outcome.updated.insert(pass.id.clone());
                }
                Err(err) => {
                    error!("Error updating expired pass {}: {}", pass.id, err);
                    outcome.failed.push(pass.id.clone());
                }
            }
        }

        outcome
    }
}
