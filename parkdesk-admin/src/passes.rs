use crate::records::format_date;
use chrono::{DateTime, Utc};
use parkdesk_core::store::StoreError;
use parkdesk_pass::{
    display_status, filter_by_status, DisplayStatus, LifecycleSweep, MonthlyPass,
    PassRepository, StatusFilter,
};
use std::sync::Arc;
use tracing::info;

/// Badge color family for a status chip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeTone {
    Success,
    Danger,
    Muted,
    Warning,
}

/// A lapsed-but-unswept active pass takes the expired tone: the badge
/// follows display status, never the raw persisted field.
pub fn badge_tone(status: DisplayStatus) -> BadgeTone {
    match status {
        DisplayStatus::Active => BadgeTone::Success,
        DisplayStatus::Expired => BadgeTone::Danger,
        DisplayStatus::Cancelled => BadgeTone::Muted,
        DisplayStatus::Unknown => BadgeTone::Warning,
    }
}

/// Render-ready card for one pass.
#[derive(Debug, Clone)]
pub struct PassCard {
    pub id: String,
    pub user_name: String,
    pub phone_no: String,
    pub vehicle_number: String,
    pub vehicle_type: &'static str,
    pub parking_name: String,
    pub amount: i64,
    pub valid_from: String,
    pub valid_till: String,
    pub token_no: String,
    pub shown_status: DisplayStatus,
    pub badge: BadgeTone,
}

/// Drives the passes view. Every refresh loads the collection, runs the
/// lifecycle sweep against wall-clock now, and reloads once when the sweep
/// persisted corrections.
pub struct PassBoard {
    repo: Arc<dyn PassRepository>,
    sweep: LifecycleSweep,
}

impl PassBoard {
    pub fn new(repo: Arc<dyn PassRepository>) -> Self {
        Self {
            sweep: LifecycleSweep::new(repo.clone()),
            repo,
        }
    }

    pub async fn refresh(&self, now: DateTime<Utc>) -> Result<Vec<MonthlyPass>, StoreError> {
        let passes = self.repo.list_passes().await?;

        let outcome = self.sweep.sweep_expired(&passes, now).await;
        if outcome.needs_refresh() {
            info!("Sweep expired {} passes, reloading", outcome.updated.len());
            return self.repo.list_passes().await;
        }

        Ok(passes)
    }

    /// Filtered view models. Filtering matches the persisted status; the
    /// card itself shows the date-aware display status.
    pub fn cards(
        &self,
        passes: &[MonthlyPass],
        filter: StatusFilter,
        now: DateTime<Utc>,
    ) -> Vec<PassCard> {
        filter_by_status(passes, filter)
            .into_iter()
            .map(|pass| {
                let shown = display_status(pass, now);
                PassCard {
                    id: pass.id.clone(),
                    user_name: if pass.user_name.is_empty() {
                        "Unknown User".to_string()
                    } else {
                        pass.user_name.clone()
                    },
                    phone_no: pass.phone_no.inner().clone(),
                    vehicle_number: pass.vehicle_number.clone(),
                    vehicle_type: pass.vehicle_type.label(),
                    parking_name: pass.parking_name.clone(),
                    amount: pass.amount,
                    valid_from: format_date(Some(pass.start_date)),
                    valid_till: format_date(Some(pass.end_date)),
                    token_no: pass.token_no.clone(),
                    shown_status: shown,
                    badge: badge_tone(shown),
                }
            })
            .collect()
    }
}
