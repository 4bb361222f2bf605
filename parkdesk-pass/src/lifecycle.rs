use crate::models::{MonthlyPass, PassStatus};
use chrono::{DateTime, Utc};

/// Presentation-only status, computed at read time. An `active` pass whose
/// validity already ended shows as expired until a sweep persists the
/// correction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayStatus {
    Active,
    Expired,
    Cancelled,
    Unknown,
}

impl DisplayStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DisplayStatus::Active => "active",
            DisplayStatus::Expired => "expired",
            DisplayStatus::Cancelled => "cancelled",
            DisplayStatus::Unknown => "unknown",
        }
    }
}

/// Pure derivation over `(status, end_date, now)`. Both the badge renderer
/// and the lifecycle sweep go through here so the two can never diverge.
pub fn display_status(pass: &MonthlyPass, now: DateTime<Utc>) -> DisplayStatus {
    match pass.status {
        PassStatus::Active if pass.end_date < now => DisplayStatus::Expired,
        PassStatus::Active => DisplayStatus::Active,
        PassStatus::Expired => DisplayStatus::Expired,
        PassStatus::Cancelled => DisplayStatus::Cancelled,
        PassStatus::Unknown => DisplayStatus::Unknown,
    }
}

/// Operator filter over the pass list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Active,
    Expired,
    Cancelled,
}

/// Subsequence matching the filter, in input order. Matches the *persisted*
/// status field, not the display status: a date-lapsed pass the sweep has
/// not corrected yet still counts as active here.
pub fn filter_by_status(passes: &[MonthlyPass], filter: StatusFilter) -> Vec<&MonthlyPass> {
    let wanted = match filter {
        StatusFilter::All => return passes.iter().collect(),
        StatusFilter::Active => PassStatus::Active,
        StatusFilter::Expired => PassStatus::Expired,
        StatusFilter::Cancelled => PassStatus::Cancelled,
    };

    passes.iter().filter(|p| p.status == wanted).collect()
}
