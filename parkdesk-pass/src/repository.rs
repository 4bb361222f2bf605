use crate::models::{MonthlyPass, PassStatus};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parkdesk_core::store::StoreError;
use parkdesk_shared::timestamp;
use serde::Serialize;

/// Partial record for pass mutations. Only set fields reach the store; the
/// update is a shallow field merge on the backend.
#[derive(Debug, Clone, Serialize)]
pub struct PassUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<PassStatus>,
    #[serde(with = "timestamp::opt", skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(with = "timestamp::opt", skip_serializing_if = "Option::is_none")]
    pub updated_time: Option<DateTime<Utc>>,
}

impl PassUpdate {
    /// The sweep's correction: flip to expired, stamp the update instant.
    pub fn expired_at(now: DateTime<Utc>) -> Self {
        Self::status_change(PassStatus::Expired, now)
    }

    pub fn status_change(status: PassStatus, now: DateTime<Utc>) -> Self {
        Self {
            status: Some(status),
            end_date: None,
            updated_time: Some(now),
        }
    }

    /// Dated renewal: back to active with a fresh validity end.
    pub fn renewal(new_end: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        Self {
            status: Some(PassStatus::Active),
            end_date: Some(new_end),
            updated_time: Some(now),
        }
    }
}

/// Persistence port for monthly passes, implemented over the hosted
/// document store in `parkdesk-store`.
#[async_trait]
pub trait PassRepository: Send + Sync {
    async fn list_passes(&self) -> Result<Vec<MonthlyPass>, StoreError>;

    async fn list_by_status(&self, status: PassStatus) -> Result<Vec<MonthlyPass>, StoreError>;

    async fn find_pass(&self, id: &str) -> Result<Option<MonthlyPass>, StoreError>;

    /// Returns the generated document identifier.
    async fn insert_pass(&self, pass: &MonthlyPass) -> Result<String, StoreError>;

    async fn update_pass(&self, id: &str, update: &PassUpdate) -> Result<(), StoreError>;
}
