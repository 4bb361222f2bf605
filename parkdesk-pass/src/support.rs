//! In-memory `PassRepository` double shared by the unit tests.

use crate::models::{MonthlyPass, PassStatus, PaymentStatus, VehicleType};
use crate::repository::{PassRepository, PassUpdate};
use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use parkdesk_core::store::StoreError;
use parkdesk_shared::Masked;
use std::collections::{BTreeMap, HashSet};
use std::sync::Mutex;

pub(crate) fn sample_pass(id: &str) -> MonthlyPass {
    MonthlyPass {
        id: id.to_string(),
        user_id: "u-1".to_string(),
        user_name: "Asha Rao".to_string(),
        phone_no: Masked::new("9876543210".to_string()),
        vehicle_number: "KA01AB1234".to_string(),
        vehicle_type: VehicleType::Car,
        parking_name: "MG Road Lot".to_string(),
        amount: 2500,
        start_date: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        end_date: Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap(),
        status: PassStatus::Active,
        payment_status: PaymentStatus::Paid,
        pass_type: "monthly".to_string(),
        token_no: "4821".to_string(),
        qr_code: "QR_KA01AB1234_1704067200000".to_string(),
        machine_name: "Car 1".to_string(),
        created_time: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        updated_time: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
    }
}

pub(crate) struct RecordingRepo {
    passes: Mutex<BTreeMap<String, MonthlyPass>>,
    fail_ids: HashSet<String>,
    updates: Mutex<Vec<String>>,
}

impl RecordingRepo {
    pub fn new(passes: Vec<MonthlyPass>) -> Self {
        let map = passes.into_iter().map(|p| (p.id.clone(), p)).collect();
        Self {
            passes: Mutex::new(map),
            fail_ids: HashSet::new(),
            updates: Mutex::new(Vec::new()),
        }
    }

    /// Injects a backend failure for updates to the given identifier.
    pub fn failing(mut self, id: &str) -> Self {
        self.fail_ids.insert(id.to_string());
        self
    }

    pub fn get(&self, id: &str) -> Option<MonthlyPass> {
        self.passes.lock().unwrap().get(id).cloned()
    }

    pub fn snapshot(&self) -> Vec<MonthlyPass> {
        self.passes.lock().unwrap().values().cloned().collect()
    }

    pub fn update_count(&self) -> usize {
        self.updates.lock().unwrap().len()
    }
}

#[async_trait]
impl PassRepository for RecordingRepo {
    async fn list_passes(&self) -> Result<Vec<MonthlyPass>, StoreError> {
        Ok(self.snapshot())
    }

    async fn list_by_status(&self, status: PassStatus) -> Result<Vec<MonthlyPass>, StoreError> {
        Ok(self
            .snapshot()
            .into_iter()
            .filter(|p| p.status == status)
            .collect())
    }

    async fn find_pass(&self, id: &str) -> Result<Option<MonthlyPass>, StoreError> {
        Ok(self.get(id))
    }

    async fn insert_pass(&self, pass: &MonthlyPass) -> Result<String, StoreError> {
        let mut passes = self.passes.lock().unwrap();
        let id = format!("gen-{}", passes.len() + 1);
        let mut stored = pass.clone();
        stored.id = id.clone();
        passes.insert(id.clone(), stored);
        Ok(id)
    }

    async fn update_pass(&self, id: &str, update: &PassUpdate) -> Result<(), StoreError> {
        if self.fail_ids.contains(id) {
            return Err(StoreError::backend("monthly_passes", "injected failure"));
        }

        let mut passes = self.passes.lock().unwrap();
        let pass = passes.get_mut(id).ok_or_else(|| StoreError::NotFound {
            collection: "monthly_passes".to_string(),
            id: id.to_string(),
        })?;

        if let Some(status) = update.status {
            pass.status = status;
        }
        if let Some(end_date) = update.end_date {
            pass.end_date = end_date;
        }
        if let Some(updated_time) = update.updated_time {
            pass.updated_time = updated_time;
        }

        self.updates.lock().unwrap().push(id.to_string());
        Ok(())
    }
}
