use crate::models::{MonthlyPass, PassStatus, PaymentStatus, VehicleType};
use crate::repository::{PassRepository, PassUpdate};
use chrono::{DateTime, Utc};
use parkdesk_core::store::StoreError;
use parkdesk_shared::Masked;
use rand::Rng;
use std::sync::Arc;
use tracing::info;

#[derive(Debug, thiserror::Error)]
pub enum PassError {
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("invalid status transition from {from} to {to}")]
    InvalidTransition {
        from: &'static str,
        to: &'static str,
    },

    #[error("pass not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Operator-entered form input for a new monthly pass.
#[derive(Debug, Clone)]
pub struct NewPassRequest {
    pub user_id: String,
    pub user_name: String,
    pub phone_no: String,
    pub vehicle_number: String,
    pub vehicle_type: VehicleType,
    pub parking_name: String,
    pub amount: i64,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

impl NewPassRequest {
    fn validate(&self) -> Result<(), PassError> {
        let required = [
            ("user_id", &self.user_id),
            ("user_name", &self.user_name),
            ("phone_no", &self.phone_no),
            ("vehicle_number", &self.vehicle_number),
            ("parking_name", &self.parking_name),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(PassError::Validation(format!("{} is required", field)));
            }
        }

        if self.end_date <= self.start_date {
            return Err(PassError::Validation(
                "end date must be after start date".to_string(),
            ));
        }

        Ok(())
    }
}

/// Operator-facing pass operations: creation and status transitions. The
/// sweep's own active→expired correction is system-triggered and shares the
/// same persistence primitive.
pub struct PassService {
    repo: Arc<dyn PassRepository>,
}

impl PassService {
    pub fn new(repo: Arc<dyn PassRepository>) -> Self {
        Self { repo }
    }

    /// Validate the form, synthesize the generated fields, and persist.
    /// Nothing is written when validation fails.
    pub async fn create_pass(
        &self,
        req: NewPassRequest,
        now: DateTime<Utc>,
    ) -> Result<MonthlyPass, PassError> {
        req.validate()?;

        let token_no = rand::thread_rng().gen_range(1000..=9999).to_string();
        let qr_code = format!("QR_{}_{}", req.vehicle_number, now.timestamp_millis());
        let machine_name = format!("{} 1", req.vehicle_type.label());

        let mut pass = MonthlyPass {
            id: String::new(),
            user_id: req.user_id,
            user_name: req.user_name,
            phone_no: Masked::new(req.phone_no),
            vehicle_number: req.vehicle_number,
            vehicle_type: req.vehicle_type,
            parking_name: req.parking_name,
            amount: req.amount,
            start_date: req.start_date,
            end_date: req.end_date,
            status: PassStatus::Active,
            payment_status: PaymentStatus::Paid,
            pass_type: "monthly".to_string(),
            token_no,
            qr_code,
            machine_name,
            created_time: now,
            updated_time: now,
        };

        pass.id = self.repo.insert_pass(&pass).await?;
        info!("Monthly pass added with ID: {}", pass.id);
        Ok(pass)
    }

    /// Operator transitions: active to cancelled, expired to active. The
    /// latter is the bare renewal: status flips, the validity window is
    /// unchanged. `renew_pass` is the dated variant.
    pub async fn transition_status(
        &self,
        pass_id: &str,
        requested: PassStatus,
        now: DateTime<Utc>,
    ) -> Result<(), PassError> {
        let pass = self
            .repo
            .find_pass(pass_id)
            .await?
            .ok_or_else(|| PassError::NotFound(pass_id.to_string()))?;

        match (pass.status, requested) {
            (PassStatus::Active, PassStatus::Cancelled) => {}
            (PassStatus::Expired, PassStatus::Active) => {}
            (from, to) => {
                return Err(PassError::InvalidTransition {
                    from: from.as_str(),
                    to: to.as_str(),
                })
            }
        }

        self.repo
            .update_pass(pass_id, &PassUpdate::status_change(requested, now))
            .await?;
        info!("Monthly pass updated: {}", pass_id);
        Ok(())
    }

    /// Renewal with a fresh validity end: expired→active plus a new
    /// `end_date`, which must lie in the future.
    pub async fn renew_pass(
        &self,
        pass_id: &str,
        new_end: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Result<(), PassError> {
        let pass = self
            .repo
            .find_pass(pass_id)
            .await?
            .ok_or_else(|| PassError::NotFound(pass_id.to_string()))?;

        if pass.status != PassStatus::Expired {
            return Err(PassError::InvalidTransition {
                from: pass.status.as_str(),
                to: PassStatus::Active.as_str(),
            });
        }
        if new_end <= now {
            return Err(PassError::Validation(
                "renewal end date must be in the future".to_string(),
            ));
        }

        self.repo
            .update_pass(pass_id, &PassUpdate::renewal(new_end, now))
            .await?;
        info!("Monthly pass renewed until {}: {}", new_end, pass_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::support::{sample_pass, RecordingRepo};
    use chrono::TimeZone;

    fn date(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    fn request() -> NewPassRequest {
        NewPassRequest {
            user_id: "u-1".to_string(),
            user_name: "Asha Rao".to_string(),
            phone_no: "9876543210".to_string(),
            vehicle_number: "KA01AB1234".to_string(),
            vehicle_type: VehicleType::Car,
            parking_name: "MG Road Lot".to_string(),
            amount: 2500,
            start_date: date(2024, 3, 1),
            end_date: date(2024, 4, 1),
        }
    }

    #[tokio::test]
    async fn test_create_pass_synthesizes_generated_fields() {
        let repo = Arc::new(RecordingRepo::new(vec![]));
        let service = PassService::new(repo.clone());
        let now = date(2024, 3, 1);

        let pass = service.create_pass(request(), now).await.unwrap();

        assert!(!pass.id.is_empty());
        assert_eq!(pass.status, PassStatus::Active);
        assert_eq!(pass.payment_status, PaymentStatus::Paid);
        assert_eq!(pass.pass_type, "monthly");
        assert_eq!(pass.token_no.len(), 4);
        assert!(pass.token_no.chars().all(|c| c.is_ascii_digit()));
        assert!(pass.qr_code.starts_with("QR_KA01AB1234_"));
        assert_eq!(pass.machine_name, "Car 1");
        assert_eq!(pass.created_time, now);
        assert_eq!(pass.updated_time, now);
        assert!(repo.get(&pass.id).is_some());
    }

    #[tokio::test]
    async fn test_create_pass_rejects_inverted_dates_without_persisting() {
        let repo = Arc::new(RecordingRepo::new(vec![]));
        let service = PassService::new(repo.clone());

        let mut req = request();
        req.start_date = date(2024, 3, 1);
        req.end_date = date(2024, 2, 1);

        let err = service.create_pass(req, date(2024, 3, 1)).await.unwrap_err();
        assert!(matches!(err, PassError::Validation(_)));
        assert!(repo.snapshot().is_empty());

        // Equal dates are rejected too.
        let mut req = request();
        req.end_date = req.start_date;
        let err = service.create_pass(req, date(2024, 3, 1)).await.unwrap_err();
        assert!(matches!(err, PassError::Validation(_)));
        assert!(repo.snapshot().is_empty());
    }

    #[tokio::test]
    async fn test_create_pass_rejects_missing_required_fields() {
        let repo = Arc::new(RecordingRepo::new(vec![]));
        let service = PassService::new(repo.clone());

        let mut req = request();
        req.vehicle_number = "  ".to_string();

        let err = service.create_pass(req, date(2024, 3, 1)).await.unwrap_err();
        assert!(matches!(err, PassError::Validation(_)));
        assert!(repo.snapshot().is_empty());
    }

    #[tokio::test]
    async fn test_cancel_requires_active_status() {
        let mut active = sample_pass("p-1");
        active.status = PassStatus::Active;
        let mut expired = sample_pass("p-2");
        expired.status = PassStatus::Expired;
        let mut cancelled = sample_pass("p-3");
        cancelled.status = PassStatus::Cancelled;

        let repo = Arc::new(RecordingRepo::new(vec![active, expired, cancelled]));
        let service = PassService::new(repo.clone());
        let now = date(2024, 3, 1);

        service
            .transition_status("p-1", PassStatus::Cancelled, now)
            .await
            .unwrap();
        assert_eq!(repo.get("p-1").unwrap().status, PassStatus::Cancelled);

        let err = service
            .transition_status("p-2", PassStatus::Cancelled, now)
            .await
            .unwrap_err();
        assert!(matches!(err, PassError::InvalidTransition { .. }));

        let err = service
            .transition_status("p-3", PassStatus::Cancelled, now)
            .await
            .unwrap_err();
        assert!(matches!(err, PassError::InvalidTransition { .. }));
    }

    #[tokio::test]
    async fn test_bare_renewal_flips_status_without_touching_dates() {
        let mut expired = sample_pass("p-1");
        expired.status = PassStatus::Expired;
        let original_end = expired.end_date;

        let repo = Arc::new(RecordingRepo::new(vec![expired]));
        let service = PassService::new(repo.clone());

        service
            .transition_status("p-1", PassStatus::Active, date(2024, 3, 1))
            .await
            .unwrap();

        let renewed = repo.get("p-1").unwrap();
        assert_eq!(renewed.status, PassStatus::Active);
        assert_eq!(renewed.end_date, original_end);
    }

    #[tokio::test]
    async fn test_dated_renewal_requires_expired_and_a_future_end() {
        let mut expired = sample_pass("p-1");
        expired.status = PassStatus::Expired;
        let mut active = sample_pass("p-2");
        active.status = PassStatus::Active;

        let repo = Arc::new(RecordingRepo::new(vec![expired, active]));
        let service = PassService::new(repo.clone());
        let now = date(2024, 3, 1);

        let err = service
            .renew_pass("p-1", date(2024, 2, 1), now)
            .await
            .unwrap_err();
        assert!(matches!(err, PassError::Validation(_)));

        let err = service
            .renew_pass("p-2", date(2024, 4, 1), now)
            .await
            .unwrap_err();
        assert!(matches!(err, PassError::InvalidTransition { .. }));

        service.renew_pass("p-1", date(2024, 4, 1), now).await.unwrap();
        let renewed = repo.get("p-1").unwrap();
        assert_eq!(renewed.status, PassStatus::Active);
        assert_eq!(renewed.end_date, date(2024, 4, 1));
        assert_eq!(renewed.updated_time, now);
    }

    #[tokio::test]
    async fn test_transition_on_unknown_pass_is_not_found() {
        let repo = Arc::new(RecordingRepo::new(vec![]));
        let service = PassService::new(repo);

        let err = service
            .transition_status("missing", PassStatus::Cancelled, date(2024, 3, 1))
            .await
            .unwrap_err();
        assert!(matches!(err, PassError::NotFound(_)));
    }
}
