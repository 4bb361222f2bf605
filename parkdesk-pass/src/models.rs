use chrono::{DateTime, Utc};
use parkdesk_core::store::Document;
use parkdesk_shared::{timestamp, Masked};
use serde::{Deserialize, Serialize};

/// Persisted pass status. Records written by older tooling may carry values
/// outside this set; they decode as `Unknown` instead of failing the read.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PassStatus {
    Active,
    Expired,
    Cancelled,
    #[default]
    #[serde(other)]
    Unknown,
}

impl PassStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PassStatus::Active => "active",
            PassStatus::Expired => "expired",
            PassStatus::Cancelled => "cancelled",
            PassStatus::Unknown => "unknown",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Paid,
    Pending,
    #[default]
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum VehicleType {
    Bike,
    Car,
    Truck,
}

impl VehicleType {
    /// Capitalized form used for display and the machine-name convention.
    pub fn label(&self) -> &'static str {
        match self {
            VehicleType::Bike => "Bike",
            VehicleType::Car => "Car",
            VehicleType::Truck => "Truck",
        }
    }
}

/// A time-bounded parking authorization tied to one vehicle and user,
/// independent of individual bookings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MonthlyPass {
    /// Document identifier; lives outside the record body in the store.
    #[serde(skip)]
    pub id: String,
    pub user_id: String,
    pub user_name: String,
    pub phone_no: Masked<String>,
    pub vehicle_number: String,
    pub vehicle_type: VehicleType,
    pub parking_name: String,
    /// Whole currency units.
    pub amount: i64,
    #[serde(with = "timestamp")]
    pub start_date: DateTime<Utc>,
    #[serde(with = "timestamp")]
    pub end_date: DateTime<Utc>,
    #[serde(default)]
    pub status: PassStatus,
    #[serde(default)]
    pub payment_status: PaymentStatus,
    #[serde(default = "default_pass_type")]
    pub pass_type: String,
    /// 4-digit display code handed to the operator at the gate.
    pub token_no: String,
    /// Opaque string derived from the vehicle number and creation instant.
    pub qr_code: String,
    #[serde(default)]
    pub machine_name: String,
    #[serde(with = "timestamp")]
    pub created_time: DateTime<Utc>,
    #[serde(with = "timestamp")]
    pub updated_time: DateTime<Utc>,
}

fn default_pass_type() -> String {
    "monthly".to_string()
}

impl MonthlyPass {
    pub fn from_document(doc: &Document) -> Result<Self, serde_json::Error> {
        let mut pass: MonthlyPass = serde_json::from_value(doc.data.clone())?;
        pass.id = doc.id.clone();
        Ok(pass)
    }

    /// Record body as persisted; the identifier is not part of it.
    pub fn to_record(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_pass_decodes_structured_store_timestamps() {
        let doc = Document {
            id: "pass-1".to_string(),
            data: json!({
                "user_id": "u-1",
                "user_name": "Asha Rao",
                "phone_no": "9876543210",
                "vehicle_number": "KA01AB1234",
                "vehicle_type": "car",
                "parking_name": "MG Road Lot",
                "amount": 2500,
                "start_date": { "seconds": 1_704_067_200 },
                "end_date": { "seconds": 1_706_745_600 },
                "status": "active",
                "payment_status": "paid",
                "token_no": "4821",
                "qr_code": "QR_KA01AB1234_1704067200000",
                "machine_name": "Car 1",
                "created_time": "2024-01-01T00:00:00Z",
                "updated_time": "2024-01-01T00:00:00Z"
            }),
        };

        let pass = MonthlyPass::from_document(&doc).unwrap();
        assert_eq!(pass.id, "pass-1");
        assert_eq!(pass.status, PassStatus::Active);
        assert_eq!(pass.vehicle_type, VehicleType::Car);
        assert_eq!(pass.pass_type, "monthly");
        assert_eq!(pass.start_date.timestamp(), 1_704_067_200);
    }

    #[test]
    fn test_unrecognized_status_decodes_as_unknown() {
        let value = json!({
            "user_id": "u-1",
            "user_name": "Asha Rao",
            "phone_no": "9876543210",
            "vehicle_number": "KA01AB1234",
            "vehicle_type": "bike",
            "parking_name": "MG Road Lot",
            "amount": 900,
            "start_date": "2024-01-01T00:00:00Z",
            "end_date": "2024-02-01T00:00:00Z",
            "status": "suspended",
            "payment_status": "paid",
            "token_no": "1111",
            "qr_code": "QR_KA01AB1234_0",
            "created_time": "2024-01-01T00:00:00Z",
            "updated_time": "2024-01-01T00:00:00Z"
        });

        let pass: MonthlyPass = serde_json::from_value(value).unwrap();
        assert_eq!(pass.status, PassStatus::Unknown);
    }

    #[test]
    fn test_record_body_omits_the_identifier() {
        let doc = Document {
            id: "pass-9".to_string(),
            data: json!({
                "user_id": "u-1",
                "user_name": "Asha Rao",
                "phone_no": "9876543210",
                "vehicle_number": "KA01AB1234",
                "vehicle_type": "truck",
                "parking_name": "MG Road Lot",
                "amount": 4000,
                "start_date": "2024-01-01T00:00:00Z",
                "end_date": "2024-02-01T00:00:00Z",
                "status": "active",
                "payment_status": "paid",
                "token_no": "2222",
                "qr_code": "QR_KA01AB1234_0",
                "created_time": "2024-01-01T00:00:00Z",
                "updated_time": "2024-01-01T00:00:00Z"
            }),
        };

        let pass = MonthlyPass::from_document(&doc).unwrap();
        let record = pass.to_record().unwrap();
        assert!(record.get("id").is_none());
        assert_eq!(record["machine_name"], json!(""));
    }
}
