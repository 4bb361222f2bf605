use chrono::{DateTime, Duration, Utc};
use parkdesk_core::store::{
    Direction, Document, DocumentStore, FilterOp, Query, StoreError,
};
use parkdesk_shared::timestamp;
use parkdesk_store::app_config::AdminRules;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::{error, info, warn};

pub const BOOKINGS: &str = "bookings";
pub const USERS: &str = "users";
pub const PARKINGS: &str = "parkings";

const DEFAULT_FETCH_LIMIT: usize = 100;

/// A booking row: identifier, the instant it starts, and whatever other
/// fields the mobile app wrote. Read-only here apart from deletion.
#[derive(Debug, Clone, Deserialize)]
pub struct Booking {
    #[serde(skip)]
    pub id: String,
    #[serde(default, with = "timestamp::opt")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Booking {
    pub fn from_document(doc: &Document) -> Result<Self, serde_json::Error> {
        let mut booking: Booking = serde_json::from_value(doc.data.clone())?;
        booking.id = doc.id.clone();
        Ok(booking)
    }
}

/// Human-readable date for list views; absent values render as "N/A".
pub fn format_date(value: Option<DateTime<Utc>>) -> String {
    value
        .map(|dt| dt.format("%d %b %Y").to_string())
        .unwrap_or_else(|| "N/A".to_string())
}

/// Stateless passthrough to the document store, per named collection. Read
/// failures are logged and propagated; callers present an empty state
/// rather than crash.
pub struct RecordService {
    store: Arc<dyn DocumentStore>,
    rules: AdminRules,
}

impl RecordService {
    pub fn new(store: Arc<dyn DocumentStore>, rules: AdminRules) -> Self {
        Self { store, rules }
    }

    /// Fetch all documents from a collection.
    pub async fn fetch_collection(&self, collection: &str) -> Result<Vec<Document>, StoreError> {
        self.store
            .query(collection, Query::all())
            .await
            .map_err(|err| {
                error!("Error fetching {}: {}", collection, err);
                err
            })
    }

    /// Fetch documents with optional ordering and a result cap
    /// (100 when unspecified).
    pub async fn fetch_ordered(
        &self,
        collection: &str,
        order_field: Option<&str>,
        direction: Direction,
        limit: Option<usize>,
    ) -> Result<Vec<Document>, StoreError> {
        let mut query = Query::all().limit(limit.unwrap_or(DEFAULT_FETCH_LIMIT));
        if let Some(field) = order_field {
            query = query.order_by(field, direction);
        }

        self.store.query(collection, query).await.map_err(|err| {
            error!("Error fetching ordered {}: {}", collection, err);
            err
        })
    }

    /// Fetch documents matching a single field filter.
    pub async fn fetch_filtered(
        &self,
        collection: &str,
        field: &str,
        op: FilterOp,
        value: Value,
    ) -> Result<Vec<Document>, StoreError> {
        let query = Query::all().filter(field, op, value);
        self.store.query(collection, query).await.map_err(|err| {
            error!("Error fetching filtered {}: {}", collection, err);
            err
        })
    }

    /// Bookings that started inside the configured recent window, newest
    /// first. Rows that fail to decode are skipped with a warning.
    pub async fn fetch_recent_bookings(
        &self,
        now: DateTime<Utc>,
    ) -> Result<Vec<Booking>, StoreError> {
        let since = now - Duration::days(self.rules.recent_booking_window_days);
        let query = Query::all()
            .filter("start_date", FilterOp::Gte, Value::String(since.to_rfc3339()))
            .order_by("start_date", Direction::Desc);

        let docs = self.store.query(BOOKINGS, query).await.map_err(|err| {
            error!("Error fetching recent bookings: {}", err);
            err
        })?;

        Ok(docs
            .iter()
            .filter_map(|doc| match Booking::from_document(doc) {
                Ok(booking) => Some(booking),
                Err(err) => {
                    warn!("Skipping undecodable booking {}: {}", doc.id, err);
                    None
                }
            })
            .collect())
    }

    /// Delete a document by identifier. Parameters are validated before the
    /// store is touched.
    pub async fn delete_document(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        if collection.is_empty() || id.is_empty() {
            error!("Missing collection name or document ID for deletion");
            return Err(StoreError::InvalidRequest(
                "collection name and document id are required".to_string(),
            ));
        }

        info!("Attempting to delete document {} from collection {}", id, collection);
        self.store.delete(collection, id).await?;
        info!("Successfully deleted document {} from {}", id, collection);
        Ok(())
    }
}
