use async_trait::async_trait;
use parkdesk_core::store::{Document, DocumentStore, FilterOp, Query, StoreError};
use parkdesk_pass::{MonthlyPass, PassRepository, PassStatus, PassUpdate};
use serde_json::json;
use std::sync::Arc;
use tracing::warn;

pub const MONTHLY_PASSES: &str = "monthly_passes";

/// `PassRepository` over the hosted document store. Reads are
/// decode-tolerant: a record that no longer matches the model is skipped
/// with a warning instead of failing the whole listing.
pub struct DocPassRepository {
    store: Arc<dyn DocumentStore>,
}

impl DocPassRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    fn decode(doc: &Document) -> Option<MonthlyPass> {
        match MonthlyPass::from_document(doc) {
            Ok(pass) => Some(pass),
            Err(err) => {
                warn!("Skipping undecodable pass {}: {}", doc.id, err);
                None
            }
        }
    }
}

#[async_trait]
impl PassRepository for DocPassRepository {
    async fn list_passes(&self) -> Result<Vec<MonthlyPass>, StoreError> {
        let docs = self.store.query(MONTHLY_PASSES, Query::all()).await?;
        Ok(docs.iter().filter_map(Self::decode).collect())
    }

    async fn list_by_status(&self, status: PassStatus) -> Result<Vec<MonthlyPass>, StoreError> {
        let query = Query::all().filter("status", FilterOp::Eq, json!(status.as_str()));
        let docs = self.store.query(MONTHLY_PASSES, query).await?;
        Ok(docs.iter().filter_map(Self::decode).collect())
    }

    async fn find_pass(&self, id: &str) -> Result<Option<MonthlyPass>, StoreError> {
        let doc = self.store.get(MONTHLY_PASSES, id).await?;
        Ok(doc.as_ref().and_then(Self::decode))
    }

    async fn insert_pass(&self, pass: &MonthlyPass) -> Result<String, StoreError> {
        let record = pass
            .to_record()
            .map_err(|err| StoreError::backend(MONTHLY_PASSES, err))?;
        self.store.insert(MONTHLY_PASSES, record).await
    }

    async fn update_pass(&self, id: &str, update: &PassUpdate) -> Result<(), StoreError> {
        let partial = serde_json::to_value(update)
            .map_err(|err| StoreError::backend(MONTHLY_PASSES, err))?;
        self.store.update(MONTHLY_PASSES, id, partial).await
    }
}
