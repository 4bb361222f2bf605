use crate::records::{PARKINGS, USERS};
use parkdesk_core::store::{Document, DocumentStore, Query, StoreError};
use parkdesk_shared::Masked;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::warn;

/// Registered app user, as written by the mobile signup flow.
#[derive(Debug, Clone, Deserialize)]
pub struct AppUser {
    #[serde(skip)]
    pub id: String,
    pub uid: String,
    pub display_name: String,
    #[serde(default)]
    pub phone_number: Masked<String>,
}

/// A parking location the business operates.
#[derive(Debug, Clone, Deserialize)]
pub struct ParkingLocation {
    #[serde(skip)]
    pub id: String,
    pub name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Prefill for the add-pass form when the operator picks a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassPrefill {
    pub user_id: String,
    pub user_name: String,
    pub phone_no: String,
}

impl PassPrefill {
    pub fn from_user(user: &AppUser) -> Self {
        Self {
            user_id: user.uid.clone(),
            user_name: user.display_name.clone(),
            phone_no: user.phone_number.inner().clone(),
        }
    }
}

/// Lookup data for the add-pass form: users to issue against, parkings to
/// issue at.
pub struct DirectoryService {
    store: Arc<dyn DocumentStore>,
}

impl DirectoryService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub async fn list_users(&self) -> Result<Vec<AppUser>, StoreError> {
        let docs = self.store.query(USERS, Query::all()).await?;
        Ok(docs.iter().filter_map(decode_user).collect())
    }

    pub async fn list_parkings(&self) -> Result<Vec<ParkingLocation>, StoreError> {
        let docs = self.store.query(PARKINGS, Query::all()).await?;
        Ok(docs.iter().filter_map(decode_parking).collect())
    }
}

fn decode_user(doc: &Document) -> Option<AppUser> {
    match serde_json::from_value::<AppUser>(doc.data.clone()) {
        Ok(mut user) => {
            user.id = doc.id.clone();
            Some(user)
        }
        Err(err) => {
            warn!("Skipping undecodable user {}: {}", doc.id, err);
            None
        }
    }
}

fn decode_parking(doc: &Document) -> Option<ParkingLocation> {
    match serde_json::from_value::<ParkingLocation>(doc.data.clone()) {
        Ok(mut parking) => {
            parking.id = doc.id.clone();
            Some(parking)
        }
        Err(err) => {
            warn!("Skipping undecodable parking {}: {}", doc.id, err);
            None
        }
    }
}
