use async_trait::async_trait;
use parkdesk_core::store::{
    Direction, Document, DocumentStore, Filter, FilterOp, Query, StoreError,
};
use parkdesk_shared::timestamp;
use serde_json::Value;
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use tokio::sync::RwLock;
use uuid::Uuid;

/// In-memory document backend with the same query semantics the hosted
/// store exposes: dotted field paths, `Eq`/`Gte` filters with
/// timestamp-aware comparison, field ordering, limit. Serves local
/// development and the test suites.
#[derive(Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, BTreeMap<String, Value>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place a document under a fixed identifier.
    pub async fn seed(&self, collection: &str, id: &str, record: Value) {
        let mut collections = self.collections.write().await;
        collections
            .entry(collection.to_string())
            .or_default()
            .insert(id.to_string(), record);
    }
}

fn field<'v>(record: &'v Value, path: &str) -> Option<&'v Value> {
    let mut current = record;
    for part in path.split('.') {
        current = current.get(part)?;
    }
    Some(current)
}

/// Ordering across the value shapes that show up in stored fields.
/// Timestamps compare as instants regardless of which shape each side uses.
fn compare(a: &Value, b: &Value) -> Option<Ordering> {
    if let (Some(a), Some(b)) = (timestamp::coerce(a), timestamp::coerce(b)) {
        return Some(a.cmp(&b));
    }

    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x.as_f64()?.partial_cmp(&y.as_f64()?),
        (Value::String(x), Value::String(y)) => Some(x.cmp(y)),
        (Value::Bool(x), Value::Bool(y)) => Some(x.cmp(y)),
        _ => None,
    }
}

fn matches(record: &Value, filter: &Filter) -> bool {
    let Some(actual) = field(record, &filter.field) else {
        return false;
    };

    match filter.op {
        FilterOp::Eq => {
            actual == &filter.value || compare(actual, &filter.value) == Some(Ordering::Equal)
        }
        FilterOp::Gte => matches!(
            compare(actual, &filter.value),
            Some(Ordering::Greater | Ordering::Equal)
        ),
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn query(&self, collection: &str, query: Query) -> Result<Vec<Document>, StoreError> {
        let collections = self.collections.read().await;

        let mut results: Vec<Document> = collections
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .filter(|(_, data)| query.filters.iter().all(|f| matches(data, f)))
                    .map(|(id, data)| Document {
                        id: id.clone(),
                        data: data.clone(),
                    })
                    .collect()
            })
            .unwrap_or_default();

        if let Some(order) = &query.order_by {
            results.sort_by(|a, b| {
                match (field(&a.data, &order.field), field(&b.data, &order.field)) {
                    (Some(x), Some(y)) => {
                        let ord = compare(x, y).unwrap_or(Ordering::Equal);
                        match order.direction {
                            Direction::Asc => ord,
                            Direction::Desc => ord.reverse(),
                        }
                    }
                    // Documents without the field sort last either way.
                    (Some(_), None) => Ordering::Less,
                    (None, Some(_)) => Ordering::Greater,
                    (None, None) => Ordering::Equal,
                }
            });
        }

        if let Some(limit) = query.limit {
            results.truncate(limit);
        }

        Ok(results)
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .and_then(|docs| docs.get(id))
            .map(|data| Document {
                id: id.to_string(),
                data: data.clone(),
            }))
    }

    async fn insert(&self, collection: &str, record: Value) -> Result<String, StoreError> {
        if !record.is_object() {
            return Err(StoreError::InvalidRequest(
                "document body must be an object".to_string(),
            ));
        }

        let id = Uuid::new_v4().to_string();
        let mut collections = self.collections.write().await;
        collections
            .entry(collection.to_string())
            .or_default()
            .insert(id.clone(), record);
        Ok(id)
    }

    async fn update(&self, collection: &str, id: &str, partial: Value) -> Result<(), StoreError> {
        let Value::Object(partial) = partial else {
            return Err(StoreError::InvalidRequest(
                "update body must be an object".to_string(),
            ));
        };

        let mut collections = self.collections.write().await;
        let doc = collections
            .get_mut(collection)
            .and_then(|docs| docs.get_mut(id))
            .ok_or_else(|| StoreError::NotFound {
                collection: collection.to_string(),
                id: id.to_string(),
            })?;

        match doc {
            Value::Object(existing) => {
                for (key, value) in partial {
                    existing.insert(key, value);
                }
                Ok(())
            }
            _ => Err(StoreError::InvalidRequest(
                "stored document is not an object".to_string(),
            )),
        }
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        let mut collections = self.collections.write().await;
        let removed = collections
            .get_mut(collection)
            .and_then(|docs| docs.remove(id));

        match removed {
            Some(_) => Ok(()),
            None => Err(StoreError::NotFound {
                collection: collection.to_string(),
                id: id.to_string(),
            }),
        }
    }
}
