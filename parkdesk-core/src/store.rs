use async_trait::async_trait;
use serde_json::Value;

/// A single record returned by the hosted document database. The backend
/// keeps the identifier outside the document body.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: String,
    pub data: Value,
}

/// Filter operators the hosted store supports. Equality and
/// greater-or-equal cover every query the admin surface issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    Eq,
    Gte,
}

#[derive(Debug, Clone)]
pub struct Filter {
    pub field: String,
    pub op: FilterOp,
    pub value: Value,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

#[derive(Debug, Clone)]
pub struct OrderBy {
    pub field: String,
    pub direction: Direction,
}

/// A collection query: zero or more filters, optional ordering, optional
/// result cap. Filter fields may use dotted paths (`"start_date.seconds"`).
#[derive(Debug, Clone, Default)]
pub struct Query {
    pub filters: Vec<Filter>,
    pub order_by: Option<OrderBy>,
    pub limit: Option<usize>,
}

impl Query {
    /// Full collection scan.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn filter(mut self, field: &str, op: FilterOp, value: Value) -> Self {
        self.filters.push(Filter {
            field: field.to_string(),
            op,
            value,
        });
        self
    }

    pub fn order_by(mut self, field: &str, direction: Direction) -> Self {
        self.order_by = Some(OrderBy {
            field: field.to_string(),
            direction,
        });
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("document store call failed for {collection}: {source}")]
    Backend {
        collection: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("document {id} not found in {collection}")]
    NotFound { collection: String, id: String },

    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl StoreError {
    pub fn backend(
        collection: &str,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::Backend {
            collection: collection.to_string(),
            source: source.into(),
        }
    }
}

/// The capability set of the hosted document database. No transactional or
/// ordering guarantees exist across calls; every operation may fail with a
/// backend error carrying the underlying cause.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn query(&self, collection: &str, query: Query) -> Result<Vec<Document>, StoreError>;

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError>;

    /// Insert a new document and return its generated identifier.
    async fn insert(&self, collection: &str, record: Value) -> Result<String, StoreError>;

    /// Shallow-merge the fields of `partial` into an existing document.
    async fn update(&self, collection: &str, id: &str, partial: Value) -> Result<(), StoreError>;

    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError>;
}
