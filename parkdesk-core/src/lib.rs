pub mod cache;
pub mod identity;
pub mod store;

pub use cache::{MemorySessionCache, SessionCache};
pub use identity::{AuthError, IdentityProvider, Session, StaticIdentityProvider};
pub use store::{
    Direction, Document, DocumentStore, Filter, FilterOp, OrderBy, Query, StoreError,
};
