use thiserror::Error;

use crate::model::{FieldMap, Id, Record};

/// Failure surfaced by a record store implementation. Callers catch and
/// report these; no store failure is fatal to the process.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("store rejected {operation} on `{collection}`: {status} {message}")]
    Service {
        operation: &'static str,
        collection: String,
        status: u16,
        message: String,
    },

    #[error("malformed document `{id}`: missing field `{field}`")]
    MalformedDocument { id: Id, field: &'static str },
}

/// Four remote operations against a named collection in the hosted document
/// store. Each screen action is exactly one round trip, followed by a
/// `list_all` round trip to refresh the caller's snapshot.
#[async_trait::async_trait]
pub trait RecordStore: Send + Sync {
    /// Fetches every document in the collection.
    async fn list_all(&self, collection: &str) -> Result<Vec<Record>, StoreError>;

    /// Inserts a new document, fields written verbatim. Returns the
    /// store-assigned id.
    async fn create(&self, collection: &str, fields: FieldMap) -> Result<Id, StoreError>;

    /// Full-field overwrite of an existing document. The store reports a
    /// missing target; there is no existence check beforehand.
    async fn update_by_id(
        &self,
        collection: &str,
        id: &Id,
        fields: FieldMap,
    ) -> Result<(), StoreError>;

    /// Removes a document. No existence check beforehand.
    async fn delete_by_id(&self, collection: &str, id: &Id) -> Result<(), StoreError>;
}
