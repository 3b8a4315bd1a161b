use std::collections::HashMap;

use parking_lot::RwLock;

use crate::model::{generate_id, FieldMap, Id, Record};
use crate::store::traits::{RecordStore, StoreError};

/// In-process store used by the test suite and by local runs without a
/// configured remote. Collections keep insertion order, matching how the
/// hosted store lists documents.
#[derive(Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, Vec<Record>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl RecordStore for MemoryStore {
    async fn list_all(&self, collection: &str) -> Result<Vec<Record>, StoreError> {
        Ok(self
            .collections
            .read()
            .get(collection)
            .cloned()
            .unwrap_or_default())
    }

    async fn create(&self, collection: &str, fields: FieldMap) -> Result<Id, StoreError> {
        let id = generate_id();
        self.collections
            .write()
            .entry(collection.to_string())
            .or_default()
            .push(Record::new(id.clone(), fields));
        Ok(id)
    }

    async fn update_by_id(
        &self,
        collection: &str,
        id: &Id,
        fields: FieldMap,
    ) -> Result<(), StoreError> {
        let mut collections = self.collections.write();
        if let Some(records) = collections.get_mut(collection) {
            if let Some(record) = records.iter_mut().find(|record| &record.id == id) {
                record.fields = fields;
                return Ok(());
            }
        }
        // The hosted store reports an update against a missing document.
        Err(StoreError::Service {
            operation: "update",
            collection: collection.to_string(),
            status: 404,
            message: format!("no document `{id}`"),
        })
    }

    async fn delete_by_id(&self, collection: &str, id: &Id) -> Result<(), StoreError> {
        // Deleting an absent document succeeds, as it does on the hosted store.
        if let Some(records) = self.collections.write().get_mut(collection) {
            records.retain(|record| &record.id != id);
        }
        Ok(())
    }
}
