use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::model::Id;
use crate::store::StoreError;

/// Flat field mapping as stored by the hosted document store. Values are
/// written verbatim; the store applies no server-side defaulting.
pub type FieldMap = BTreeMap<String, String>;

/// One stored document plus its identifier, exactly as the store returns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: Id,
    pub fields: FieldMap,
}

impl Record {
    pub fn new(id: Id, fields: FieldMap) -> Self {
        Self { id, fields }
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// Reads a field that the document must carry. Documents missing it are
    /// rejected at the boundary instead of being rendered as-is.
    pub fn require(&self, name: &'static str) -> Result<String, StoreError> {
        self.field(name)
            .map(str::to_string)
            .ok_or_else(|| StoreError::MalformedDocument {
                id: self.id.clone(),
                field: name,
            })
    }
}
