use serde::{Deserialize, Serialize};

use crate::model::{FieldMap, Id, Record};
use crate::store::StoreError;

// Document field names used by the hosted store's `institutes` collection.
const FIELD_NAME: &str = "Name";
const FIELD_ADDRESS: &str = "Address";
const FIELD_CONTACT: &str = "Contacts";
const FIELD_EMAIL: &str = "email";

/// One institute record, parsed from its stored document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Institute {
    pub id: Id,
    pub name: String,
    pub address: String,
    pub contact: String,
    pub email: String,
}

/// Form payload for institute submissions. The store assigns the id on
/// creation, so the form never carries one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InstituteForm {
    pub name: String,
    pub address: String,
    pub contact: String,
    pub email: String,
}

impl Institute {
    /// Parses a stored document, rejecting it if a required field is absent.
    pub fn parse(record: &Record) -> Result<Self, StoreError> {
        Ok(Self {
            id: record.id.clone(),
            name: record.require(FIELD_NAME)?,
            address: record.require(FIELD_ADDRESS)?,
            contact: record.require(FIELD_CONTACT)?,
            email: record.require(FIELD_EMAIL)?,
        })
    }

    pub fn parse_all(records: &[Record]) -> Result<Vec<Self>, StoreError> {
        records.iter().map(Self::parse).collect()
    }

    /// Copies the four editable fields back into form state.
    pub fn form(&self) -> InstituteForm {
        InstituteForm {
            name: self.name.clone(),
            address: self.address.clone(),
            contact: self.contact.clone(),
            email: self.email.clone(),
        }
    }
}

impl InstituteForm {
    /// Field map written verbatim on create and update submissions.
    pub fn to_fields(&self) -> FieldMap {
        FieldMap::from([
            (FIELD_NAME.to_string(), self.name.clone()),
            (FIELD_ADDRESS.to_string(), self.address.clone()),
            (FIELD_CONTACT.to_string(), self.contact.clone()),
            (FIELD_EMAIL.to_string(), self.email.clone()),
        ])
    }
}
