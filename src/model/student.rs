use serde::{Deserialize, Serialize};

use crate::model::{FieldMap, Id, Record};
use crate::store::StoreError;

// Document field names used by the hosted store's `students` collection.
const FIELD_INSTITUTE_ID: &str = "instituteId";
const FIELD_STUDENT_NAME: &str = "studentName";
const FIELD_ADDRESS: &str = "address";
const FIELD_SEMESTER: &str = "semester";
const FIELD_CONTACT_NO: &str = "contactNo";

/// One student record, parsed from its stored document. `institute_id`
/// references an institute by id; the store does not enforce the reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    pub id: Id,
    pub institute_id: Id,
    pub student_name: String,
    pub address: String,
    pub semester: String,
    pub contact_no: String,
}

/// Form payload for student submissions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StudentForm {
    pub institute_id: Id,
    pub student_name: String,
    pub address: String,
    pub semester: String,
    pub contact_no: String,
}

impl Student {
    /// Parses a stored document, rejecting it if a required field is absent.
    pub fn parse(record: &Record) -> Result<Self, StoreError> {
        Ok(Self {
            id: record.id.clone(),
            institute_id: record.require(FIELD_INSTITUTE_ID)?,
            student_name: record.require(FIELD_STUDENT_NAME)?,
            address: record.require(FIELD_ADDRESS)?,
            semester: record.require(FIELD_SEMESTER)?,
            contact_no: record.require(FIELD_CONTACT_NO)?,
        })
    }

    pub fn parse_all(records: &[Record]) -> Result<Vec<Self>, StoreError> {
        records.iter().map(Self::parse).collect()
    }

    /// Copies the editable fields back into form state.
    pub fn form(&self) -> StudentForm {
        StudentForm {
            institute_id: self.institute_id.clone(),
            student_name: self.student_name.clone(),
            address: self.address.clone(),
            semester: self.semester.clone(),
            contact_no: self.contact_no.clone(),
        }
    }
}

impl StudentForm {
    /// Field map written verbatim on create and update submissions.
    pub fn to_fields(&self) -> FieldMap {
        FieldMap::from([
            (FIELD_INSTITUTE_ID.to_string(), self.institute_id.clone()),
            (FIELD_STUDENT_NAME.to_string(), self.student_name.clone()),
            (FIELD_ADDRESS.to_string(), self.address.clone()),
            (FIELD_SEMESTER.to_string(), self.semester.clone()),
            (FIELD_CONTACT_NO.to_string(), self.contact_no.clone()),
        ])
    }
}
