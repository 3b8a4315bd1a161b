use std::sync::Arc;

use log::{error, info};

use crate::logic::{export_students, filter_students, validate_student, CsvExport, ValidationError};
use crate::model::{Id, Institute, Student, StudentForm};
use crate::screen::{AdminError, FormMode};
use crate::store::{RecordStore, StoreError};

/// Student management screen. Same Create/Edit machine as the institute
/// screen, plus the institute selector, the live search filter, the table
/// visibility toggle and the spreadsheet export.
pub struct StudentScreen<S: RecordStore> {
    store: Arc<S>,
    collection: String,
    institute_collection: String,
    pub form: StudentForm,
    edit_target: Option<Student>,
    students: Vec<Student>,
    institute_choices: Vec<Institute>,
    search: String,
    table_visible: bool,
}

impl<S: RecordStore> StudentScreen<S> {
    pub fn new(
        store: Arc<S>,
        collection: impl Into<String>,
        institute_collection: impl Into<String>,
    ) -> Self {
        Self {
            store,
            collection: collection.into(),
            institute_collection: institute_collection.into(),
            form: StudentForm::default(),
            edit_target: None,
            students: Vec::new(),
            institute_choices: Vec::new(),
            search: String::new(),
            table_visible: false,
        }
    }

    pub fn mode(&self) -> FormMode {
        if self.edit_target.is_some() {
            FormMode::Edit
        } else {
            FormMode::Create
        }
    }

    /// Cached snapshot from the last successful `list_all`.
    pub fn students(&self) -> &[Student] {
        &self.students
    }

    /// Read-only institute list backing the form's selector.
    pub fn institute_choices(&self) -> &[Institute] {
        &self.institute_choices
    }

    pub fn table_visible(&self) -> bool {
        self.table_visible
    }

    /// Discards the snapshot and refetches the whole student collection.
    pub async fn refresh(&mut self) -> Result<(), StoreError> {
        let records = self.store.list_all(&self.collection).await?;
        self.students = Student::parse_all(&records)?;
        Ok(())
    }

    /// Refetches the institute list the selector draws from. Read-only use
    /// of the institutes collection; nothing here mutates it.
    pub async fn load_institutes(&mut self) -> Result<(), StoreError> {
        let records = self.store.list_all(&self.institute_collection).await?;
        self.institute_choices = Institute::parse_all(&records)?;
        Ok(())
    }

    /// Picks the form's institute reference. The selection is constrained
    /// to the cached institute list; submit performs no live lookup.
    pub fn select_institute(&mut self, id: &Id) -> Result<(), ValidationError> {
        if !self.institute_choices.iter().any(|choice| &choice.id == id) {
            return Err(ValidationError::UnknownInstitute);
        }
        self.form.institute_id = id.clone();
        Ok(())
    }

    /// Validates the form, then performs exactly one create or update round
    /// trip. Success clears the form, ends Edit mode and refetches; failure
    /// leaves the form untouched for retry and keeps the stale snapshot.
    pub async fn submit(&mut self) -> Result<(), AdminError> {
        validate_student(&self.form)?;
        let fields = self.form.to_fields();
        match self.edit_target.as_ref() {
            Some(target) => {
                self.store
                    .update_by_id(&self.collection, &target.id, fields)
                    .await?;
                info!("updated student {}", target.id);
            }
            None => {
                let id = self.store.create(&self.collection, fields).await?;
                info!("created student {id}");
            }
        }
        self.form = StudentForm::default();
        self.edit_target = None;
        if let Err(err) = self.refresh().await {
            error!("student refresh after submit failed: {err}");
        }
        Ok(())
    }

    /// Copies the record's fields into the form and enters Edit mode. Uses
    /// the cached snapshot; no fresh fetch for the record.
    pub fn edit(&mut self, student: &Student) {
        self.form = student.form();
        self.edit_target = Some(student.clone());
    }

    /// Deletes by id, then refetches. Independent of the institute
    /// lifecycle either way: deleting an institute leaves its students.
    pub async fn remove(&mut self, id: &Id) -> Result<(), StoreError> {
        self.store.delete_by_id(&self.collection, id).await?;
        info!("deleted student {id}");
        self.refresh().await
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    /// Derived view: the snapshot filtered by the current search term,
    /// recomputed synchronously on every call.
    pub fn visible_students(&self) -> Vec<Student> {
        filter_students(self.students.clone(), &self.search)
    }

    /// Flips table visibility. Every hidden-to-shown transition refetches
    /// the collection instead of reusing cached rows.
    pub async fn toggle_table(&mut self) -> Result<bool, StoreError> {
        self.table_visible = !self.table_visible;
        if self.table_visible {
            self.refresh().await?;
        }
        Ok(self.table_visible)
    }

    /// Exports the current filtered view as CSV under the fixed filename.
    pub fn export_csv(&self) -> CsvExport {
        export_students(&self.visible_students())
    }
}
