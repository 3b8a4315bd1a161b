use std::sync::Arc;

use log::{error, info};

use crate::logic::validate_institute;
use crate::model::{Id, Institute, InstituteForm};
use crate::screen::{AdminError, FormMode};
use crate::store::{RecordStore, StoreError};

/// Institute management screen. Owns the form state, the edit target and
/// the cached collection snapshot; the snapshot is discarded and refetched
/// after every successful mutation.
pub struct InstituteScreen<S: RecordStore> {
    store: Arc<S>,
    collection: String,
    pub form: InstituteForm,
    edit_target: Option<Institute>,
    institutes: Vec<Institute>,
}

impl<S: RecordStore> InstituteScreen<S> {
    pub fn new(store: Arc<S>, collection: impl Into<String>) -> Self {
        Self {
            store,
            collection: collection.into(),
            form: InstituteForm::default(),
            edit_target: None,
            institutes: Vec::new(),
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
    pub fn institutes(&self) -> &[Institute] {
        &self.institutes
    }

    /// Discards the snapshot and refetches the whole collection.
    pub async fn refresh(&mut self) -> Result<(), StoreError> {
        let records = self.store.list_all(&self.collection).await?;
        self.institutes = Institute::parse_all(&records)?;
        Ok(())
    }

    /// Validates the form, then performs exactly one create or update round
    /// trip. On success the form clears, Edit mode ends and the snapshot is
    /// refetched. On failure the form (and any Edit mode) stays untouched so
    /// the user can resubmit; the stale snapshot is kept.
    pub async fn submit(&mut self) -> Result<(), AdminError> {
        validate_institute(&self.form)?;
        let fields = self.form.to_fields();
        match self.edit_target.as_ref() {
            Some(target) => {
                self.store
                    .update_by_id(&self.collection, &target.id, fields)
                    .await?;
                info!("updated institute {}", target.id);
            }
            None => {
                let id = self.store.create(&self.collection, fields).await?;
                info!("created institute {id}");
            }
        }
        self.form = InstituteForm::default();
        self.edit_target = None;
        // The mutation already succeeded; a failed refresh only leaves the
        // snapshot stale until the next fetch.
        if let Err(err) = self.refresh().await {
            error!("institute refresh after submit failed: {err}");
        }
        Ok(())
    }

    /// Copies the record's fields into the form and enters Edit mode. Uses
    /// the cached snapshot; no fresh fetch for the record.
    pub fn edit(&mut self, institute: &Institute) {
        self.form = institute.form();
        self.edit_target = Some(institute.clone());
    }

    /// Deletes by id, then refetches. No confirmation, and no check for
    /// students still referencing the institute.
    pub async fn remove(&mut self, id: &Id) -> Result<(), StoreError> {
        self.store.delete_by_id(&self.collection, id).await?;
        info!("deleted institute {id}");
        self.refresh().await
    }
}
