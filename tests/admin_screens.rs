use std::collections::BTreeMap;
use std::sync::Arc;

use campus_admin::{
    AdminError, FormMode, InstituteForm, InstituteScreen, MemoryStore, Record, RecordStore,
    StoreError, StudentForm, StudentScreen, ValidationError,
};

const INSTITUTES: &str = "institutes";
const STUDENTS: &str = "students";

fn acme_form() -> InstituteForm {
    InstituteForm {
        name: "Acme U".to_string(),
        address: "1 Rd".to_string(),
        contact: "1234567890".to_string(),
        email: "a@b.com".to_string(),
    }
}

fn student_form(institute_id: &str) -> StudentForm {
    StudentForm {
        institute_id: institute_id.to_string(),
        student_name: "Ann".to_string(),
        address: "Main St".to_string(),
        semester: "Fall".to_string(),
        contact_no: "5551234567".to_string(),
    }
}

/// Store whose every operation fails, for exercising the retry paths.
struct FailingStore;

fn unavailable(operation: &'static str) -> StoreError {
    StoreError::Service {
        operation,
        collection: INSTITUTES.to_string(),
        status: 503,
        message: "service unavailable".to_string(),
    }
}

#[async_trait::async_trait]
impl RecordStore for FailingStore {
    async fn list_all(&self, _collection: &str) -> Result<Vec<Record>, StoreError> {
        Err(unavailable("list"))
    }

    async fn create(
        &self,
        _collection: &str,
        _fields: BTreeMap<String, String>,
    ) -> Result<String, StoreError> {
        Err(unavailable("create"))
    }

    async fn update_by_id(
        &self,
        _collection: &str,
        _id: &String,
        _fields: BTreeMap<String, String>,
    ) -> Result<(), StoreError> {
        Err(unavailable("update"))
    }

    async fn delete_by_id(&self, _collection: &str, _id: &String) -> Result<(), StoreError> {
        Err(unavailable("delete"))
    }
}

#[tokio::test]
async fn create_institute_appears_in_snapshot() {
    let store = Arc::new(MemoryStore::new());
    let mut screen = InstituteScreen::new(store, INSTITUTES);

    screen.form = acme_form();
    screen.submit().await.expect("submit should succeed");

    assert_eq!(screen.form, InstituteForm::default());
    assert_eq!(screen.mode(), FormMode::Create);

    let institutes = screen.institutes();
    assert_eq!(institutes.len(), 1);
    assert!(!institutes[0].id.is_empty());
    assert_eq!(institutes[0].name, "Acme U");
    assert_eq!(institutes[0].address, "1 Rd");
    assert_eq!(institutes[0].contact, "1234567890");
    assert_eq!(institutes[0].email, "a@b.com");
}

#[tokio::test]
async fn edit_overwrites_in_place() {
    let store = Arc::new(MemoryStore::new());
    let mut screen = InstituteScreen::new(store, INSTITUTES);

    screen.form = acme_form();
    screen.submit().await.unwrap();
    let created = screen.institutes()[0].clone();

    screen.edit(&created);
    assert_eq!(screen.mode(), FormMode::Edit);
    assert_eq!(screen.form, created.form());

    screen.form.address = "2 Rd".to_string();
    screen.submit().await.unwrap();

    assert_eq!(screen.mode(), FormMode::Create);
    let institutes = screen.institutes();
    assert_eq!(institutes.len(), 1);
    assert_eq!(institutes[0].id, created.id);
    assert_eq!(institutes[0].address, "2 Rd");
    assert_eq!(institutes[0].name, created.name);
    assert_eq!(institutes[0].contact, created.contact);
    assert_eq!(institutes[0].email, created.email);
}

#[tokio::test]
async fn unchanged_edit_submit_is_idempotent() {
    let store = Arc::new(MemoryStore::new());
    let mut screen = InstituteScreen::new(store, INSTITUTES);

    screen.form = acme_form();
    screen.submit().await.unwrap();
    let before = screen.institutes()[0].clone();

    screen.edit(&before);
    screen.submit().await.unwrap();

    assert_eq!(screen.institutes(), &[before]);
}

#[tokio::test]
async fn validation_failure_makes_no_store_call() {
    let store = Arc::new(MemoryStore::new());
    let mut screen = InstituteScreen::new(Arc::clone(&store), INSTITUTES);

    screen.form = acme_form();
    screen.form.name.clear();

    match screen.submit().await {
        Err(AdminError::Validation(ValidationError::MissingFields)) => {}
        other => panic!("expected missing-fields rejection, got {other:?}"),
    }

    // Nothing reached the store, and the rejected form stays put.
    assert!(store.list_all(INSTITUTES).await.unwrap().is_empty());
    assert!(screen.form.name.is_empty());
    assert_eq!(screen.form.address, "1 Rd");
}

#[tokio::test]
async fn store_failure_preserves_form_for_retry() {
    let mut screen = InstituteScreen::new(Arc::new(FailingStore), INSTITUTES);

    screen.form = acme_form();
    match screen.submit().await {
        Err(AdminError::Store(StoreError::Service { status: 503, .. })) => {}
        other => panic!("expected store failure, got {other:?}"),
    }

    assert_eq!(screen.form, acme_form());
    assert_eq!(screen.mode(), FormMode::Create);
}

#[tokio::test]
async fn failed_update_keeps_edit_mode() {
    let store = Arc::new(MemoryStore::new());
    let mut screen = InstituteScreen::new(Arc::clone(&store), INSTITUTES);

    screen.form = acme_form();
    screen.submit().await.unwrap();
    let created = screen.institutes()[0].clone();

    // The target disappears behind the screen's back; the store reports the
    // missing document on update.
    store.delete_by_id(INSTITUTES, &created.id).await.unwrap();

    screen.edit(&created);
    screen.form.address = "2 Rd".to_string();
    match screen.submit().await {
        Err(AdminError::Store(StoreError::Service { status: 404, .. })) => {}
        other => panic!("expected missing-document failure, got {other:?}"),
    }

    assert_eq!(screen.mode(), FormMode::Edit);
    assert_eq!(screen.form.address, "2 Rd");
}

#[tokio::test]
async fn delete_then_list_excludes_id() {
    let store = Arc::new(MemoryStore::new());
    let mut screen = InstituteScreen::new(store, INSTITUTES);

    screen.form = acme_form();
    screen.submit().await.unwrap();
    screen.form = InstituteForm {
        name: "Other U".to_string(),
        email: "o@u.edu".to_string(),
        ..acme_form()
    };
    screen.submit().await.unwrap();

    let doomed = screen.institutes()[0].id.clone();
    screen.remove(&doomed).await.unwrap();

    assert_eq!(screen.institutes().len(), 1);
    assert!(screen.institutes().iter().all(|i| i.id != doomed));
}

#[tokio::test]
async fn short_contact_student_is_rejected_without_store_call() {
    let store = Arc::new(MemoryStore::new());
    let mut screen = StudentScreen::new(Arc::clone(&store), STUDENTS, INSTITUTES);

    screen.form = student_form("i1");
    screen.form.contact_no = "555123456".to_string();

    match screen.submit().await {
        Err(AdminError::Validation(ValidationError::InvalidContact)) => {}
        other => panic!("expected contact rejection, got {other:?}"),
    }

    assert!(store.list_all(STUDENTS).await.unwrap().is_empty());
    assert_eq!(screen.form.contact_no, "555123456");
}

#[tokio::test]
async fn institute_selector_is_constrained_to_cached_list() {
    let store = Arc::new(MemoryStore::new());

    let mut institutes = InstituteScreen::new(Arc::clone(&store), INSTITUTES);
    institutes.form = acme_form();
    institutes.submit().await.unwrap();
    let institute_id = institutes.institutes()[0].id.clone();

    let mut screen = StudentScreen::new(store, STUDENTS, INSTITUTES);
    screen.load_institutes().await.unwrap();
    assert_eq!(screen.institute_choices().len(), 1);

    assert_eq!(
        screen.select_institute(&"nope".to_string()),
        Err(ValidationError::UnknownInstitute)
    );
    screen.select_institute(&institute_id).unwrap();
    assert_eq!(screen.form.institute_id, institute_id);
}

#[tokio::test]
async fn search_term_filters_across_fields() {
    let store = Arc::new(MemoryStore::new());
    let mut screen = StudentScreen::new(store, STUDENTS, INSTITUTES);

    screen.form = student_form("i1");
    screen.submit().await.unwrap();

    screen.set_search("fall");
    assert_eq!(screen.visible_students().len(), 1);

    screen.set_search("xyz");
    assert!(screen.visible_students().is_empty());

    screen.set_search("");
    assert_eq!(screen.visible_students().len(), 1);
}

#[tokio::test]
async fn showing_the_table_refetches_each_time() {
    let store = Arc::new(MemoryStore::new());
    let mut screen = StudentScreen::new(Arc::clone(&store), STUDENTS, INSTITUTES);

    assert!(!screen.table_visible());
    screen.form = student_form("i1");
    screen.submit().await.unwrap();

    assert!(screen.toggle_table().await.unwrap());
    assert_eq!(screen.visible_students().len(), 1);
    assert!(!screen.toggle_table().await.unwrap());

    // A second record lands while the table is hidden; showing it again
    // must pick the record up rather than reuse the cached rows.
    let mut fields = student_form("i1").to_fields();
    fields.insert("studentName".to_string(), "Bob".to_string());
    store.create(STUDENTS, fields).await.unwrap();

    assert!(screen.toggle_table().await.unwrap());
    assert_eq!(screen.visible_students().len(), 2);
}

#[tokio::test]
async fn export_covers_only_the_filtered_view() {
    let store = Arc::new(MemoryStore::new());
    let mut screen = StudentScreen::new(store, STUDENTS, INSTITUTES);

    screen.form = student_form("i1");
    screen.submit().await.unwrap();
    screen.form = StudentForm {
        student_name: "Bob".to_string(),
        semester: "Spring".to_string(),
        ..student_form("i1")
    };
    screen.submit().await.unwrap();

    screen.set_search("spring");
    let export = screen.export_csv();
    assert_eq!(export.filename, "students.csv");

    let lines: Vec<&str> = export.content.lines().collect();
    assert_eq!(
        lines[0],
        "id,instituteId,studentName,address,semester,contactNo"
    );
    assert_eq!(lines.len(), 2);
    assert!(lines[1].contains("Bob"));
    assert!(!export.content.contains("Ann"));
}

#[tokio::test]
async fn deleting_an_institute_leaves_its_students() {
    let store = Arc::new(MemoryStore::new());

    let mut institutes = InstituteScreen::new(Arc::clone(&store), INSTITUTES);
    institutes.form = acme_form();
    institutes.submit().await.unwrap();
    let institute_id = institutes.institutes()[0].id.clone();

    let mut students = StudentScreen::new(Arc::clone(&store), STUDENTS, INSTITUTES);
    students.form = student_form(&institute_id);
    students.submit().await.unwrap();

    institutes.remove(&institute_id).await.unwrap();
    assert!(institutes.institutes().is_empty());

    // The reference is orphaned, not cascaded.
    students.refresh().await.unwrap();
    assert_eq!(students.students().len(), 1);
    assert_eq!(students.students()[0].institute_id, institute_id);
}
