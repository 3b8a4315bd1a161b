use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json},
    Json as RequestJson,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::logic::{export_students, filter_students, validate_institute, validate_student};
use crate::model::{Id, Institute, InstituteForm, Student, StudentForm};
use crate::store::{RecordStore, StoreError};

/// Shared handler state: the store plus the two collection names from
/// configuration.
pub struct AdminState<S> {
    pub store: Arc<S>,
    pub institutes: String,
    pub students: String,
}

impl<S> Clone for AdminState<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            institutes: self.institutes.clone(),
            students: self.students.clone(),
        }
    }
}

/// Simple health check endpoint
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub search: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ListResponse<T> {
    pub items: Vec<T>,
    pub total: usize,
}

impl<T> ListResponse<T> {
    fn new(items: Vec<T>) -> Self {
        let total = items.len();
        Self { items, total }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: &str) -> Self {
        Self {
            error: message.to_string(),
        }
    }
}

type HandlerError = (StatusCode, Json<ErrorResponse>);

fn store_failure(err: StoreError) -> HandlerError {
    (
        StatusCode::BAD_GATEWAY,
        Json(ErrorResponse::new(&err.to_string())),
    )
}

fn rejected(message: &str) -> HandlerError {
    (StatusCode::BAD_REQUEST, Json(ErrorResponse::new(message)))
}

async fn fetch_institutes<S: RecordStore>(
    state: &AdminState<S>,
) -> Result<Vec<Institute>, StoreError> {
    let records = state.store.list_all(&state.institutes).await?;
    Institute::parse_all(&records)
}

async fn fetch_students<S: RecordStore>(
    state: &AdminState<S>,
) -> Result<Vec<Student>, StoreError> {
    let records = state.store.list_all(&state.students).await?;
    Student::parse_all(&records)
}

pub async fn list_institutes<S: RecordStore>(
    State(state): State<AdminState<S>>,
) -> Result<Json<ListResponse<Institute>>, HandlerError> {
    match fetch_institutes(&state).await {
        Ok(institutes) => Ok(Json(ListResponse::new(institutes))),
        Err(e) => Err(store_failure(e)),
    }
}

/// Creates an institute, then responds with the refetched collection so the
/// caller's view refreshes in the same round trip.
pub async fn create_institute<S: RecordStore>(
    State(state): State<AdminState<S>>,
    RequestJson(form): RequestJson<InstituteForm>,
) -> Result<Json<ListResponse<Institute>>, HandlerError> {
    if let Err(e) = validate_institute(&form) {
        return Err(rejected(&e.to_string()));
    }
    match state.store.create(&state.institutes, form.to_fields()).await {
        Ok(_) => {}
        Err(e) => return Err(store_failure(e)),
    }
    match fetch_institutes(&state).await {
        Ok(institutes) => Ok(Json(ListResponse::new(institutes))),
        Err(e) => Err(store_failure(e)),
    }
}

/// Full-field overwrite of an existing institute, then the refetched
/// collection.
pub async fn update_institute<S: RecordStore>(
    State(state): State<AdminState<S>>,
    Path(id): Path<Id>,
    RequestJson(form): RequestJson<InstituteForm>,
) -> Result<Json<ListResponse<Institute>>, HandlerError> {
    if let Err(e) = validate_institute(&form) {
        return Err(rejected(&e.to_string()));
    }
    match state
        .store
        .update_by_id(&state.institutes, &id, form.to_fields())
        .await
    {
        Ok(()) => {}
        Err(e) => return Err(store_failure(e)),
    }
    match fetch_institutes(&state).await {
        Ok(institutes) => Ok(Json(ListResponse::new(institutes))),
        Err(e) => Err(store_failure(e)),
    }
}

/// Deletes an institute. No confirmation and no check for students still
/// referencing it; they are left in place.
pub async fn delete_institute<S: RecordStore>(
    State(state): State<AdminState<S>>,
    Path(id): Path<Id>,
) -> Result<Json<ListResponse<Institute>>, HandlerError> {
    match state.store.delete_by_id(&state.institutes, &id).await {
        Ok(()) => {}
        Err(e) => return Err(store_failure(e)),
    }
    match fetch_institutes(&state).await {
        Ok(institutes) => Ok(Json(ListResponse::new(institutes))),
        Err(e) => Err(store_failure(e)),
    }
}

/// Lists students, filtered by the optional `search` term the same way the
/// screen's live filter works.
pub async fn list_students<S: RecordStore>(
    State(state): State<AdminState<S>>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<ListResponse<Student>>, HandlerError> {
    match fetch_students(&state).await {
        Ok(students) => {
            let term = query.search.unwrap_or_default();
            Ok(Json(ListResponse::new(filter_students(students, &term))))
        }
        Err(e) => Err(store_failure(e)),
    }
}

pub async fn create_student<S: RecordStore>(
    State(state): State<AdminState<S>>,
    RequestJson(form): RequestJson<StudentForm>,
) -> Result<Json<ListResponse<Student>>, HandlerError> {
    if let Err(e) = validate_student(&form) {
        return Err(rejected(&e.to_string()));
    }
    match state.store.create(&state.students, form.to_fields()).await {
        Ok(_) => {}
        Err(e) => return Err(store_failure(e)),
    }
    match fetch_students(&state).await {
        Ok(students) => Ok(Json(ListResponse::new(students))),
        Err(e) => Err(store_failure(e)),
    }
}

pub async fn update_student<S: RecordStore>(
    State(state): State<AdminState<S>>,
    Path(id): Path<Id>,
    RequestJson(form): RequestJson<StudentForm>,
) -> Result<Json<ListResponse<Student>>, HandlerError> {
    if let Err(e) = validate_student(&form) {
        return Err(rejected(&e.to_string()));
    }
    match state
        .store
        .update_by_id(&state.students, &id, form.to_fields())
        .await
    {
        Ok(()) => {}
        Err(e) => return Err(store_failure(e)),
    }
    match fetch_students(&state).await {
        Ok(students) => Ok(Json(ListResponse::new(students))),
        Err(e) => Err(store_failure(e)),
    }
}

pub async fn delete_student<S: RecordStore>(
    State(state): State<AdminState<S>>,
    Path(id): Path<Id>,
) -> Result<Json<ListResponse<Student>>, HandlerError> {
    match state.store.delete_by_id(&state.students, &id).await {
        Ok(()) => {}
        Err(e) => return Err(store_failure(e)),
    }
    match fetch_students(&state).await {
        Ok(students) => Ok(Json(ListResponse::new(students))),
        Err(e) => Err(store_failure(e)),
    }
}

/// Downloads the filtered student view as CSV under the fixed filename.
pub async fn export_students_csv<S: RecordStore>(
    State(state): State<AdminState<S>>,
    Query(query): Query<SearchQuery>,
) -> Result<impl IntoResponse, HandlerError> {
    let students = match fetch_students(&state).await {
        Ok(students) => students,
        Err(e) => return Err(store_failure(e)),
    };
    let term = query.search.unwrap_or_default();
    let export = export_students(&filter_students(students, &term));
    let headers = [
        (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", export.filename),
        ),
    ];
    Ok((headers, export.content))
}
