use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower_http::services::ServeDir;

use crate::api::handlers::{self, AdminState};
use crate::store::RecordStore;

pub fn create_router<S: RecordStore + 'static>() -> Router<AdminState<S>> {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Institute screen
        .route("/institutes", get(handlers::list_institutes::<S>))
        .route("/institutes", post(handlers::create_institute::<S>))
        .route("/institutes/:id", put(handlers::update_institute::<S>))
        .route("/institutes/:id", delete(handlers::delete_institute::<S>))
        // Student screen
        .route("/students", get(handlers::list_students::<S>))
        .route("/students", post(handlers::create_student::<S>))
        .route("/students/:id", put(handlers::update_student::<S>))
        .route("/students/:id", delete(handlers::delete_student::<S>))
        .route("/students/export", get(handlers::export_students_csv::<S>))
        // Static shell for the two screens
        .fallback_service(ServeDir::new("static"))
}
