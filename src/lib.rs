pub mod api;
pub mod config;
pub mod logic;
pub mod model;
pub mod screen;
pub mod store;

// Export API types
pub use api::handlers;
pub use api::routes;

// Export logic types
pub use logic::{
    export_students, filter_students, matches_search, validate_institute, validate_student,
    CsvExport, ValidationError, EXPORT_FILENAME,
};

// Export all model types
pub use model::*;

// Export screen controllers
pub use screen::{AdminError, FormMode, InstituteScreen, StudentScreen};

// Export store types
pub use store::{MemoryStore, RecordStore, RemoteStore, StoreError};

use crate::api::handlers::AdminState;
use std::sync::Arc;

/// Builds the admin router over any store implementation. Shared by `main`
/// and the integration tests.
pub fn admin_router<S: RecordStore + 'static>(
    store: Arc<S>,
    config: &config::AppConfig,
) -> axum::Router {
    let state = AdminState {
        store,
        institutes: config.store.institutes_collection.clone(),
        students: config.store.students_collection.clone(),
    };
    api::routes::create_router().with_state(state)
}

// Function for integration testing
pub async fn run_server() -> anyhow::Result<()> {
    use axum::serve;
    use tokio::net::TcpListener;

    // Load environment variables from .env file if it exists
    dotenvy::dotenv().ok();

    // Initialize logging with INFO level only (suppress DEBUG logs)
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();

    // Load configuration
    let config = crate::config::AppConfig::load()?;

    let app = match config.store_url() {
        Some(base_url) => {
            let store = Arc::new(RemoteStore::new(&base_url, config.store.api_key.clone())?);
            admin_router(store, &config)
        }
        None => admin_router(Arc::new(MemoryStore::new()), &config),
    };

    let bind_address = config.server_address();
    let listener = TcpListener::bind(&bind_address).await?;

    serve(listener, app).await?;

    Ok(())
}
