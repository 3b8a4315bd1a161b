use axum::serve;
use campus_admin::admin_router;
use campus_admin::config::AppConfig;
use campus_admin::store::{MemoryStore, RemoteStore};
use std::sync::Arc;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file if it exists
    dotenvy::dotenv().ok();

    // Initialize logging with explicit filter to suppress hyper debug logs
    use env_logger::Builder;
    use log::LevelFilter;

    Builder::new()
        .filter_level(LevelFilter::Info) // Default to Info for everything
        .filter_module("hyper", LevelFilter::Warn) // Suppress hyper Debug logs
        .filter_module("reqwest", LevelFilter::Warn)
        .init();

    println!("Campus Admin: Institute & Student Management");

    // Load configuration
    let config = AppConfig::load()?;
    println!(
        "Configuration loaded: server={}:{}",
        config.server.host, config.server.port
    );

    let app = match config.store_url() {
        Some(base_url) => {
            println!("Using hosted document store at {}", base_url);
            let store = Arc::new(RemoteStore::new(&base_url, config.store.api_key.clone())?);
            admin_router(store, &config)
        }
        None => {
            println!("No store URL configured, using in-process store");
            admin_router(Arc::new(MemoryStore::new()), &config)
        }
    };

    run_server(app, &config).await?;

    Ok(())
}

async fn run_server(app: axum::Router, config: &AppConfig) -> anyhow::Result<()> {
    let bind_address = config.server_address();
    let listener = TcpListener::bind(&bind_address).await?;
    println!("Campus Admin server running on http://{}", bind_address);
    println!(
        "Institute screen at http://{}/index.html, student screen at http://{}/students.html",
        bind_address, bind_address
    );

    serve(listener, app).await?;

    Ok(())
}
