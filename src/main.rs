use std::sync::Arc;

use dotenvy::dotenv;
use envconfig::Envconfig;

use meditrack::{config::Config, db, handlers, state::AppState};

type Error = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    log::info!("Starting the medicine tracker...");

    // Load environment variables from a .env file if present
    dotenv().ok();

    let config = Config::init_from_env()?;

    // Connect to PostgreSQL, creating the database and schema if missing
    let pool = db::init_db(&config.database_url).await?;

    let bind_addr = config.bind_addr.clone();
    let state = Arc::new(AppState { pool, config });
    let app = handlers::router(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    log::info!("Listening on {bind_addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    log::info!("Shutting down gracefully");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to install Ctrl+C handler: {e}");
    }
}
