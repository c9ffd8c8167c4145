//! # User Service
//!
//! Thin entry point that delegates to lib-web for server setup.

use lib_web::{init_config, init_tracing, start_server};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    init_tracing()?;

    info!("Loading configuration...");
    let config = init_config()?.clone();
    info!("Configuration loaded: {:?}", config);

    start_server(config).await
}
