//! Example to run the LUDO server standalone
//!
//! Run with: cargo run -p ludo-server --example run_server

use ludo_server::{run_server, ServerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let config = ServerConfig {
        seed: Some(42),
        ..ServerConfig::default()
    };

    println!("Starting LUDO server on port {}", config.port);
    if config.has_static_dir() {
        println!("Static files from: {}", config.static_dir);
        println!("Open http://localhost:{}/", config.port);
    } else {
        println!("No board UI at {}; only the API is served", config.static_dir);
        println!("Try: curl http://localhost:{}/api/game", config.port);
    }

    run_server(config).await
}
