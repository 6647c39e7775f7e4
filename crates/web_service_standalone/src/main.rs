use std::env;
use std::path::PathBuf;

use log::{error, info};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    info!("Starting standalone excerpt service...");

    let port = env::var("APP_PORT")
        .ok()
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(8080);

    let app_data_dir = env::var("EXCERPT_DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("."));

    if let Err(e) = web_service::server::run(app_data_dir, port).await {
        error!("Failed to run excerpt service: {e}");
        std::process::exit(1);
    }
}
