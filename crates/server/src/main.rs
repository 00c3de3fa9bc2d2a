//! Container entrypoint for the ski trip planner.
//!
//! Always serves HTTP, regardless of the configured mode; the `ski-planner`
//! CLI is the binary that honours `APP_MODE`.

use anyhow::Result;
use clap::Parser;
use tracing::{info, warn};

use server::{AppConfig, TripPlanner, init_tracing};

#[derive(Parser)]
#[command(name = "ski-planner-server")]
#[command(about = "HTTP server for the ski trip planner", long_about = None)]
struct Cli {
    #[command(flatten)]
    config: AppConfig,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(&cli.config.log_level);

    info!("Starting ski planner server");
    if !cli.config.has_credentials() {
        warn!("AWS_BEARER_TOKEN_BEDROCK is not set; /invocations will fail until it is");
    }

    let planner = TripPlanner::from_config(cli.config.bedrock_config())?;
    server::http::serve(&cli.config, planner).await
}
