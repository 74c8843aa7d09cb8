//! Mission Control - dashboard data service entry point

use clap::Parser;
use mission_control::{ApiServer, ServerConfig};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "mission-control", version, about = "Mission Control dashboard data service")]
struct Cli {
    /// Port to listen on
    #[arg(long, env = "PORT")]
    port: Option<u16>,

    /// Root directory for static assets
    #[arg(long, env = "MISSION_CONTROL_PUBLIC_DIR")]
    public_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("mission_control=info,tower_http=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let mut config = ServerConfig::from_env();
    if let Some(port) = cli.port {
        config.addr.set_port(port);
    }
    if let Some(dir) = cli.public_dir {
        config.public_dir = dir;
    }

    ApiServer::new(config)?.serve().await?;
    Ok(())
}
