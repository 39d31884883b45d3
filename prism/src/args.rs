use std::path::PathBuf;

use clap::Parser;

/// Prism image gateway
#[derive(Debug, Parser)]
#[command(
    name = "prism",
    about = "Gateway for image generation, background removal, and upscaling"
)]
pub struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "prism.toml", env = "PRISM_CONFIG")]
    pub config: PathBuf,

    /// Override the listen address
    #[arg(long, env = "PRISM_LISTEN")]
    pub listen: Option<std::net::SocketAddr>,

    /// Emit logs as JSON lines
    #[arg(long, env = "PRISM_LOG_JSON")]
    pub log_json: bool,
}
