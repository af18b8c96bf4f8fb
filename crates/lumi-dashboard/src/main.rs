//! Lumi Dashboard server
//!
//! Starts the dashboard HTTP server for the rule flow chart and agent files.

use lumi_dashboard::{config::DashboardConfig, start_server, DashboardError};
use std::env;
use std::process;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

async fn run() -> Result<(), DashboardError> {
    let args: Vec<String> = env::args().collect();

    let config = if args.len() > 2 && args[1] == "--config" {
        DashboardConfig::from_file(&args[2])?
    } else if args.len() > 1 && args[1] == "--help" {
        print_help();
        process::exit(0);
    } else {
        tracing::warn!("No config file specified, using the home workspace defaults");
        DashboardConfig::default_config()
    };

    start_server(config).await?;

    Ok(())
}

fn print_help() {
    println!("Lumi Dashboard - Behavior rule flow chart and agent admin");
    println!();
    println!("USAGE:");
    println!("    lumi-dashboard [--config <path-to-config.toml>]");
    println!();
    println!("OPTIONS:");
    println!("    --config <file>    Load configuration from TOML file");
    println!("    --help             Print this help message");
    println!();
    println!("ENDPOINTS:");
    println!("    GET  /api/flowchart          Mermaid flow chart and rule samples");
    println!("    GET  /api/stats              Workspace statistics");
    println!("    GET  /api/status             Heartbeat status");
    println!("    GET  /api/dashboard          Agent listing");
    println!("    GET  /api/file?agent=&file=  Read an agent file");
    println!("    POST /api/file               Save an agent file");
    println!();
    println!("CONFIGURATION:");
    println!("    - bind_address / bind_port (default 0.0.0.0:3001)");
    println!("    - workspace_dir (default ~/.openclaw/workspace)");
    println!("    - status_file, static_dir (default under <workspace>/lumi-dashboard)");
    println!("    - sample_limit, flowchart_style (compact | detailed)");
    println!("    - [[agents]] with id, name, online, skills and a files alias table");
    println!();
    println!("Log level is read from RUST_LOG (default: info).");
}
