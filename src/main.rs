//! Main entry point for the Kaizen MCP server
//!
//! This file sets up logging, reads configuration from the command line and
//! environment, and starts the MCP server. The server speaks JSON-RPC over
//! stdin/stdout, so all logging goes to stderr.
//!
//! The process exits 0 when stdin reaches a clean end of stream. Any framing
//! error ends the serve loop and exits non-zero, including a stream that stops
//! partway through a header block or payload.

use std::time::Duration;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use kaizen_mcp::config::{DEFAULT_API_BASE_URL, DEFAULT_TOOL_TIMEOUT};
use kaizen_mcp::{Config, KaizenServer};

/// Command line arguments for the Kaizen MCP server
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Base URL of the Kaizen API
    #[arg(long, env = "KAIZEN_API_BASE_URL", default_value = DEFAULT_API_BASE_URL)]
    api_base_url: String,

    /// Bearer token for the Kaizen API
    #[arg(long, env = "KAIZEN_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Deadline for a single tool call, in seconds
    #[arg(long, env = "KAIZEN_TOOL_TIMEOUT_SECS", default_value_t = DEFAULT_TOOL_TIMEOUT.as_secs())]
    tool_timeout_secs: u64,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Enable verbose output (implies debug)
    #[arg(short, long)]
    verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    log_json: bool,
}

fn init_logging(args: &Args) {
    let log_level = if args.verbose {
        "debug"
    } else if args.debug {
        "info"
    } else {
        "warn"
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("kaizen_mcp={}", log_level)));

    // stdout carries the protocol
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if args.log_json {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    init_logging(&args);

    info!("Starting Kaizen MCP server");

    let config = Config::new(args.api_base_url, args.api_key)
        .with_tool_timeout(Duration::from_secs(args.tool_timeout_secs.max(1)));

    let server = KaizenServer::new(config)?;

    if let Err(e) = server.run().await {
        error!("MCP server stopped with error: {}", e);
        return Err(e.into());
    }

    info!("Kaizen MCP server shutdown complete");
    Ok(())
}
