//! DocuSeal MCP Server
//!
//! A Model Context Protocol server that exposes DocuSeal document signing
//! to agent runtimes.
//!
//! # Usage
//!
//! ```bash
//! docuseal-mcp [--base-url <url>] [--api-key <key>]
//! ```
//!
//! # Environment Variables
//!
//! - `DOCUSEAL_API_KEY`: API token sent as `X-Auth-Token` (required for tool calls)
//! - `DOCUSEAL_BASE_URL`: Self-hosted API endpoint (default: `https://api.docuseal.co`)
//! - `RUST_LOG`: Control log verbosity (default: `docuseal_mcp=info,docuseal_api=info`)
//!
//! # Protocol
//!
//! The server communicates via JSON-RPC 2.0 over stdio:
//! - Requests/responses go through stdout
//! - Logs go to stderr (to avoid interfering with the protocol)

use clap::Parser;
use docuseal_api::{Config, DocusealClient};
use docuseal_mcp::DocusealMcpServer;

/// MCP server for DocuSeal
#[derive(Parser)]
#[command(name = "docuseal-mcp")]
#[command(about = "MCP server for the DocuSeal document-signing API")]
#[command(version)]
struct Args {
    /// DocuSeal API base URL (overrides DOCUSEAL_BASE_URL)
    #[arg(long)]
    base_url: Option<String>,

    /// DocuSeal API key (overrides DOCUSEAL_API_KEY)
    #[arg(long)]
    api_key: Option<String>,
}

impl Args {
    /// Environment first, then command-line overrides
    fn into_config(self) -> Config {
        let mut config = Config::from_env();
        if let Some(base_url) = self.base_url {
            config = config.with_base_url(base_url);
        }
        if let Some(key) = self.api_key {
            config = config.with_api_key(key);
        }
        config
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging to stderr (stdout is reserved for MCP protocol)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("docuseal_mcp=info".parse()?)
                .add_directive("docuseal_api=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let args = Args::parse();
    let config = args.into_config();

    tracing::info!(?config, "Starting docuseal-mcp server");

    let client = DocusealClient::with_http(config);
    let mut server = DocusealMcpServer::new(client);

    if let Err(e) = server.run().await {
        tracing::error!(error = %e, "MCP server terminated");
        std::process::exit(1);
    }

    Ok(())
}
