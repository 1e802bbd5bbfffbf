//! `electropanel-web`: the JSON API for one panel.
//!
//! # Usage
//!
//! ```bash
//! # Start with an empty in-memory panel on port 3001
//! electropanel-web
//!
//! # Edit a panel file; POST /api/panel/save writes it back
//! electropanel-web --port 8080 --panel kitchen.panel.json
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use electropanel::logging;
use electropanel::models::PanelProject;
use electropanel::web::{self, AppState};

/// Serve a panel over HTTP as JSON
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Address to bind
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// TCP port
    #[arg(short, long, default_value_t = 3001)]
    port: u16,

    /// Panel file to edit. Created on first save when missing.
    #[arg(long, value_name = "FILE")]
    panel: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    logging::init_stderr(args.verbose);

    let addr: SocketAddr = format!("{}:{}", args.host, args.port)
        .parse()
        .with_context(|| format!("Invalid listen address {}:{}", args.host, args.port))?;

    let state = if let Some(path) = args.panel {
        info!(path = %path.display(), "editing panel file");
        AppState::open(path)?
    } else {
        info!("no panel file given, changes stay in memory");
        AppState::new(PanelProject::new("Untitled Panel")?, None)?
    };

    web::run_server(state, addr).await
}
