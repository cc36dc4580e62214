//! # QuoteDesk Application Library
//!
//! Core library for the QuoteDesk order form.
//! This is the main entry point that configures and runs the app.
//!
//! ## Module Organization
//! ```text
//! quotedesk_lib/
//! ├── lib.rs          ◄─── You are here (startup & run)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── session.rs  ◄─── Catalog state, cart, discount, customer
//! │   └── config.rs   ◄─── Configuration from the environment
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   ├── catalog.rs  ◄─── Catalog load, lookup, suggestions
//! │   ├── cart.rs     ◄─── Cart manipulation commands
//! │   └── quote.rs    ◄─── Customer block and export
//! ├── render.rs       ◄─── DocumentRenderer / HtmlRenderer
//! ├── shell.rs        ◄─── Terminal order form
//! └── error.rs        ◄─── API error type for commands
//! ```

pub mod commands;
pub mod error;
pub mod render;
pub mod shell;
pub mod state;

use std::io;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use render::HtmlRenderer;
use shell::Shell;
use state::{AppConfig, Session};

/// Runs the order form on stdin/stdout.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Application Startup                               │
/// │                                                                         │
/// │  1. Initialize Logging ───────────────────────────────────────────────► │
/// │     • tracing-subscriber with env filter, written to stderr             │
/// │     • Default: info,quotedesk=debug, can be overridden with RUST_LOG    │
/// │                                                                         │
/// │  2. Load Configuration ───────────────────────────────────────────────► │
/// │     • QUOTEDESK_* environment variables over defaults                   │
/// │                                                                         │
/// │  3. Load Catalog (async) ─────────────────────────────────────────────► │
/// │     • Failure is reported; the form still opens, empty                  │
/// │                                                                         │
/// │  4. Run Shell ────────────────────────────────────────────────────────► │
/// │     • One command per line until quit / end of input                    │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run() -> io::Result<()> {
    init_tracing();

    info!("Starting QuoteDesk");

    let config = AppConfig::from_env();
    info!(catalog_path = %config.catalog_path.display(), "Configuration loaded");

    let mut session = Session::new();
    if let Err(e) = commands::catalog::load_catalog(&mut session, &config).await {
        warn!(code = ?e.code, "Starting without a catalog: {}", e.message);
    }

    let renderer = Box::new(HtmlRenderer::from_config(&config));
    let mut shell = Shell::new(session, config, renderer);

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    shell.run(stdin.lock(), &mut stdout)?;

    info!("QuoteDesk closed");
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=quotedesk=trace` - Show trace for quotedesk crates only
/// - Default: `info,quotedesk=debug`
///
/// Logs go to stderr so they never interleave with the form on stdout.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,quotedesk=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
