//! # QuoteDesk Entry Point
//!
//! ## Application Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        QuoteDesk                                        │
//! │                                                                         │
//! │  main.rs ────► starts the tokio runtime, calls quotedesk_lib::run()    │
//! │                                                                         │
//! │  lib.rs ─────► logging, config, catalog load, shell                    │
//! │                                                                         │
//! │  commands/ ──► add_to_cart, preview_price, export_quote, ...           │
//! │                                                                         │
//! │  state/ ─────► Session, AppConfig                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

#[tokio::main]
async fn main() {
    // The actual setup is in lib.rs for better testability
    if let Err(e) = quotedesk_lib::run().await {
        eprintln!("quotedesk: {}", e);
        std::process::exit(1);
    }
}
