//! # Commands Module
//!
//! Every action the order form can take, as plain functions over the session.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (exports)
//! ├── catalog.rs  ◄─── Catalog load, suggestions, price preview
//! ├── cart.rs     ◄─── Cart manipulation, overall discount
//! └── quote.rs    ◄─── Customer block, document export
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  Shell                                                                  │
//! │  ─────                                                                  │
//! │  > add 2 10 001 - Hemograma                                             │
//! │         │                                                               │
//! │         │ (parsed into ShellCommand::Add)                               │
//! │         ▼                                                               │
//! │  Commands                                                               │
//! │  ────────                                                               │
//! │  fn add_to_cart(                                                        │
//! │      session: &mut Session,   ◄── Owned by the shell                   │
//! │      query: &str,                                                       │
//! │      quantity: Option<i64>,                                             │
//! │      discount: &str,                                                    │
//! │  ) -> Result<CartResponse, ApiError>                                    │
//! │         │                                                               │
//! │         │ (rendered as text, or JSON for `json`)                        │
//! │         ▼                                                               │
//! │  Shell prints the updated cart or the error message                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Responses are `Serialize` DTOs, so a browser front end can call the same
//! functions and receive JSON.

pub mod cart;
pub mod catalog;
pub mod quote;
