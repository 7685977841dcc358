//! Brasa - a terminal dashboard for restaurant order fulfillment
//!
//! This library provides the core functionality for Brasa, including:
//! - Data models for orders, stage histories, and dashboard metrics
//! - Stage inference over an order's stage history
//! - An HTTP client for the fulfillment backend's three endpoints
//! - The active-orders board state (polling, optimistic patches)
//! - CLI command parsing, rendering, and the live watch loop
//! - Date/time formatting utilities
//!
//! All persistent state lives in the remote backend; everything here is a
//! transient, read-derived copy discarded on the next refresh.
//!
//! # Example
//!
//! ```no_run
//! use brasa::cli::run;
//!
//! #[tokio::main]
//! async fn main() {
//!     if let Err(e) = run().await {
//!         eprintln!("Error: {}", e);
//!         std::process::exit(1);
//!     }
//! }
//! ```

pub mod api;
pub mod board;
pub mod cli;
pub mod config;
pub mod infer;
pub mod models;
pub mod utils;
