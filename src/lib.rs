//! Library crate for member-admin.
//!
//! This crate exposes the building blocks of the TUI:
//! - Application state, reducer and event loop (`app`)
//! - Command-line configuration (`config`)
//! - Error and result types (`error`)
//! - In-memory search helpers (`search`)
//! - Remote member source (`source`)
//! - UI rendering and widgets (`ui`)
//!
//! It is used by the `member-admin` binary and by tests.
#![doc = include_str!("../README.md")]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod app;
pub mod config;
pub mod error;
pub mod search;
pub mod source;
pub mod ui;

// Re-export commonly used items at the crate root for convenience
/// Convenient error and result types shared across the crate.
pub use error::{DynError, Result};
