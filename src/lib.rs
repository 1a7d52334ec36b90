//! checklist - a personal command-line checklist manager
//!
//! Items (title, checked status, tags) live in a JSON document in a local
//! data directory, next to a counter file holding the next id to assign.
//! Every CLI invocation loads the whole store, applies one command, and
//! writes it back.
//!
//! # Module Organization
//!
//! - `cli`: Command-line interface using clap, one submodule per command
//! - `config`: Optional `config.toml` and data directory resolution
//! - `error`: Error types and result aliases
//! - `filter`: `all` / `checked` / `unchecked` / `tagged` keyword parsing
//! - `id`: Base-36 item ids shown to users
//! - `item`: A single checklist entry and tag toggling
//! - `lock`: Data directory lock and atomic file replacement
//! - `output`: Human and JSON output
//! - `storage`: Data files on disk
//! - `store`: In-memory items plus the id counter

pub mod cli;
pub mod config;
pub mod error;
pub mod filter;
pub mod id;
pub mod item;
pub mod lock;
pub mod output;
pub mod storage;
pub mod store;

pub use error::{Error, Result};
pub use item::Item;
pub use storage::Storage;
pub use store::Store;
