//! Configuration system for the fontpair explorer.
//!
//! This crate provides configuration loading, saving, and default values
//! for the explorer. It includes:
//!
//! - Catalog source selection (URL or local JSON file)
//! - Pagination, search and restore timing knobs
//! - XDG-style path helpers shared with the selection state file

pub mod config;
pub mod defaults;
pub mod error;
mod persistence;
mod types;

pub use config::Config;
pub use error::ConfigError;
pub use types::LogLevel;
