//! CLI module
//!
//! Command-line interface for the metadata inspector.

pub mod args;
pub mod config;
pub mod output;

pub use args::CliArgs;
pub use config::{Config, OutputFormat};
pub use output::{format_bytes, render_json, render_text};
