//! Presentation layer for toolbatch
//!
//! This crate contains the CLI definitions and the formatters that turn
//! batch outcomes, tool schemas and sandbox verdicts into terminal output.

pub mod cli;
pub mod output;

// Re-export commonly used types
pub use cli::commands::{Cli, Command, OutputFormat, RunArgs};
pub use output::console::ConsoleFormatter;
pub use output::formatter::OutputFormatter;
pub use output::path_check::{PathCheck, PathVerdict};
