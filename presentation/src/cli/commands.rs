//! CLI command definitions

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for batch results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// `tool_result` blocks as a JSON array
    Json,
    /// Human-readable listing
    Text,
}

/// CLI arguments for toolbatch
#[derive(Parser, Debug)]
#[command(name = "toolbatch")]
#[command(author, version, about = "Run LLM tool-call batches against a sandboxed workspace")]
#[command(long_about = r#"
toolbatch executes the tool calls of one model turn as a single batch.

Reads run concurrently, writes to the same path run in the order they were
made, and every call gets exactly one result, returned in call order.

Configuration files are loaded from (in priority order):
1. TOOLBATCH_* env vars  e.g. TOOLBATCH_SCHEDULER__MAX_CONCURRENCY=8
2. --config <path>       Explicit config file
3. ./toolbatch.toml      Project-level config
4. ~/.config/toolbatch/config.toml   Global config

Example:
  toolbatch run calls.json
  cat calls.json | toolbatch run - --output text
  toolbatch check-path src/main.rs .env ../outside
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a JSON array of tool calls as one batch
    Run(RunArgs),

    /// Print the JSON schemas of the registered tools
    Tools {
        /// Only tools that never modify the workspace
        #[arg(long)]
        read_only: bool,
    },

    /// Show whether paths are inside the workspace and allowed
    CheckPath {
        /// Paths to check, relative to the workspace root or absolute
        #[arg(required = true, value_name = "PATH")]
        paths: Vec<String>,

        /// Workspace root (default: config or current directory)
        #[arg(long, value_name = "DIR")]
        root: Option<PathBuf>,
    },

    /// Show configuration file locations
    Config,
}

#[derive(Args, Debug)]
pub struct RunArgs {
    /// File holding the tool calls, or `-` for stdin
    #[arg(value_name = "FILE")]
    pub input: PathBuf,

    /// Workspace root (default: config or current directory)
    #[arg(long, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Maximum units of work in flight
    #[arg(short = 'j', long, value_name = "N")]
    pub concurrency: Option<usize>,

    /// Run against an empty in-memory workspace instead of the disk
    #[arg(long = "virtual")]
    pub virtual_store: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    pub output: OutputFormat,
}

impl RunArgs {
    pub fn reads_stdin(&self) -> bool {
        self.input.as_os_str() == "-"
    }
}
