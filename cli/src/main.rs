//! CLI entrypoint for toolbatch
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::AsyncReadExt;
use toolbatch_application::{ExecutionContext, StorageBinding, ToolScheduler, ToolSchemaPort};
use toolbatch_domain::ToolCall;
use toolbatch_infrastructure::{
    ConfigLoader, FileConfig, InMemoryWorkspace, JsonSchemaToolConverter, default_registry,
};
use toolbatch_presentation::{Cli, Command, ConsoleFormatter, OutputFormat, PathCheck, RunArgs};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level; RUST_LOG wins when set
    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let file_config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow::anyhow!("failed to load configuration: {e}"))?
    };
    debug!(?file_config, "Configuration loaded");

    match cli.command {
        Command::Run(args) => run(args, &file_config).await,
        Command::Tools { read_only } => tools(read_only, &file_config),
        Command::CheckPath { paths, root } => check_paths(&paths, root, &file_config),
        Command::Config => {
            ConfigLoader::print_config_sources(cli.config.as_ref());
            Ok(())
        }
    }
}

async fn run(args: RunArgs, file_config: &FileConfig) -> Result<()> {
    let raw = if args.reads_stdin() {
        let mut buf = String::new();
        tokio::io::stdin()
            .read_to_string(&mut buf)
            .await
            .context("failed to read tool calls from stdin")?;
        buf
    } else {
        tokio::fs::read_to_string(&args.input)
            .await
            .with_context(|| format!("failed to read {}", args.input.display()))?
    };
    let calls: Vec<ToolCall> =
        serde_json::from_str(&raw).context("expected a JSON array of tool calls")?;

    let mut agent_config = file_config.to_agent_config()?;
    if let Some(concurrency) = args.concurrency {
        agent_config.scheduler = agent_config.scheduler.with_max_concurrency(concurrency);
    }

    // === Dependency Injection ===
    let root = args
        .root
        .clone()
        .unwrap_or_else(|| file_config.workspace.root_path());
    let mut context = ExecutionContext::new(root, Arc::new(agent_config))?;
    if args.virtual_store {
        let binding = StorageBinding::new(
            Arc::new(InMemoryWorkspace::new()),
            file_config.workspace.app_id.clone(),
        );
        context = context.with_storage(binding);
    }

    let scheduler = ToolScheduler::builder(default_registry(), context)
        .rate_limiter(Arc::new(file_config.rate_limit.to_limiter()))
        .metrics(file_config.metrics.build_sink())
        .build();

    info!(
        calls = calls.len(),
        root = %scheduler.context().working_root().display(),
        virtual_store = args.virtual_store,
        "Running batch"
    );
    let outcomes = scheduler.run_batch(calls.clone()).await;

    let output = match args.output {
        OutputFormat::Json => ConsoleFormatter::format_json(&outcomes),
        OutputFormat::Text => ConsoleFormatter::format(&calls, &outcomes),
    };
    println!("{}", output);

    Ok(())
}

fn tools(read_only: bool, file_config: &FileConfig) -> Result<()> {
    let agent_config = file_config.to_agent_config()?;
    let spec = default_registry().spec();
    let converter = JsonSchemaToolConverter;

    let schemas = if read_only {
        converter.read_only_tools_schema(&spec, &agent_config.scheduler.mutating_tools)
    } else {
        converter.all_tools_schema(&spec)
    };
    println!("{}", serde_json::to_string_pretty(&schemas)?);

    Ok(())
}

fn check_paths(paths: &[String], root: Option<PathBuf>, file_config: &FileConfig) -> Result<()> {
    let agent_config = file_config.to_agent_config()?;
    let root = root.unwrap_or_else(|| file_config.workspace.root_path());
    let context = ExecutionContext::new(root, Arc::new(agent_config))?;

    let checks: Vec<PathCheck> = paths
        .iter()
        .map(|path| PathCheck::evaluate(&context, path))
        .collect();
    println!("{}", ConsoleFormatter::format_path_checks(&checks));

    if checks.iter().all(PathCheck::is_allowed) {
        Ok(())
    } else {
        std::process::exit(1);
    }
}
