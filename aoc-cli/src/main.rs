//! AOC CLI - Command-line interface for running Advent of Code solvers

mod aggregator;
mod cli;
mod config;
mod error;
mod executor;
mod input;
mod output;

// Import aoc-solutions to link the solver plugins
use aoc_solutions as _;

use aoc_solver::SolverRegistryBuilder;
use clap::Parser;
use cli::Args;
use config::Config;
use error::CliError;
use executor::Executor;
use input::InputStore;
use output::OutputFormatter;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Log to stderr; RUST_LOG overrides the `-v` derived level
fn init_tracing(verbose: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config::default_log_level(verbose)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn run(args: Args) -> Result<(), CliError> {
    let config = Config::from_args(args)?;
    info!(input_dir = %config.input_dir.display(), threads = config.thread_count, "starting");

    if let Some(source) = &config.import {
        import_input(source, &config)?;
    }

    // Build registry with tag filtering (only once)
    let registry = build_registry(&config.tags)?;

    let executor =
        Executor::new(registry, &config).map_err(|e| CliError::Config(e.to_string()))?;

    let work_items = executor.collect_work_items();
    if work_items.is_empty() {
        println!("No solvers found matching the specified filters.");
        return Ok(());
    }

    // Report missing inputs before spending time on the rest
    for (year, day) in executor.missing_inputs(&work_items) {
        warn!("missing input for {}/day{:02}", year, day);
    }

    let expected_keys: Vec<aggregator::ResultKey> = work_items
        .iter()
        .flat_map(|w| {
            w.parts.clone().map(move |p| aggregator::ResultKey {
                year: w.year,
                day: w.day,
                part: p,
            })
        })
        .collect();

    if !config.quiet {
        println!("Running {} solver(s)...", work_items.len());
    }
    run_executor(executor, expected_keys, config.quiet)
}

/// Copy a file into the input store for the selected year/day
fn import_input(source: &std::path::Path, config: &Config) -> Result<(), CliError> {
    let (Some(year), Some(day)) = (config.year_filter, config.day_filter) else {
        return Err(CliError::Config(
            "--import needs both --year and --day".to_string(),
        ));
    };
    let contents = std::fs::read_to_string(source).map_err(|e| {
        CliError::Config(format!("Failed to read {}: {}", source.display(), e))
    })?;
    let path = InputStore::new(config.input_dir.clone()).put(year, day, &contents)?;
    info!(path = %path.display(), "imported input");
    Ok(())
}

/// Run the executor and print results in order
fn run_executor(
    executor: Executor,
    expected_keys: Vec<aggregator::ResultKey>,
    quiet: bool,
) -> Result<(), CliError> {
    let (tx, rx) = std::sync::mpsc::channel();

    // Run executor in background thread
    let executor_handle = std::thread::spawn(move || executor.execute(tx));

    let formatter = OutputFormatter::new(quiet);
    let mut aggregator = aggregator::ResultAggregator::new(expected_keys);
    let mut results = Vec::new();

    for result in rx {
        for ready in aggregator.add(result) {
            formatter.print_result(&ready);
            results.push(ready);
        }
    }

    for ready in aggregator.drain() {
        formatter.print_result(&ready);
        results.push(ready);
    }

    if !aggregator.is_complete() {
        warn!("not all expected results were received");
    }

    executor_handle
        .join()
        .map_err(|_| CliError::Config("Executor thread panicked".to_string()))??;

    formatter.print_summary(&results);

    Ok(())
}

/// Build registry with tag filtering
fn build_registry(tags: &[String]) -> Result<aoc_solver::SolverRegistry, CliError> {
    let builder = SolverRegistryBuilder::new();

    let builder = if tags.is_empty() {
        builder.register_all_plugins()?
    } else {
        builder.register_solver_plugins(|plugin| {
            tags.iter().all(|tag| plugin.tags.contains(&tag.as_str()))
        })?
    };

    Ok(builder.build())
}
