//! `aoc`: runs Advent of Code solvers against puzzle inputs stored on disk

mod aggregator;
mod cli;
mod config;
mod error;
mod executor;
mod output;
mod store;

// Link aoc-solutions so its solver plugins are collected
use aoc_solutions as _;

use aggregator::{ResultAggregator, ResultKey};
use aoc_solver::{SolverRegistry, SolverRegistryBuilder};
use clap::Parser;
use cli::Args;
use config::Config;
use error::{ArcExecutorError, CliError, ExecutorError};
use executor::{Executor, WorkItem};
use output::{OutputFormatter, Tally};
use std::process::ExitCode;
use std::sync::mpsc;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(&args);

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Log to stderr so stdout only carries answers
fn init_logging(args: &Args) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(args.log_level()));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .init();
}

fn run(args: Args) -> Result<(), CliError> {
    let config = Config::from_args(args)?;
    let registry = build_registry(&config.tags)?;
    info!(
        solvers = registry.storage().len(),
        threads = config.thread_count,
        mode = ?config.parallelize_by,
        "registry ready"
    );

    let executor = Executor::new(registry, &config).map_err(ArcExecutorError::from)?;
    let work_items = executor.collect_work_items();
    if work_items.is_empty() {
        println!("No solvers match the given year, day and tag filters.");
        return Ok(());
    }
    report_missing_inputs(&executor, &work_items);

    let tally = run_executor(executor, &work_items, config.quiet)?;
    if tally.is_success() {
        return Ok(());
    }
    Err(CliError::Unsuccessful {
        failed: tally.failed,
        mismatched: tally.incorrect,
    })
}

fn report_missing_inputs(executor: &Executor, work_items: &[WorkItem]) {
    let store = executor.store();
    let missing: Vec<_> = work_items
        .iter()
        .filter(|w| !store.contains(w.year, w.day))
        .map(|w| store.input_path(w.year, w.day))
        .collect();
    if missing.is_empty() {
        return;
    }
    warn!(dir = %store.dir().display(), "{} input file(s) missing", missing.len());
    for path in missing {
        warn!("  {}", path.display());
    }
}

/// Execute on a worker thread while this thread prints results in key order
fn run_executor(
    executor: Executor,
    work_items: &[WorkItem],
    quiet: bool,
) -> Result<Tally, CliError> {
    let formatter = OutputFormatter::new(quiet);
    if !quiet {
        let parts: usize = work_items.iter().map(|w| w.parts.len()).sum();
        println!("Solving {parts} part(s) across {} day(s)", work_items.len());
    }

    let mut aggregator = ResultAggregator::new(work_items.iter().flat_map(|w| {
        w.parts.clone().map(move |part| ResultKey {
            year: w.year,
            day: w.day,
            part,
        })
    }));

    let (tx, rx) = mpsc::channel();
    let (executed, results) = std::thread::scope(|scope| {
        let worker = scope.spawn(move || executor.execute(tx));

        let mut results = Vec::new();
        for ready in rx.iter().flat_map(|result| aggregator.add(result)) {
            formatter.print_result(&ready);
            results.push(ready);
        }
        for ready in aggregator.drain() {
            formatter.print_result(&ready);
            results.push(ready);
        }
        (worker.join(), results)
    });

    if !aggregator.is_complete() {
        warn!("the executor stopped before every part reported back");
    }
    executed.map_err(|_| ArcExecutorError::from(ExecutorError::Panicked))??;

    formatter.print_summary(&results);
    Ok(Tally::of(&results))
}

/// Registry of the plugins carrying every requested tag
fn build_registry(tags: &[String]) -> Result<SolverRegistry, CliError> {
    let registry = SolverRegistryBuilder::new()
        .register_solver_plugins(|plugin| {
            tags.iter().all(|tag| plugin.tags.contains(&tag.as_str()))
        })?
        .build();
    Ok(registry)
}
