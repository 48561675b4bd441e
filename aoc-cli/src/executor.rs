//! Runs the selected solvers on a rayon pool and streams their results

use crate::cli::ParallelizeBy;
use crate::config::Config;
use crate::error::{ArcExecutorError, ExecutorError, PartError};
use crate::store::InputStore;
use aoc_solver::{DynSolver, SolverRegistry};
use chrono::TimeDelta;
use itertools::Itertools;
use rayon::prelude::*;
use std::ops::RangeInclusive;
use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc::Sender;
use tracing::{debug, warn};

/// Outcome of comparing an answer with the one recorded in the answers file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verification {
    /// No expected answer is known for this part
    Unchecked,
    Correct,
    Incorrect { expected: String },
}

impl Verification {
    fn check(answer: &str, expected: Option<&str>) -> Self {
        match expected {
            None => Verification::Unchecked,
            Some(expected) if expected == answer => Verification::Correct,
            Some(expected) => Verification::Incorrect {
                expected: expected.to_string(),
            },
        }
    }
}

/// Result of running one part
#[derive(Debug)]
pub struct SolverResult {
    pub year: u16,
    pub day: u8,
    pub part: u8,
    pub answer: Result<String, PartError>,
    /// `None` when the input could not be read or parsed
    pub parse_duration: Option<TimeDelta>,
    pub solve_duration: TimeDelta,
    pub verification: Verification,
}

impl SolverResult {
    fn failed(year: u16, day: u8, part: u8, error: PartError) -> Self {
        Self {
            year,
            day,
            part,
            answer: Err(error),
            parse_duration: None,
            solve_duration: TimeDelta::zero(),
            verification: Verification::Unchecked,
        }
    }
}

/// One registered puzzle day and the parts selected from it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkItem {
    pub year: u16,
    pub day: u8,
    pub parts: RangeInclusive<u8>,
}

pub struct Executor {
    context: RunContext,
    thread_pool: rayon::ThreadPool,
}

/// Everything a worker thread needs, shared by reference
struct RunContext {
    registry: SolverRegistry,
    store: InputStore,
    parallelize_by: ParallelizeBy,
    year_filter: Option<u16>,
    day_filter: Option<u8>,
    part_filter: Option<u8>,
}

impl Executor {
    pub fn new(registry: SolverRegistry, config: &Config) -> Result<Self, ExecutorError> {
        let thread_pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.thread_count)
            .build()
            .map_err(|e| ExecutorError::ThreadPool(e.to_string()))?;

        Ok(Self {
            context: RunContext {
                registry,
                store: InputStore::new(config.input_dir.clone()),
                parallelize_by: config.parallelize_by,
                year_filter: config.year_filter,
                day_filter: config.day_filter,
                part_filter: config.part_filter,
            },
            thread_pool,
        })
    }

    pub fn store(&self) -> &InputStore {
        &self.context.store
    }

    /// Registered days matching the filters, ordered by (year, day)
    pub fn collect_work_items(&self) -> Vec<WorkItem> {
        let ctx = &self.context;
        ctx.registry
            .storage()
            .iter_info()
            .filter(|info| ctx.year_filter.is_none_or(|y| info.year == y))
            .filter(|info| ctx.day_filter.is_none_or(|d| info.day == d))
            .map(|info| WorkItem {
                year: info.year,
                day: info.day,
                parts: select_parts(ctx.part_filter, info.parts),
            })
            .filter(|w| !w.parts.is_empty())
            .collect()
    }

    /// Run every work item, sending one result per part
    ///
    /// Results arrive in completion order; the caller restores `(year, day, part)` order.
    pub fn execute(&self, tx: Sender<SolverResult>) -> Result<(), ArcExecutorError> {
        let work_items = self.collect_work_items();
        let ctx = &self.context;

        match ctx.parallelize_by {
            ParallelizeBy::Sequential => work_items
                .iter()
                .map(|work| run_work(work, &tx, ctx))
                .fold(Ok(()), merge),
            ParallelizeBy::Year => {
                let by_year: Vec<Vec<WorkItem>> = work_items
                    .into_iter()
                    .chunk_by(|w| w.year)
                    .into_iter()
                    .map(|(_, group)| group.collect())
                    .collect();

                self.thread_pool.install(|| {
                    by_year
                        .into_par_iter()
                        .map(|items| {
                            items
                                .iter()
                                .map(|work| run_work(work, &tx, ctx))
                                .fold(Ok(()), merge)
                        })
                        .reduce(|| Ok(()), merge)
                })
            }
            ParallelizeBy::Day | ParallelizeBy::Part => self.thread_pool.install(|| {
                work_items
                    .par_iter()
                    .map(|work| run_work(work, &tx, ctx))
                    .reduce(|| Ok(()), merge)
            }),
        }
    }
}

#[allow(clippy::reversed_empty_ranges)]
fn select_parts(part_filter: Option<u8>, max_parts: u8) -> RangeInclusive<u8> {
    match part_filter {
        Some(p) if p <= max_parts => p..=p,
        Some(_) => 1..=0,
        None => 1..=max_parts,
    }
}

fn merge(
    acc: Result<(), ArcExecutorError>,
    next: Result<(), ArcExecutorError>,
) -> Result<(), ArcExecutorError> {
    match (acc, next) {
        (Ok(()), Ok(())) => Ok(()),
        (Err(e), Ok(())) | (Ok(()), Err(e)) => Err(e),
        (Err(a), Err(b)) => Err(ArcExecutorError::combine(a, b)),
    }
}

fn send(tx: &Sender<SolverResult>, result: SolverResult) -> Result<(), ArcExecutorError> {
    tx.send(result)
        .map_err(|_| ArcExecutorError::from(ExecutorError::ChannelSend))
}

/// Read the input and answers for one day, then solve its selected parts
fn run_work(
    work: &WorkItem,
    tx: &Sender<SolverResult>,
    ctx: &RunContext,
) -> Result<(), ArcExecutorError> {
    let (year, day) = (work.year, work.day);

    let input = match ctx.store.input(year, day) {
        Ok(input) => input,
        Err(e) => {
            let message = e.to_string();
            return fail_parts(work, tx, || PartError::Input(message.clone()));
        }
    };

    let answers = ctx.store.answers(year, day).unwrap_or_else(|e| {
        warn!(year, day, "ignoring expected answers: {e}");
        Vec::new()
    });
    let expected = |part: u8| {
        answers
            .get(usize::from(part) - 1)
            .and_then(|answer| answer.as_deref())
    };

    debug!(year, day, parts = ?work.parts, "running solver");

    if ctx.parallelize_by == ParallelizeBy::Part {
        // every part parses its own copy of the input
        work.parts
            .clone()
            .into_par_iter()
            .map(|part| {
                let result = match ctx.registry.create_solver(year, day, &input) {
                    Ok(mut solver) => {
                        let parsed = Some(solver.parse_duration());
                        solve_part(&mut *solver, part, parsed, expected(part))
                    }
                    Err(e) => {
                        SolverResult::failed(year, day, part, PartError::Parse(e.to_string()))
                    }
                };
                send(tx, result)
            })
            .reduce(|| Ok(()), merge)
    } else {
        match ctx.registry.create_solver(year, day, &input) {
            Ok(mut solver) => {
                // the parts share one parse, so only the first one reports it
                let mut parsed = Some(solver.parse_duration());
                work.parts
                    .clone()
                    .map(|part| {
                        let result = solve_part(&mut *solver, part, parsed.take(), expected(part));
                        send(tx, result)
                    })
                    .fold(Ok(()), merge)
            }
            Err(e) => {
                let message = e.to_string();
                fail_parts(work, tx, || PartError::Parse(message.clone()))
            }
        }
    }
}

/// Report the same failure for every selected part of a day
fn fail_parts(
    work: &WorkItem,
    tx: &Sender<SolverResult>,
    error: impl Fn() -> PartError,
) -> Result<(), ArcExecutorError> {
    work.parts
        .clone()
        .map(|part| send(tx, SolverResult::failed(work.year, work.day, part, error())))
        .fold(Ok(()), merge)
}

/// Solve one part, turning a panicking solver into a failed result
fn solve_part(
    solver: &mut dyn DynSolver,
    part: u8,
    parse_duration: Option<TimeDelta>,
    expected: Option<&str>,
) -> SolverResult {
    let (year, day) = (solver.year(), solver.day());

    let outcome = panic::catch_unwind(AssertUnwindSafe(|| solver.solve(part)));
    let (answer, solve_duration) = match outcome {
        Ok(Ok(solved)) => {
            let duration = solved.duration();
            (Ok(solved.answer), duration)
        }
        Ok(Err(e)) => (Err(PartError::Solve(e)), TimeDelta::zero()),
        Err(payload) => {
            let message = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string());
            (Err(PartError::Panic(message)), TimeDelta::zero())
        }
    };

    let verification = match &answer {
        Ok(answer) => Verification::check(answer, expected),
        Err(_) => Verification::Unchecked,
    };
    SolverResult {
        year,
        day,
        part,
        answer,
        parse_duration,
        solve_duration,
        verification,
    }
}
