//! Command-line arguments

use clap::{ArgAction, Parser, ValueEnum};
use std::path::PathBuf;

/// How solver work is spread over the thread pool
#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq)]
pub enum ParallelizeBy {
    /// Run everything on one thread, in order
    Sequential,
    /// One task per year; the days of a year run in order
    Year,
    /// One task per puzzle day; its parts run in order
    #[default]
    Day,
    /// One task per puzzle part, each with its own parsed input
    Part,
}

/// Run Advent of Code solvers against puzzle inputs stored on disk
#[derive(Parser, Debug)]
#[command(name = "aoc", about = "Run Advent of Code solvers", version)]
pub struct Args {
    /// Only run this year
    #[arg(short, long)]
    pub year: Option<u16>,

    /// Only run this day
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=25))]
    pub day: Option<u8>,

    /// Only run this part
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=2))]
    pub part: Option<u8>,

    /// Only run solvers carrying every one of these tags (comma-separated)
    #[arg(short, long, value_delimiter = ',')]
    pub tags: Vec<String>,

    /// Directory holding `{year}_day{dd}.txt` inputs and optional `.answers` files
    #[arg(long, env = "AOC_INPUT_DIR", default_value = "~/.cache/aoc_solver")]
    pub input_dir: PathBuf,

    /// Worker threads (defaults to the available parallelism)
    #[arg(long)]
    pub threads: Option<usize>,

    /// Parallelization level
    #[arg(long, value_enum, default_value = "day")]
    pub parallelize_by: ParallelizeBy,

    /// Print answers only
    #[arg(short, long)]
    pub quiet: bool,

    /// Log more (-v info, -vv debug, -vvv trace); `RUST_LOG` takes precedence
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Default log filter for the requested verbosity
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}
