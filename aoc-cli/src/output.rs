//! Printing results and the end-of-run summary

use crate::executor::{SolverResult, Verification};
use chrono::TimeDelta;
use std::time::{Duration, Instant};

pub struct OutputFormatter {
    quiet: bool,
    start_time: Instant,
}

/// Counts gathered from a finished run
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Tally {
    pub solved: usize,
    pub failed: usize,
    pub correct: usize,
    pub incorrect: usize,
}

impl Tally {
    pub fn of(results: &[SolverResult]) -> Self {
        results.iter().fold(Tally::default(), |mut tally, r| {
            match (&r.answer, &r.verification) {
                (Err(_), _) => tally.failed += 1,
                (Ok(_), verification) => {
                    tally.solved += 1;
                    match verification {
                        Verification::Correct => tally.correct += 1,
                        Verification::Incorrect { .. } => tally.incorrect += 1,
                        Verification::Unchecked => {}
                    }
                }
            }
            tally
        })
    }

    pub fn is_success(&self) -> bool {
        self.failed == 0 && self.incorrect == 0
    }
}

impl OutputFormatter {
    pub fn new(quiet: bool) -> Self {
        Self {
            quiet,
            start_time: Instant::now(),
        }
    }

    pub fn print_result(&self, result: &SolverResult) {
        if self.quiet {
            match &result.answer {
                Ok(answer) => println!("{}", answer),
                Err(e) => eprintln!("Error: {}", e),
            }
        } else {
            match format_result(result) {
                Ok(line) => println!("{}", line),
                Err(line) => eprintln!("{}", line),
            }
        }
    }

    /// Print the summary; skipped in quiet mode
    pub fn print_summary(&self, results: &[SolverResult]) {
        if self.quiet {
            return;
        }

        let tally = Tally::of(results);
        let total_parse_time = total_parse_time(results);
        let total_solve_time: TimeDelta = results
            .iter()
            .filter(|r| r.answer.is_ok())
            .map(|r| r.solve_duration)
            .sum();
        let elapsed = self.start_time.elapsed();

        println!();
        println!("--- Summary ---");
        println!("Parts: {} solved, {} failed", tally.solved, tally.failed);
        println!(
            "Verified: {} correct, {} incorrect, {} unchecked",
            tally.correct,
            tally.incorrect,
            tally.solved - tally.correct - tally.incorrect
        );
        println!("Total parse time: {}", format_duration(total_parse_time));
        println!("Total solve time: {}", format_duration(total_solve_time));
        println!("Elapsed wall-clock time: {}", format_std_duration(elapsed));
        if !elapsed.is_zero() {
            let compute_secs = (total_parse_time + total_solve_time)
                .num_microseconds()
                .unwrap_or(0) as f64
                / 1_000_000.0;
            println!("Speedup factor: {:.2}x", compute_secs / elapsed.as_secs_f64());
        }
    }
}

/// Time spent parsing, counting each parse once even when its parts fail
fn total_parse_time(results: &[SolverResult]) -> TimeDelta {
    results.iter().filter_map(|r| r.parse_duration).sum()
}

/// One line per part: `Ok` goes to stdout, `Err` to stderr
fn format_result(result: &SolverResult) -> Result<String, String> {
    let prefix = format!("{}/{:02} Part {}", result.year, result.day, result.part);
    let answer = match &result.answer {
        Ok(answer) => answer,
        Err(e) => return Err(format!("{}: Error - {}", prefix, e)),
    };

    let parse_timing = result
        .parse_duration
        .map(|d| format!("parse: {}, ", format_duration(d)))
        .unwrap_or_default();
    let mark = match &result.verification {
        Verification::Unchecked => String::new(),
        Verification::Correct => " ✓".to_string(),
        Verification::Incorrect { expected } => format!(" ✗ (expected {})", expected),
    };
    Ok(format!(
        "{}: {} ({}solve: {}){}",
        prefix,
        answer,
        parse_timing,
        format_duration(result.solve_duration),
        mark
    ))
}

fn format_duration(d: TimeDelta) -> String {
    let Some(micros) = d.num_microseconds() else {
        return "N/A".to_string();
    };

    if micros < 0 {
        return format!("-{}", format_duration(-d));
    }

    if micros < 1000 {
        format!("{}µs", micros)
    } else if micros < 1_000_000 {
        format!("{:.2}ms", micros as f64 / 1000.0)
    } else {
        format!("{:.2}s", micros as f64 / 1_000_000.0)
    }
}

fn format_std_duration(d: Duration) -> String {
    TimeDelta::from_std(d)
        .map(format_duration)
        .unwrap_or_else(|_| "N/A".to_string())
}
