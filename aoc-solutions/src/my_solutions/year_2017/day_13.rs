use anyhow::{anyhow, ensure};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::parse_lines;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2017, day = 13, tags = ["2017", "math"])]
pub struct Solver;

#[derive(Debug, Clone, Copy)]
pub struct Layer {
    depth: u64,
    range: u64,
}

impl Layer {
    /// Picoseconds between two visits of the scanner to the top row
    fn period(self) -> u64 {
        if self.range == 1 { 1 } else { 2 * (self.range - 1) }
    }

    fn catches(self, delay: u64) -> bool {
        (self.depth + delay) % self.period() == 0
    }
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Layer>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        parse_lines(input, |line| {
            let (depth, range) = line
                .split_once(':')
                .ok_or_else(|| anyhow!("expected `depth: range`"))?;
            let layer = Layer {
                depth: depth.trim().parse()?,
                range: range.trim().parse()?,
            };
            ensure!(layer.range > 0, "a layer needs a range of at least 1");
            Ok(layer)
        })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let severity: u64 = shared
            .iter()
            .filter(|layer| layer.catches(0))
            .map(|layer| layer.depth * layer.range)
            .sum();
        Ok(severity.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        if let Some(layer) = shared.iter().find(|layer| layer.range == 1) {
            return Err(SolveError::failed(format!(
                "layer {} has range 1 and catches every packet",
                layer.depth
            )));
        }
        // catches repeat with the lcm of the periods, so a later delay can't be safe
        let horizon = shared
            .iter()
            .try_fold(1u64, |acc, layer| lcm(acc, layer.period()))
            .unwrap_or(u64::MAX);
        (0..horizon)
            .find(|&delay| shared.iter().all(|layer| !layer.catches(delay)))
            .map(|delay| delay.to_string())
            .ok_or_else(|| SolveError::failed("no safe delay"))
    }
}

fn gcd(a: u64, b: u64) -> u64 {
    if b == 0 { a } else { gcd(b, a % b) }
}

/// `None` on overflow
fn lcm(a: u64, b: u64) -> Option<u64> {
    (a / gcd(a, b)).checked_mul(b)
}
