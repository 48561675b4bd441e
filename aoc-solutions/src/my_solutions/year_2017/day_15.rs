use anyhow::anyhow;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use itertools::Itertools;

use crate::utils::parse_lines;

const FACTOR_A: u64 = 16807;
const FACTOR_B: u64 = 48271;
const MODULUS: u64 = 2_147_483_647;
const LOW_BITS: u64 = 0xffff;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2017, day = 15, tags = ["2017", "slow"])]
pub struct Solver;

#[derive(Debug, Clone, Copy)]
pub struct Seeds {
    a: u64,
    b: u64,
}

impl AocParser for Solver {
    type SharedData<'a> = Seeds;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let seeds = parse_lines(input, |line| {
            line.split_whitespace()
                .last()
                .ok_or_else(|| anyhow!("missing seed"))?
                .parse::<u64>()
                .map_err(anyhow::Error::from)
        })?;
        let (a, b) = seeds
            .into_iter()
            .collect_tuple()
            .ok_or_else(|| ParseError::InvalidFormat("expected exactly two generators".into()))?;
        Ok(Seeds { a, b })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(judge(*shared, 40_000_000, 1, 1).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(judge(*shared, 5_000_000, 4, 8).to_string())
    }
}

fn generator(seed: u64, factor: u64, multiple_of: u64) -> impl Iterator<Item = u64> {
    std::iter::successors(Some(seed), move |value| Some(value * factor % MODULUS))
        .skip(1)
        .filter(move |value| value % multiple_of == 0)
}

/// Number of the first `pairs` pairs whose lowest 16 bits agree
fn judge(seeds: Seeds, pairs: usize, multiple_a: u64, multiple_b: u64) -> usize {
    generator(seeds.a, FACTOR_A, multiple_a)
        .zip(generator(seeds.b, FACTOR_B, multiple_b))
        .take(pairs)
        .filter(|(a, b)| a & LOW_BITS == b & LOW_BITS)
        .count()
}
