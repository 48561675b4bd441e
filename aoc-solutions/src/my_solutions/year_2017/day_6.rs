use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::cycle::{Cycle, floyd};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2017, day = 6, tags = ["2017", "cycle"])]
pub struct Solver;

#[derive(Debug)]
pub struct SharedData {
    banks: Vec<u32>,
    cycle: Option<Cycle>,
}

impl AocParser for Solver {
    type SharedData<'a> = SharedData;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let banks = input
            .split_whitespace()
            .map(str::parse)
            .collect::<Result<Vec<u32>, _>>()
            .map_err(|e| ParseError::InvalidFormat(e.to_string()))?;
        if banks.is_empty() {
            return Err(ParseError::MissingData("no memory banks".into()));
        }
        Ok(SharedData { banks, cycle: None })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let cycle = reallocation_cycle(shared);
        Ok((cycle.start + cycle.length).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(reallocation_cycle(shared).length.to_string())
    }
}

fn reallocation_cycle(shared: &mut SharedData) -> Cycle {
    *shared
        .cycle
        .get_or_insert_with(|| floyd(&shared.banks, |banks| reallocate(banks)))
}

/// Empty the fullest bank (lowest index on ties) and deal its blocks one by one
/// to the following banks
fn reallocate(banks: &[u32]) -> Vec<u32> {
    let mut next = banks.to_vec();
    let Some((fullest, &blocks)) = banks
        .iter()
        .enumerate()
        .rev()
        .max_by_key(|&(_, blocks)| blocks)
    else {
        return next;
    };

    let count = banks.len();
    let blocks = blocks as usize;
    next[fullest] = 0;
    for offset in 0..count {
        let share = blocks / count + usize::from(offset < blocks % count);
        next[(fullest + 1 + offset) % count] += share as u32;
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::solve_part;

    #[test]
    fn test_reallocate() {
        assert_eq!(reallocate(&[0, 2, 7, 0]), vec![2, 4, 1, 2]);
        assert_eq!(reallocate(&[2, 4, 1, 2]), vec![3, 1, 2, 3]);
        assert_eq!(reallocate(&[3, 1, 2, 3]), vec![0, 2, 3, 4]);
    }

    #[test]
    fn test_part_1() {
        assert_eq!(solve_part::<Solver>("0 2 7 0", 1), "5");
    }

    #[test]
    fn test_part_2() {
        assert_eq!(solve_part::<Solver>("0\t2\t7\t0", 2), "4");
    }
}
