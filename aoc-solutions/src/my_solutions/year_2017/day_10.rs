use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::knot_hash::{KnotHasher, knot_hash, to_hex};

const MARKS: usize = 256;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2017, day = 10, tags = ["2017", "hash"])]
pub struct Solver;

/// Part 1 reads the line as numbers, part 2 hashes its raw bytes
pub struct SharedData<'a> {
    raw: &'a str,
    marks: usize,
}

impl AocParser for Solver {
    type SharedData<'a> = SharedData<'a>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        Ok(SharedData {
            raw: input.trim(),
            marks: MARKS,
        })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let lengths = shared
            .raw
            .split(',')
            .map(|length| length.trim().parse::<usize>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| SolveError::SolveFailed(e.into()))?;

        let mut hasher =
            KnotHasher::new(shared.marks).map_err(|e| SolveError::SolveFailed(e.into()))?;
        hasher
            .round(&lengths)
            .map_err(|e| SolveError::SolveFailed(e.into()))?;
        Ok(hasher.check_product().to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(to_hex(&knot_hash(shared.raw.as_bytes())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::solve_part;

    #[test]
    fn test_part_1_on_five_marks() {
        let mut shared = SharedData {
            raw: "3, 4, 1, 5",
            marks: 5,
        };
        assert_eq!(<Solver as PartSolver<1>>::solve(&mut shared).unwrap(), "12");
    }

    #[test]
    fn test_part_1_rejects_long_lengths() {
        let mut shared = SharedData {
            raw: "3,6",
            marks: 5,
        };
        assert!(<Solver as PartSolver<1>>::solve(&mut shared).is_err());
    }

    #[test]
    fn test_part_2() {
        assert_eq!(solve_part::<Solver>("AoC 2017\n", 2), "33efeb34ea91902bb2f59c9920caa6cd");
        assert_eq!(solve_part::<Solver>("1,2,3", 2), "3efbe78a8d82f29979031a4aa0b16a9d");
    }
}
