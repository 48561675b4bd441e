use anyhow::anyhow;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use itertools::Itertools;

use crate::utils::parse_lines;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2017, day = 2, tags = ["2017", "easy"])]
pub struct Solver;

impl AocParser for Solver {
    type SharedData<'a> = Vec<Vec<u32>>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        parse_lines(input, |line| {
            let row = line
                .split_whitespace()
                .map(str::parse)
                .collect::<Result<Vec<u32>, _>>()?;
            if row.is_empty() {
                return Err(anyhow!("empty row"));
            }
            Ok(row)
        })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let checksum: u32 = shared
            .iter()
            .filter_map(|row| row.iter().minmax().into_option())
            .map(|(min, max)| max - min)
            .sum();
        Ok(checksum.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shared
            .iter()
            .enumerate()
            .map(|(idx, row)| {
                row.iter()
                    .tuple_combinations()
                    .find_map(|(&a, &b)| {
                        let (big, small) = if a >= b { (a, b) } else { (b, a) };
                        (small != 0 && big % small == 0).then_some(big / small)
                    })
                    .ok_or_else(|| {
                        SolveError::failed(format!("row {} has no evenly divisible pair", idx + 1))
                    })
            })
            .sum::<Result<u32, _>>()
            .map(|sum| sum.to_string())
    }
}

#[cfg(test)]
mod tests {
    use crate::utils::solve_part;

    #[test]
    fn test_part_1() {
        assert_eq!(solve_part::<super::Solver>("5 1 9 5\n7 5 3\n2 4 6 8", 1), "18");
    }

    #[test]
    fn test_part_2() {
        assert_eq!(solve_part::<super::Solver>("5 9 2 8\n9 4 7 3\n3 8 6 5", 2), "9");
    }
}
