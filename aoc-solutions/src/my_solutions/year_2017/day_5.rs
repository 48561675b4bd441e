use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::parse_lines;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2017, day = 5, tags = ["2017", "simulation"])]
pub struct Solver;

impl AocParser for Solver {
    type SharedData<'a> = Vec<i64>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        parse_lines(input, |line| Ok(line.parse()?))
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(steps_to_exit(shared.clone(), |offset| offset + 1).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let steps = steps_to_exit(shared.clone(), |offset| {
            if offset >= 3 { offset - 1 } else { offset + 1 }
        });
        Ok(steps.to_string())
    }
}

/// Follow the jumps, rewriting each visited offset with `update`, until leaving the list
fn steps_to_exit(mut offsets: Vec<i64>, update: impl Fn(i64) -> i64) -> u64 {
    let mut pc = 0i64;
    let mut steps = 0;
    while let Some(offset) = usize::try_from(pc).ok().and_then(|idx| offsets.get_mut(idx)) {
        pc += *offset;
        *offset = update(*offset);
        steps += 1;
    }
    steps
}

#[cfg(test)]
mod tests {
    use crate::utils::solve_part;

    const EXAMPLE: &str = "0\n3\n0\n1\n-3";

    #[test]
    fn test_part_1() {
        assert_eq!(solve_part::<super::Solver>(EXAMPLE, 1), "5");
    }

    #[test]
    fn test_part_2() {
        assert_eq!(solve_part::<super::Solver>(EXAMPLE, 2), "10");
    }
}
