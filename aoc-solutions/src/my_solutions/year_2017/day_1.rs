use anyhow::anyhow;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2017, day = 1, tags = ["2017", "easy"])]
pub struct Solver;

impl AocParser for Solver {
    type SharedData<'a> = Vec<u32>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        input
            .trim()
            .chars()
            .map(|c| c.to_digit(10).ok_or_else(|| anyhow!("'{c}' is not a digit")))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| ParseError::InvalidFormat(e.to_string()))
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(captcha(shared, 1).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(captcha(shared, shared.len() / 2).to_string())
    }
}

/// Sum of the digits matching the digit `offset` places further around the circle
fn captcha(digits: &[u32], offset: usize) -> u32 {
    digits
        .iter()
        .zip(digits.iter().cycle().skip(offset))
        .filter(|(a, b)| a == b)
        .map(|(a, _)| a)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::solve_part;

    #[test]
    fn test_part_1() {
        for (input, expected) in [("1122", "3"), ("1111", "4"), ("1234", "0"), ("91212129", "9")] {
            assert_eq!(solve_part::<Solver>(input, 1), expected, "input {input}");
        }
    }

    #[test]
    fn test_part_2() {
        let cases = [
            ("1212", "6"),
            ("1221", "0"),
            ("123425", "4"),
            ("123123", "12"),
            ("12131415", "4"),
        ];
        for (input, expected) in cases {
            assert_eq!(solve_part::<Solver>(input, 2), expected, "input {input}");
        }
    }

    #[test]
    fn test_rejects_non_digits() {
        assert!(Solver::parse("12a").is_err());
    }
}
