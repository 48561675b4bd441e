use std::collections::HashSet;

use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use itertools::Itertools;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2017, day = 4, tags = ["2017", "easy", "strings"])]
pub struct Solver;

impl AocParser for Solver {
    type SharedData<'a> = Vec<Vec<&'a str>>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        Ok(input
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| line.split_whitespace().collect())
            .collect())
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let valid = shared
            .iter()
            .filter(|words| words.iter().all_unique())
            .count();
        Ok(valid.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let valid = shared
            .iter()
            .filter(|words| {
                let mut seen = HashSet::new();
                words
                    .iter()
                    .all(|word| seen.insert(word.chars().sorted_unstable().collect::<String>()))
            })
            .count();
        Ok(valid.to_string())
    }
}

#[cfg(test)]
mod tests {
    use crate::utils::solve_part;

    #[test]
    fn test_part_1() {
        let input = "aa bb cc dd ee\naa bb cc dd aa\naa bb cc dd aaa";
        assert_eq!(solve_part::<super::Solver>(input, 1), "2");
    }

    #[test]
    fn test_part_2() {
        let input = "abcde fghij\n\
                     abcde xyz ecdab\n\
                     a ab abc abd abf abj\n\
                     iiii oiii ooii oooi oooo\n\
                     oiii ioii iioi iiio";
        assert_eq!(solve_part::<super::Solver>(input, 2), "3");
    }
}
