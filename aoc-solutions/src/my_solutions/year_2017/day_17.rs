use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2017, day = 17, tags = ["2017", "simulation"])]
pub struct Solver;

impl AocParser for Solver {
    type SharedData<'a> = usize;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        input
            .trim()
            .parse()
            .map_err(|e| ParseError::InvalidFormat(format!("spinlock step: {e}")))
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(value_after_last(*shared, 2017).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(value_after_zero(*shared, 50_000_000).to_string())
    }
}

/// Value following `insertions` in the buffer once it has been inserted
fn value_after_last(step: usize, insertions: usize) -> usize {
    let mut buffer = Vec::with_capacity(insertions + 1);
    buffer.push(0);
    let mut position = 0;
    for value in 1..=insertions {
        position = (position + step % buffer.len()) % buffer.len() + 1;
        buffer.insert(position, value);
    }
    buffer[(position + 1) % buffer.len()]
}

/// Zero never moves from index 0, so only insertions at index 1 matter
fn value_after_zero(step: usize, insertions: usize) -> usize {
    let mut position = 0;
    let mut after_zero = 0;
    for value in 1..=insertions {
        position = (position + step % value) % value + 1;
        if position == 1 {
            after_zero = value;
        }
    }
    after_zero
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::solve_part;

    #[test]
    fn test_part_1() {
        assert_eq!(solve_part::<Solver>("3", 1), "638");
    }

    #[test]
    fn test_huge_step_wraps_like_its_remainder() {
        // usize::MAX and 15 agree modulo every buffer length up to 9
        assert_eq!(value_after_last(usize::MAX, 9), value_after_last(15, 9));
        assert_eq!(value_after_last(usize::MAX, 9), 6);
        assert_eq!(value_after_zero(usize::MAX, 9), value_after_zero(15, 9));
    }

    #[test]
    fn test_small_buffers() {
        // 0 (9) 5 7 2 4 3 8 6 1
        assert_eq!(value_after_last(3, 9), 5);
        assert_eq!(value_after_zero(3, 9), 9);
        // 0 2 (3) 1
        assert_eq!(value_after_zero(3, 3), 2);
        assert_eq!(value_after_last(3, 3), 1);
    }
}
