use std::collections::HashMap;

use anyhow::anyhow;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2017, day = 3, tags = ["2017", "grid"])]
pub struct Solver;

impl AocParser for Solver {
    type SharedData<'a> = u64;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        input
            .trim()
            .parse::<u64>()
            .map_err(anyhow::Error::from)
            .and_then(|square| match square {
                0 => Err(anyhow!("squares are numbered from 1")),
                square => Ok(square),
            })
            .map_err(|e| ParseError::InvalidFormat(e.to_string()))
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let steps = usize::try_from(*shared - 1).map_err(|e| SolveError::SolveFailed(e.into()))?;
        let (x, y) = spiral()
            .nth(steps)
            .ok_or_else(|| SolveError::failed("spiral ended early"))?;
        Ok((x.unsigned_abs() + y.unsigned_abs()).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let target = *shared;
        let mut values: HashMap<(i64, i64), u64> = HashMap::from([((0, 0), 1)]);

        spiral()
            .skip(1)
            .find_map(|(x, y)| {
                let value: u64 = NEIGHBOURS
                    .iter()
                    .filter_map(|(dx, dy)| values.get(&(x + dx, y + dy)))
                    .sum();
                values.insert((x, y), value);
                (value > target).then_some(value)
            })
            .map(|value| value.to_string())
            .ok_or_else(|| SolveError::failed("spiral ended early"))
    }
}

const NEIGHBOURS: [(i64, i64); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Square positions in storage order: right, up, left, down with the run length
/// growing every two turns
fn spiral() -> impl Iterator<Item = (i64, i64)> {
    const TURNS: [(i64, i64); 4] = [(1, 0), (0, 1), (-1, 0), (0, -1)];

    let mut position = (0i64, 0i64);
    let mut turn = 0;
    let mut run = 1;
    let mut walked = 0;

    std::iter::from_fn(move || {
        let current = position;
        let (dx, dy) = TURNS[turn % 4];
        position = (position.0 + dx, position.1 + dy);
        walked += 1;
        if walked == run {
            walked = 0;
            turn += 1;
            if turn % 2 == 0 {
                run += 1;
            }
        }
        Some(current)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::solve_part;

    #[test]
    fn test_spiral_prefix() {
        let prefix: Vec<_> = spiral().take(10).collect();
        assert_eq!(
            prefix,
            vec![
                (0, 0),
                (1, 0),
                (1, 1),
                (0, 1),
                (-1, 1),
                (-1, 0),
                (-1, -1),
                (0, -1),
                (1, -1),
                (2, -1),
            ]
        );
    }

    #[test]
    fn test_part_1() {
        for (input, expected) in [("1", "0"), ("12", "3"), ("23", "2"), ("1024", "31")] {
            assert_eq!(solve_part::<Solver>(input, 1), expected, "square {input}");
        }
    }

    #[test]
    fn test_part_2() {
        for (input, expected) in [("10", "11"), ("59", "122"), ("747", "806")] {
            assert_eq!(solve_part::<Solver>(input, 2), expected, "target {input}");
        }
    }

    #[test]
    fn test_rejects_square_zero() {
        assert!(Solver::parse("0").is_err());
    }
}
