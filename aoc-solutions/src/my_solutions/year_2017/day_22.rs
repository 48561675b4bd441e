use std::collections::HashMap;

use anyhow::anyhow;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::parse_lines;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2017, day = 22, tags = ["2017", "grid", "simulation"])]
pub struct Solver;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Node {
    #[default]
    Clean,
    Weakened,
    Infected,
    Flagged,
}

#[derive(Debug)]
pub struct SharedData {
    infected: Vec<(i64, i64)>,
    center: (i64, i64),
}

impl AocParser for Solver {
    type SharedData<'a> = SharedData;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let rows = parse_lines(input, |line| {
            line.chars()
                .map(|c| match c {
                    '#' => Ok(true),
                    '.' => Ok(false),
                    other => Err(anyhow!("unexpected node {other:?}")),
                })
                .collect::<anyhow::Result<Vec<bool>>>()
        })?;

        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        let rectangular = height > 0 && rows.iter().all(|row| row.len() == width);
        if !rectangular {
            return Err(ParseError::InvalidFormat(
                "the cluster map must be a non-empty rectangle".into(),
            ));
        }

        let infected = rows
            .iter()
            .enumerate()
            .flat_map(|(y, row)| {
                row.iter()
                    .enumerate()
                    .filter(|&(_, &on)| on)
                    .map(move |(x, _)| (x as i64, y as i64))
            })
            .collect();
        Ok(SharedData {
            infected,
            center: ((width / 2) as i64, (height / 2) as i64),
        })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(bursts(shared, 10_000, false).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(bursts(shared, 10_000_000, true).to_string())
    }
}

/// Number of bursts that infect a node
///
/// The simple virus toggles clean and infected nodes; the evolved one cycles
/// clean, weakened, infected, flagged.
fn bursts(shared: &SharedData, count: usize, evolved: bool) -> usize {
    let mut nodes: HashMap<(i64, i64), Node> = shared
        .infected
        .iter()
        .map(|&position| (position, Node::Infected))
        .collect();
    let (mut x, mut y) = shared.center;
    // facing up, y grows downwards
    let (mut dx, mut dy) = (0i64, -1i64);
    let mut infections = 0;

    for _ in 0..count {
        let node = nodes.entry((x, y)).or_default();
        (dx, dy) = match node {
            Node::Clean => (dy, -dx),
            Node::Weakened => (dx, dy),
            Node::Infected => (-dy, dx),
            Node::Flagged => (-dx, -dy),
        };
        *node = match (*node, evolved) {
            (Node::Clean, false) => Node::Infected,
            (Node::Clean, true) => Node::Weakened,
            (Node::Weakened, _) => Node::Infected,
            (Node::Infected, false) => Node::Clean,
            (Node::Infected, true) => Node::Flagged,
            (Node::Flagged, _) => Node::Clean,
        };
        if *node == Node::Infected {
            infections += 1;
        }
        x += dx;
        y += dy;
    }
    infections
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::solve_part;

    const EXAMPLE: &str = "..#\n#..\n...";

    #[test]
    fn test_simple_virus() {
        let shared = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(bursts(&shared, 7, false), 5);
        assert_eq!(bursts(&shared, 70, false), 41);
        assert_eq!(solve_part::<Solver>(EXAMPLE, 1), "5587");
    }

    #[test]
    fn test_evolved_virus() {
        let shared = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(bursts(&shared, 100, true), 26);
    }

    #[test]
    fn test_rejects_ragged_map() {
        assert!(Solver::parse("..#\n#.").is_err());
    }
}
