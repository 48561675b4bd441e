use anyhow::anyhow;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::parse_lines;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2017, day = 24, tags = ["2017", "search"])]
pub struct Solver;

#[derive(Debug, Clone, Copy)]
struct Component {
    left: u32,
    right: u32,
}

impl Component {
    fn strength(self) -> u32 {
        self.left + self.right
    }

    /// Port left free when plugged into `port`
    fn other_end(self, port: u32) -> Option<u32> {
        if self.left == port {
            Some(self.right)
        } else if self.right == port {
            Some(self.left)
        } else {
            None
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
struct Best {
    strongest: u32,
    /// (length, strength) of the longest bridge, strongest on ties
    longest: (usize, u32),
}

#[derive(Debug)]
pub struct SharedData {
    components: Vec<Component>,
    best: Option<Best>,
}

impl AocParser for Solver {
    type SharedData<'a> = SharedData;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let components = parse_lines(input, |line| {
            let (left, right) = line
                .split_once('/')
                .ok_or_else(|| anyhow!("expected `port/port`"))?;
            Ok(Component {
                left: left.trim().parse()?,
                right: right.trim().parse()?,
            })
        })?;
        Ok(SharedData {
            components,
            best: None,
        })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(best(shared).strongest.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(best(shared).longest.1.to_string())
    }
}

fn best(shared: &mut SharedData) -> Best {
    *shared.best.get_or_insert_with(|| {
        let mut used = vec![false; shared.components.len()];
        let mut best = Best::default();
        extend(&shared.components, &mut used, 0, 0, 0, &mut best);
        best
    })
}

/// Depth-first search over every bridge that can continue from `port`
fn extend(
    components: &[Component],
    used: &mut [bool],
    port: u32,
    length: usize,
    strength: u32,
    best: &mut Best,
) {
    best.strongest = best.strongest.max(strength);
    best.longest = best.longest.max((length, strength));

    for (idx, component) in components.iter().enumerate() {
        if used[idx] {
            continue;
        }
        if let Some(next_port) = component.other_end(port) {
            used[idx] = true;
            extend(
                components,
                used,
                next_port,
                length + 1,
                strength + component.strength(),
                best,
            );
            used[idx] = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::utils::solve_part;

    const EXAMPLE: &str = "0/2\n2/2\n2/3\n3/4\n3/5\n0/1\n10/1\n9/10";

    #[test]
    fn test_part_1() {
        assert_eq!(solve_part::<super::Solver>(EXAMPLE, 1), "31");
    }

    #[test]
    fn test_part_2() {
        assert_eq!(solve_part::<super::Solver>(EXAMPLE, 2), "19");
    }

    #[test]
    fn test_no_zero_port() {
        assert_eq!(solve_part::<super::Solver>("1/2\n2/3", 1), "0");
    }
}
