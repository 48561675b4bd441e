use anyhow::anyhow;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2017, day = 11, tags = ["2017", "grid"])]
pub struct Solver;

/// Cube coordinates on the hex grid, `x + y + z == 0`
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct Cube {
    x: i64,
    y: i64,
    z: i64,
}

impl Cube {
    fn step(self, (dx, dy, dz): (i64, i64, i64)) -> Self {
        Cube {
            x: self.x + dx,
            y: self.y + dy,
            z: self.z + dz,
        }
    }

    fn distance_from_origin(self) -> u64 {
        self.x
            .unsigned_abs()
            .max(self.y.unsigned_abs())
            .max(self.z.unsigned_abs())
    }
}

#[derive(Debug)]
pub struct SharedData {
    steps: Vec<(i64, i64, i64)>,
}

impl AocParser for Solver {
    type SharedData<'a> = SharedData;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        input
            .trim()
            .split(',')
            .map(|direction| match direction.trim() {
                "n" => Ok((0, 1, -1)),
                "ne" => Ok((1, 0, -1)),
                "se" => Ok((1, -1, 0)),
                "s" => Ok((0, -1, 1)),
                "sw" => Ok((-1, 0, 1)),
                "nw" => Ok((-1, 1, 0)),
                other => Err(anyhow!("unknown direction {other:?}")),
            })
            .collect::<anyhow::Result<Vec<_>>>()
            .map(|steps| SharedData { steps })
            .map_err(|e| ParseError::InvalidFormat(e.to_string()))
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let end = shared.steps.iter().fold(Cube::default(), |cube, &step| cube.step(step));
        Ok(end.distance_from_origin().to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let furthest = shared
            .steps
            .iter()
            .scan(Cube::default(), |cube, &step| {
                *cube = cube.step(step);
                Some(cube.distance_from_origin())
            })
            .max()
            .unwrap_or_default();
        Ok(furthest.to_string())
    }
}

#[cfg(test)]
mod tests {
    use crate::utils::solve_part;

    #[test]
    fn test_part_1() {
        let cases = [
            ("ne,ne,ne", "3"),
            ("ne,ne,sw,sw", "0"),
            ("ne,ne,s,s", "2"),
            ("se,sw,se,sw,sw", "3"),
        ];
        for (input, expected) in cases {
            assert_eq!(solve_part::<super::Solver>(input, 1), expected, "path {input}");
        }
    }

    #[test]
    fn test_part_2() {
        assert_eq!(solve_part::<super::Solver>("ne,ne,sw,sw", 2), "2");
        assert_eq!(solve_part::<super::Solver>("se,sw,se,sw,sw", 2), "3");
    }

    #[test]
    fn test_unknown_direction() {
        assert!(<super::Solver as aoc_solver::AocParser>::parse("n,up").is_err());
    }
}
