use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::knot_hash::knot_hash;

const SIZE: usize = 128;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2017, day = 14, tags = ["2017", "hash", "grid"])]
pub struct Solver;

/// One knot hash per row, most significant bit is the leftmost square
#[derive(Debug)]
pub struct SharedData {
    rows: Vec<u128>,
}

impl SharedData {
    fn used(&self, x: usize, y: usize) -> bool {
        (self.rows[y] >> (SIZE - 1 - x)) & 1 == 1
    }
}

impl AocParser for Solver {
    type SharedData<'a> = SharedData;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let key = input.trim();
        if key.is_empty() {
            return Err(ParseError::MissingData("empty key string".into()));
        }
        let rows = (0..SIZE)
            .map(|row| u128::from_be_bytes(knot_hash(format!("{key}-{row}").as_bytes())))
            .collect();
        Ok(SharedData { rows })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let used: u32 = shared.rows.iter().map(|row| row.count_ones()).sum();
        Ok(used.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut seen = vec![[false; SIZE]; SIZE];
        let mut regions = 0;

        for y in 0..SIZE {
            for x in 0..SIZE {
                if seen[y][x] || !shared.used(x, y) {
                    continue;
                }
                regions += 1;
                seen[y][x] = true;
                let mut stack = vec![(x, y)];
                while let Some((x, y)) = stack.pop() {
                    let neighbours = [
                        (x.wrapping_sub(1), y),
                        (x + 1, y),
                        (x, y.wrapping_sub(1)),
                        (x, y + 1),
                    ];
                    for (nx, ny) in neighbours {
                        if nx < SIZE && ny < SIZE && !seen[ny][nx] && shared.used(nx, ny) {
                            seen[ny][nx] = true;
                            stack.push((nx, ny));
                        }
                    }
                }
            }
        }
        Ok(regions.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::solve_part;

    #[test]
    fn test_top_left_corner() {
        // ##.#.#..
        // .#.#.#.#
        let shared = Solver::parse("flqrgnkx").unwrap();
        let row = |y: usize| {
            (0..8)
                .map(|x| if shared.used(x, y) { '#' } else { '.' })
                .collect::<String>()
        };
        assert_eq!(row(0), "##.#.#..");
        assert_eq!(row(1), ".#.#.#.#");
    }

    #[test]
    fn test_part_1() {
        assert_eq!(solve_part::<Solver>("flqrgnkx", 1), "8108");
    }

    #[test]
    fn test_part_2() {
        assert_eq!(solve_part::<Solver>("flqrgnkx", 2), "1242");
    }
}
