use std::collections::HashMap;

use anyhow::{anyhow, ensure};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::parse_lines;

const START: &str = ".#./..#/###";

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2017, day = 21, tags = ["2017", "grid"])]
pub struct Solver;

/// Square grid of pixels stored row by row
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct Grid {
    size: usize,
    pixels: Vec<bool>,
}

impl Grid {
    /// Rows separated by `/`, `#` is on and `.` is off
    fn parse(text: &str) -> anyhow::Result<Self> {
        let rows: Vec<&str> = text.trim().split('/').collect();
        let size = rows.len();
        let mut pixels = Vec::with_capacity(size * size);
        for row in rows {
            ensure!(row.len() == size, "pattern {text:?} is not square");
            for c in row.chars() {
                pixels.push(match c {
                    '#' => true,
                    '.' => false,
                    other => return Err(anyhow!("unexpected pixel {other:?}")),
                });
            }
        }
        Ok(Grid { size, pixels })
    }

    fn get(&self, x: usize, y: usize) -> bool {
        self.pixels[y * self.size + x]
    }

    fn map_coords(&self, f: impl Fn(usize, usize) -> (usize, usize)) -> Self {
        let pixels = (0..self.size)
            .flat_map(|y| (0..self.size).map(move |x| (x, y)))
            .map(|(x, y)| {
                let (sx, sy) = f(x, y);
                self.get(sx, sy)
            })
            .collect();
        Grid {
            size: self.size,
            pixels,
        }
    }

    fn rotate(&self) -> Self {
        let last = self.size - 1;
        self.map_coords(|x, y| (y, last - x))
    }

    fn flip(&self) -> Self {
        let last = self.size - 1;
        self.map_coords(|x, y| (last - x, y))
    }

    /// The four rotations of the grid and of its mirror image
    fn symmetries(&self) -> Vec<Self> {
        let mut variants = Vec::with_capacity(8);
        for start in [self.clone(), self.flip()] {
            let mut current = start;
            for _ in 0..4 {
                let next = current.rotate();
                variants.push(current);
                current = next;
            }
        }
        variants
    }

    fn block(&self, bx: usize, by: usize, block: usize) -> Self {
        let pixels = (0..block)
            .flat_map(|y| (0..block).map(move |x| (x, y)))
            .map(|(x, y)| self.get(bx * block + x, by * block + y))
            .collect();
        Grid {
            size: block,
            pixels,
        }
    }

    fn lit(&self) -> usize {
        self.pixels.iter().filter(|&&on| on).count()
    }
}

#[derive(Debug)]
pub struct SharedData {
    rules: HashMap<Grid, Grid>,
    /// `history[n]` is the image after `n` iterations
    history: Vec<Grid>,
}

impl AocParser for Solver {
    type SharedData<'a> = SharedData;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let rules = parse_lines(input, |line| {
            let (from, to) = line
                .split_once("=>")
                .ok_or_else(|| anyhow!("expected `pattern => pattern`"))?;
            let (from, to) = (Grid::parse(from)?, Grid::parse(to)?);
            ensure!(
                matches!(from.size, 2 | 3) && to.size == from.size + 1,
                "rules map 2x2 to 3x3 or 3x3 to 4x4"
            );
            Ok((from, to))
        })?;

        let rules = rules
            .into_iter()
            .flat_map(|(from, to)| {
                from.symmetries()
                    .into_iter()
                    .map(move |variant| (variant, to.clone()))
            })
            .collect();
        let start = Grid::parse(START).map_err(|e| ParseError::Other(e.to_string()))?;
        Ok(SharedData {
            rules,
            history: vec![start],
        })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(after(shared, 5)?.lit().to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(after(shared, 18)?.lit().to_string())
    }
}

/// Image after `iterations`, continuing from the furthest image computed so far
fn after(shared: &mut SharedData, iterations: usize) -> Result<&Grid, SolveError> {
    while shared.history.len() <= iterations {
        let current = &shared.history[shared.history.len() - 1];
        let next = enhance(current, &shared.rules)?;
        shared.history.push(next);
    }
    Ok(&shared.history[iterations])
}

fn enhance(grid: &Grid, rules: &HashMap<Grid, Grid>) -> Result<Grid, SolveError> {
    let block = if grid.size % 2 == 0 { 2 } else { 3 };
    let blocks = grid.size / block;
    let out_block = block + 1;
    let size = blocks * out_block;
    let mut pixels = vec![false; size * size];

    for by in 0..blocks {
        for bx in 0..blocks {
            let key = grid.block(bx, by, block);
            let replacement = rules.get(&key).ok_or_else(|| {
                SolveError::failed(format!("no rule matches block ({bx}, {by})"))
            })?;
            for y in 0..out_block {
                for x in 0..out_block {
                    pixels[(by * out_block + y) * size + bx * out_block + x] =
                        replacement.get(x, y);
                }
            }
        }
    }
    Ok(Grid { size, pixels })
}
