use anyhow::{anyhow, bail, ensure};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::cycle::floyd;

const PROGRAMS: usize = 16;
const DANCES: usize = 1_000_000_000;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2017, day = 16, tags = ["2017", "cycle"])]
pub struct Solver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Move {
    Spin(usize),
    Exchange(usize, usize),
    Partner(u8, u8),
}

#[derive(Debug)]
pub struct SharedData {
    moves: Vec<Move>,
    programs: usize,
}

impl AocParser for Solver {
    type SharedData<'a> = SharedData;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        parse_dance(input, PROGRAMS)
    }
}

fn parse_dance(input: &str, programs: usize) -> Result<SharedData, ParseError> {
    let moves = input
        .trim()
        .split(',')
        .enumerate()
        .map(|(idx, text)| {
            parse_move(text.trim(), programs)
                .map_err(|e| ParseError::InvalidFormat(format!("(move {}) {}", idx + 1, e)))
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(SharedData { moves, programs })
}

fn parse_move(text: &str, programs: usize) -> anyhow::Result<Move> {
    let position = |s: &str| -> anyhow::Result<usize> {
        let position: usize = s.parse()?;
        ensure!(position < programs, "position {position} outside the line");
        Ok(position)
    };
    let name = |s: &str| -> anyhow::Result<u8> {
        match s.as_bytes() {
            &[name] if name >= b'a' && usize::from(name - b'a') < programs => Ok(name),
            _ => bail!("unknown program {s:?}"),
        }
    };
    let mut chars = text.chars();
    let kind = chars.next().ok_or_else(|| anyhow!("empty move"))?;
    let args = chars.as_str();
    Ok(match kind {
        's' => {
            let size: usize = args.parse()?;
            ensure!((1..=programs).contains(&size), "spin size {size} outside 1..={programs}");
            Move::Spin(size)
        }
        'x' => {
            let (a, b) = split_pair(args)?;
            Move::Exchange(position(a)?, position(b)?)
        }
        'p' => {
            let (a, b) = split_pair(args)?;
            Move::Partner(name(a)?, name(b)?)
        }
        other => bail!("unknown move {other:?}"),
    })
}

fn split_pair(args: &str) -> anyhow::Result<(&str, &str)> {
    args.split_once('/')
        .ok_or_else(|| anyhow!("expected two arguments separated by '/'"))
}

fn dance(line: &[u8], moves: &[Move]) -> Vec<u8> {
    let mut line = line.to_vec();
    for &dance_move in moves {
        match dance_move {
            Move::Spin(size) => line.rotate_right(size),
            Move::Exchange(a, b) => line.swap(a, b),
            Move::Partner(a, b) => {
                let position = |name| line.iter().position(|&p| p == name);
                if let (Some(a), Some(b)) = (position(a), position(b)) {
                    line.swap(a, b);
                }
            }
        }
    }
    line
}

fn initial_line(programs: usize) -> Vec<u8> {
    (b'a'..).take(programs).collect()
}

fn to_string(line: &[u8]) -> String {
    String::from_utf8_lossy(line).into_owned()
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(to_string(&dance(&initial_line(shared.programs), &shared.moves)))
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(to_string(&repeated_dance(shared, DANCES)))
    }
}

fn repeated_dance(shared: &SharedData, dances: usize) -> Vec<u8> {
    let start = initial_line(shared.programs);
    let cycle = floyd(&start, |line| dance(line, &shared.moves));
    (0..cycle.equivalent_step(dances)).fold(start, |line, _| dance(&line, &shared.moves))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::solve_part;

    #[test]
    fn test_example_dance() {
        let shared = parse_dance("s1,x3/4,pe/b", 5).unwrap();
        let once = dance(&initial_line(5), &shared.moves);
        assert_eq!(to_string(&once), "baedc");
        assert_eq!(to_string(&repeated_dance(&shared, 2)), "ceadb");
    }

    #[test]
    fn test_parse_rejects_out_of_range() {
        assert!(parse_dance("x1/5", 5).is_err());
        assert!(parse_dance("pa/f", 5).is_err());
        assert!(parse_dance("s6", 5).is_err());
        assert!(parse_dance("q1", 5).is_err());
    }

    #[test]
    fn test_full_size_spin() {
        assert_eq!(solve_part::<Solver>("s16", 1), "abcdefghijklmnop");
        assert_eq!(solve_part::<Solver>("s1", 2), "abcdefghijklmnop");
    }
}
