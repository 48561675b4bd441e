use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2017, day = 19, tags = ["2017", "grid"])]
pub struct Solver;

/// Routing diagram, leading whitespace is significant so lines are kept as-is
#[derive(Debug)]
pub struct SharedData<'a> {
    rows: Vec<&'a [u8]>,
    walk: Option<Walk>,
}

#[derive(Debug, Clone)]
struct Walk {
    letters: String,
    steps: usize,
}

impl AocParser for Solver {
    type SharedData<'a> = SharedData<'a>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let rows: Vec<&[u8]> = input
            .lines()
            .map(str::as_bytes)
            .skip_while(|row| row.iter().all(u8::is_ascii_whitespace))
            .collect();
        if !rows.first().is_some_and(|row| row.contains(&b'|')) {
            return Err(ParseError::MissingData("no entry point on the first row".into()));
        }
        Ok(SharedData { rows, walk: None })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(follow(shared).letters)
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(follow(shared).steps.to_string())
    }
}

fn follow(shared: &mut SharedData<'_>) -> Walk {
    shared
        .walk
        .get_or_insert_with(|| {
            let rows = &shared.rows;
            let at = |x: i64, y: i64| -> u8 {
                usize::try_from(y)
                    .ok()
                    .and_then(|y| rows.get(y))
                    .zip(usize::try_from(x).ok())
                    .and_then(|(row, x)| row.get(x).copied())
                    .unwrap_or(b' ')
            };

            let start = rows[0].iter().position(|&c| c == b'|').unwrap_or_default();
            let (mut x, mut y) = (start as i64, 0i64);
            let (mut dx, mut dy) = (0i64, 1i64);
            let mut walk = Walk {
                letters: String::new(),
                steps: 0,
            };

            loop {
                let cell = at(x, y);
                match cell {
                    b' ' => break,
                    b'+' => {
                        // turn towards whichever side continues the line
                        let (ldx, ldy) = (dy, -dx);
                        (dx, dy) = if at(x + ldx, y + ldy) != b' ' {
                            (ldx, ldy)
                        } else {
                            (-ldx, -ldy)
                        };
                    }
                    c if c.is_ascii_alphabetic() => walk.letters.push(c as char),
                    _ => {}
                }
                walk.steps += 1;
                x += dx;
                y += dy;
            }
            walk
        })
        .clone()
}

#[cfg(test)]
mod tests {
    use crate::utils::solve_part;

    const EXAMPLE: &str = concat!(
        "     |          \n",
        "     |  +--+    \n",
        "     A  |  C    \n",
        " F---|----E|--+ \n",
        "     |  |  |  D \n",
        "     +B-+  +--+ \n",
    );

    #[test]
    fn test_part_1() {
        assert_eq!(solve_part::<super::Solver>(EXAMPLE, 1), "ABCDEF");
    }

    #[test]
    fn test_part_2() {
        assert_eq!(solve_part::<super::Solver>(EXAMPLE, 2), "38");
    }

    #[test]
    fn test_missing_entry() {
        assert!(<super::Solver as aoc_solver::AocParser>::parse("  -- \n").is_err());
    }
}
