use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2017, day = 9, tags = ["2017", "easy", "strings"])]
pub struct Solver;

impl AocParser for Solver {
    type SharedData<'a> = &'a str;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        Ok(input.trim())
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(scan(shared).score.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(scan(shared).garbage.to_string())
    }
}

#[derive(Debug, Default)]
struct StreamState {
    in_garbage: bool,
    cancel_next: bool,
    depth: u64,
    score: u64,
    garbage: u64,
}

fn scan(stream: &str) -> StreamState {
    stream.chars().fold(StreamState::default(), |mut state, c| {
        match (state.cancel_next, state.in_garbage, c) {
            (true, _, _) => state.cancel_next = false,
            (false, _, '!') => state.cancel_next = true,
            (false, true, '>') => state.in_garbage = false,
            (false, true, _) => state.garbage += 1,
            (false, false, '{') => state.depth += 1,
            (false, false, '}') => {
                state.score += state.depth;
                state.depth = state.depth.saturating_sub(1);
            }
            (false, false, '<') => state.in_garbage = true,
            (false, false, _) => {}
        }
        state
    })
}

#[cfg(test)]
mod tests {
    use crate::utils::solve_part;

    #[test]
    fn test_part_1() {
        let cases = [
            ("{}", "1"),
            ("{{{}}}", "6"),
            ("{{},{}}", "5"),
            ("{{{},{},{{}}}}", "16"),
            ("{<a>,<a>,<a>,<a>}", "1"),
            ("{{<ab>},{<ab>},{<ab>},{<ab>}}", "9"),
            ("{{<!!>},{<!!>},{<!!>},{<!!>}}", "9"),
            ("{{<a!>},{<a!>},{<a!>},{<ab>}}", "3"),
        ];
        for (input, expected) in cases {
            assert_eq!(solve_part::<super::Solver>(input, 1), expected, "stream {input}");
        }
    }

    #[test]
    fn test_part_2() {
        let cases = [
            ("<>", "0"),
            ("<random characters>", "17"),
            ("<<<<>", "3"),
            ("<{!>}>", "2"),
            ("<!!>", "0"),
            ("<!!!>>", "0"),
            ("<{o\"i!a,<{i<a>", "10"),
        ];
        for (input, expected) in cases {
            assert_eq!(solve_part::<super::Solver>(input, 2), expected, "stream {input}");
        }
    }
}
