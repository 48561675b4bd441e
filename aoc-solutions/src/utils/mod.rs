//! Helpers shared between puzzle solutions

pub mod cycle;
pub mod duet;
pub mod knot_hash;

use aoc_solver::ParseError;

/// Parse every non-empty line of `input` with `parse_line`
///
/// Errors are reported as `ParseError::InvalidFormat` tagged with the 1-based line number.
pub fn parse_lines<T, F>(input: &str, mut parse_line: F) -> Result<Vec<T>, ParseError>
where
    F: FnMut(&str) -> anyhow::Result<T>,
{
    input
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(line_idx, line)| {
            parse_line(line.trim())
                .map_err(|e| ParseError::InvalidFormat(format!("(line {}) {}", line_idx + 1, e)))
        })
        .collect()
}

#[cfg(test)]
pub(crate) fn solve_part<S: aoc_solver::Solver>(input: &str, part: u8) -> String {
    let mut shared = S::parse(input).expect("example input should parse");
    S::solve_part(&mut shared, part).expect("example input should solve")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_lines_skips_blank_lines() {
        let parsed = parse_lines("1\n\n 2 \n3\n", |line| Ok(line.parse::<u8>()?)).unwrap();
        assert_eq!(parsed, vec![1, 2, 3]);
    }

    #[test]
    fn test_parse_lines_reports_line_number() {
        let err = parse_lines("1\n2\nx", |line| Ok(line.parse::<u8>()?)).unwrap_err();
        match err {
            ParseError::InvalidFormat(msg) => assert!(msg.starts_with("(line 3)"), "{msg}"),
            other => panic!("unexpected error {other:?}"),
        }
    }
}
