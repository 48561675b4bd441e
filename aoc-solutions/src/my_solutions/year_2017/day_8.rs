use std::collections::HashMap;

use anyhow::{anyhow, bail};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use itertools::Itertools;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2017, day = 8, tags = ["2017", "interpreter"])]
pub struct Solver;

#[derive(Debug, Clone, Copy)]
enum Comparison {
    Less,
    LessOrEqual,
    Greater,
    GreaterOrEqual,
    Equal,
    NotEqual,
}

impl Comparison {
    fn holds(self, lhs: i64, rhs: i64) -> bool {
        match self {
            Comparison::Less => lhs < rhs,
            Comparison::LessOrEqual => lhs <= rhs,
            Comparison::Greater => lhs > rhs,
            Comparison::GreaterOrEqual => lhs >= rhs,
            Comparison::Equal => lhs == rhs,
            Comparison::NotEqual => lhs != rhs,
        }
    }
}

#[derive(Debug)]
pub struct Instruction<'a> {
    target: &'a str,
    delta: i64,
    tested: &'a str,
    comparison: Comparison,
    operand: i64,
}

#[derive(Debug)]
pub struct SharedData<'a> {
    instructions: Vec<Instruction<'a>>,
    outcome: Option<Outcome>,
}

#[derive(Debug, Clone, Copy)]
struct Outcome {
    final_max: i64,
    highest_ever: i64,
}

impl AocParser for Solver {
    type SharedData<'a> = SharedData<'a>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        input
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(idx, line)| {
                parse_instruction(line)
                    .map_err(|e| ParseError::InvalidFormat(format!("(line {}) {}", idx + 1, e)))
            })
            .collect::<Result<Vec<_>, _>>()
            .map(|instructions| SharedData {
                instructions,
                outcome: None,
            })
    }
}

/// `b inc 5 if a > 1`
fn parse_instruction(line: &str) -> anyhow::Result<Instruction<'_>> {
    let (target, op, amount, keyword, tested, comparison, operand) = line
        .split_whitespace()
        .collect_tuple()
        .ok_or_else(|| anyhow!("expected `reg inc|dec n if reg <cmp> n`"))?;
    if keyword != "if" {
        bail!("expected `if`, found {keyword:?}");
    }
    let amount: i64 = amount.parse()?;
    let delta = match op {
        "inc" => amount,
        "dec" => -amount,
        other => bail!("unknown operation {other:?}"),
    };
    let comparison = match comparison {
        "<" => Comparison::Less,
        "<=" => Comparison::LessOrEqual,
        ">" => Comparison::Greater,
        ">=" => Comparison::GreaterOrEqual,
        "==" => Comparison::Equal,
        "!=" => Comparison::NotEqual,
        other => bail!("unknown comparison {other:?}"),
    };
    Ok(Instruction {
        target,
        delta,
        tested,
        comparison,
        operand: operand.parse()?,
    })
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(run(shared).final_max.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(run(shared).highest_ever.to_string())
    }
}

fn run(shared: &mut SharedData<'_>) -> Outcome {
    *shared.outcome.get_or_insert_with(|| {
        let mut registers: HashMap<&str, i64> = HashMap::new();
        let mut highest_ever = 0;
        for instruction in &shared.instructions {
            let tested = *registers.entry(instruction.tested).or_default();
            let target = registers.entry(instruction.target).or_default();
            if instruction.comparison.holds(tested, instruction.operand) {
                *target += instruction.delta;
                highest_ever = highest_ever.max(*target);
            }
        }
        Outcome {
            final_max: registers.values().copied().max().unwrap_or_default(),
            highest_ever,
        }
    })
}

#[cfg(test)]
mod tests {
    use crate::utils::solve_part;

    const EXAMPLE: &str = "b inc 5 if a > 1
a inc 1 if b < 5
c dec -10 if a >= 1
c inc -20 if c == 10";

    #[test]
    fn test_part_1() {
        assert_eq!(solve_part::<super::Solver>(EXAMPLE, 1), "1");
    }

    #[test]
    fn test_part_2() {
        assert_eq!(solve_part::<super::Solver>(EXAMPLE, 2), "10");
    }

    #[test]
    fn test_all_negative_registers() {
        assert_eq!(solve_part::<super::Solver>("a dec 3 if a == 0\nb dec 1 if a < 0", 1), "-1");
        assert_eq!(solve_part::<super::Solver>("a dec 3 if a == 0", 2), "0");
    }
}
