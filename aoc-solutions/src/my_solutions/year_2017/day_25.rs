use std::collections::{HashMap, VecDeque};

use anyhow::{Context, anyhow, bail};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 1)]
#[aoc(year = 2017, day = 25, tags = ["2017", "simulation"])]
pub struct Solver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Rule {
    write: bool,
    /// +1 for right, -1 for left
    shift: i8,
    next: char,
}

#[derive(Debug)]
pub struct Blueprint {
    start: char,
    steps: usize,
    /// Rules for a current value of 0 and of 1
    states: HashMap<char, [Rule; 2]>,
}

impl AocParser for Solver {
    type SharedData<'a> = Blueprint;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        parse_blueprint(input).map_err(|e| ParseError::InvalidFormat(format!("{e:#}")))
    }
}

/// Text between `prefix` and `suffix`, e.g. the `A` of `In state A:`
fn between<'a>(line: Option<&'a str>, prefix: &str, suffix: &str) -> anyhow::Result<&'a str> {
    let line = line.ok_or_else(|| anyhow!("expected `{prefix}...{suffix}`, found end of input"))?;
    line.strip_prefix(prefix)
        .and_then(|rest| rest.strip_suffix(suffix))
        .ok_or_else(|| anyhow!("expected `{prefix}...{suffix}`, found {line:?}"))
}

fn state_name(text: &str) -> anyhow::Result<char> {
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(name), None) => Ok(name),
        _ => bail!("invalid state name {text:?}"),
    }
}

fn parse_blueprint(input: &str) -> anyhow::Result<Blueprint> {
    let mut lines = input
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty());

    let start = state_name(between(lines.next(), "Begin in state ", ".")?)?;
    let steps = between(lines.next(), "Perform a diagnostic checksum after ", " steps.")?
        .parse()
        .context("step count")?;

    let mut states = HashMap::new();
    while let Some(header) = lines.next() {
        let name = state_name(between(Some(header), "In state ", ":")?)?;
        let mut rules = [None, None];
        for _ in 0..2 {
            let current = match between(lines.next(), "If the current value is ", ":")? {
                "0" => 0,
                "1" => 1,
                other => bail!("state {name}: tape values are 0 or 1, found {other:?}"),
            };
            let write = match between(lines.next(), "- Write the value ", ".")? {
                "0" => false,
                "1" => true,
                other => bail!("state {name}: cannot write {other:?}"),
            };
            let shift = match between(lines.next(), "- Move one slot to the ", ".")? {
                "right" => 1,
                "left" => -1,
                other => bail!("state {name}: unknown direction {other:?}"),
            };
            let next = state_name(between(lines.next(), "- Continue with state ", ".")?)?;
            rules[current] = Some(Rule { write, shift, next });
        }
        let [Some(on_zero), Some(on_one)] = rules else {
            bail!("state {name} must describe both tape values");
        };
        if states.insert(name, [on_zero, on_one]).is_some() {
            bail!("state {name} is described twice");
        }
    }

    let blueprint = Blueprint { start, steps, states };
    let referenced = std::iter::once(blueprint.start)
        .chain(blueprint.states.values().flatten().map(|rule| rule.next));
    for state in referenced {
        if !blueprint.states.contains_key(&state) {
            bail!("state {state} is referenced but never described");
        }
    }
    Ok(blueprint)
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut tape = VecDeque::from([false]);
        let mut cursor = 0usize;
        let mut state = shared.start;

        for _ in 0..shared.steps {
            let rules = shared
                .states
                .get(&state)
                .ok_or_else(|| SolveError::failed(format!("unknown state {state}")))?;
            let rule = rules[usize::from(tape[cursor])];
            tape[cursor] = rule.write;
            state = rule.next;

            if rule.shift > 0 {
                cursor += 1;
                if cursor == tape.len() {
                    tape.push_back(false);
                }
            } else if cursor == 0 {
                tape.push_front(false);
            } else {
                cursor -= 1;
            }
        }
        Ok(tape.iter().filter(|&&value| value).count().to_string())
    }
}
