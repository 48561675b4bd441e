use std::collections::{HashMap, HashSet};

use anyhow::{Context, anyhow};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use itertools::Itertools;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2017, day = 7, tags = ["2017", "tree"])]
pub struct Solver;

#[derive(Debug)]
pub struct Program<'a> {
    weight: i64,
    children: Vec<&'a str>,
}

#[derive(Debug)]
pub struct Tower<'a> {
    programs: HashMap<&'a str, Program<'a>>,
    root: Option<&'a str>,
}

impl AocParser for Solver {
    type SharedData<'a> = Tower<'a>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        input
            .lines()
            .map(str::trim)
            .enumerate()
            .filter(|(_, line)| !line.is_empty())
            .map(|(idx, line)| parse_program(line).with_context(|| format!("(line {})", idx + 1)))
            .collect::<anyhow::Result<HashMap<_, _>>>()
            .map(|programs| Tower { programs, root: None })
            .map_err(|e| ParseError::InvalidFormat(format!("{e:#}")))
    }
}

/// `name (weight)` optionally followed by `-> child, child`
fn parse_program(line: &str) -> anyhow::Result<(&str, Program<'_>)> {
    let (head, children) = match line.split_once("->") {
        Some((head, children)) => (head, children.split(',').map(str::trim).collect()),
        None => (line, Vec::new()),
    };
    let (name, weight) = head
        .split_whitespace()
        .collect_tuple()
        .ok_or_else(|| anyhow!("expected `name (weight)`"))?;
    let weight = weight
        .strip_prefix('(')
        .and_then(|w| w.strip_suffix(')'))
        .ok_or_else(|| anyhow!("weight must be parenthesised"))?
        .parse()?;
    Ok((name, Program { weight, children }))
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(root(shared)?.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let root = root(shared)?;
        let mut weights = HashMap::new();
        let mut current = root;
        let mut delta = 0;

        loop {
            let program = lookup(&shared.programs, current)?;
            let child_weights = program
                .children
                .iter()
                .map(|&child| {
                    tower_weight(&shared.programs, child, &mut weights).map(|w| (child, w))
                })
                .collect::<Result<Vec<_>, _>>()?;

            let counts = child_weights.iter().counts_by(|&(_, weight)| weight);
            if counts.len() <= 1 {
                if current == root {
                    return Err(SolveError::failed("the tower is already balanced"));
                }
                // children agree, so this program's own weight is the odd one
                return Ok((program.weight + delta).to_string());
            }

            let (odd, common): (Vec<_>, Vec<_>) =
                counts.iter().partition(|&(_, &count)| count == 1);
            let (odd, expected) = match (odd, common) {
                (odd, common) if odd.len() == 1 && common.len() == 1 => (*odd[0].0, *common[0].0),
                _ => {
                    return Err(SolveError::failed(format!(
                        "cannot tell which child of {current} is unbalanced"
                    )));
                }
            };
            delta = expected - odd;
            current = child_weights
                .iter()
                .find(|&&(_, weight)| weight == odd)
                .map(|&(child, _)| child)
                .ok_or_else(|| SolveError::failed("odd child vanished"))?;
        }
    }
}

fn lookup<'t, 'a>(
    programs: &'t HashMap<&'a str, Program<'a>>,
    name: &str,
) -> Result<&'t Program<'a>, SolveError> {
    programs
        .get(name)
        .ok_or_else(|| SolveError::failed(format!("unknown program {name}")))
}

/// The single program that no other program holds
fn root<'a>(tower: &mut Tower<'a>) -> Result<&'a str, SolveError> {
    if let Some(root) = tower.root {
        return Ok(root);
    }
    let held: HashSet<&str> = tower
        .programs
        .values()
        .flat_map(|program| program.children.iter().copied())
        .collect();
    let root = tower
        .programs
        .keys()
        .copied()
        .filter(|name| !held.contains(name))
        .exactly_one()
        .map_err(|candidates| {
            SolveError::failed(format!(
                "expected exactly one bottom program, found {}",
                candidates.count()
            ))
        })?;
    tower.root = Some(root);
    Ok(root)
}

fn tower_weight<'a>(
    programs: &HashMap<&'a str, Program<'a>>,
    name: &'a str,
    cache: &mut HashMap<&'a str, i64>,
) -> Result<i64, SolveError> {
    if let Some(&weight) = cache.get(name) {
        return Ok(weight);
    }
    let program = lookup(programs, name)?;
    let mut total = program.weight;
    for &child in &program.children {
        total += tower_weight(programs, child, cache)?;
    }
    cache.insert(name, total);
    Ok(total)
}
