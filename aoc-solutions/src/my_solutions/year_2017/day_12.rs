use std::collections::{HashMap, HashSet, VecDeque};

use anyhow::anyhow;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::parse_lines;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2017, day = 12, tags = ["2017", "graph"])]
pub struct Solver;

#[derive(Debug)]
pub struct SharedData {
    pipes: HashMap<u32, Vec<u32>>,
    groups: Option<Vec<HashSet<u32>>>,
}

impl AocParser for Solver {
    type SharedData<'a> = SharedData;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let relations = parse_lines(input, |line| {
            let (from, to) = line
                .split_once("<->")
                .ok_or_else(|| anyhow!("expected `id <-> id, id`"))?;
            let to = to
                .split(',')
                .map(|id| id.trim().parse())
                .collect::<Result<Vec<u32>, _>>()?;
            Ok((from.trim().parse::<u32>()?, to))
        })?;

        // pipes are bidirectional even if a line only lists one side
        let mut pipes: HashMap<u32, Vec<u32>> = HashMap::new();
        for (from, to) in relations {
            for &neighbour in &to {
                pipes.entry(neighbour).or_default().push(from);
            }
            pipes.entry(from).or_default().extend(to);
        }
        Ok(SharedData { pipes, groups: None })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        groups(shared)
            .iter()
            .find(|group| group.contains(&0))
            .map(|group| group.len().to_string())
            .ok_or_else(|| SolveError::failed("program 0 is not listed"))
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(groups(shared).len().to_string())
    }
}

fn groups(shared: &mut SharedData) -> &[HashSet<u32>] {
    shared.groups.get_or_insert_with(|| {
        let mut unvisited: HashSet<u32> = shared.pipes.keys().copied().collect();
        let mut groups = Vec::new();
        loop {
            let Some(start) = unvisited.iter().next().copied() else {
                break;
            };
            let group = connected(&shared.pipes, start);
            unvisited.retain(|id| !group.contains(id));
            groups.push(group);
        }
        groups
    })
}

fn connected(pipes: &HashMap<u32, Vec<u32>>, start: u32) -> HashSet<u32> {
    let mut seen = HashSet::from([start]);
    let mut queue = VecDeque::from([start]);
    while let Some(id) = queue.pop_front() {
        for &next in pipes.get(&id).into_iter().flatten() {
            if seen.insert(next) {
                queue.push_back(next);
            }
        }
    }
    seen
}
