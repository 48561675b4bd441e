use aoc_solver::{
    AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError, Solver,
    SolverRegistryBuilder,
};

/// Jump offsets: owned shared data, each part works on its own copy
#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2017, day = 5, tags = ["2017", "simulation"])]
struct Maze;

impl AocParser for Maze {
    type SharedData<'a> = Vec<i64>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        input
            .split_whitespace()
            .map(|n| {
                n.parse()
                    .map_err(|_| ParseError::InvalidFormat(format!("bad offset {n}")))
            })
            .collect()
    }
}

fn escape(offsets: &[i64], adjust: impl Fn(i64) -> i64) -> Result<String, SolveError> {
    if offsets.is_empty() {
        return Err(SolveError::failed("no instructions"));
    }
    let mut offsets = offsets.to_vec();
    let (mut pc, mut steps) = (0i64, 0u32);
    while let Ok(i) = usize::try_from(pc) {
        let Some(offset) = offsets.get_mut(i) else {
            break;
        };
        pc += *offset;
        *offset += adjust(*offset);
        steps += 1;
    }
    Ok(steps.to_string())
}

impl PartSolver<1> for Maze {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        escape(shared, |_| 1)
    }
}

impl PartSolver<2> for Maze {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        escape(shared, |offset| if offset >= 3 { -1 } else { 1 })
    }
}

/// Passphrases: shared data borrowing from the input, a single part and no tags
#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 1)]
#[aoc(year = 2017, day = 4)]
struct Passphrases;

impl AocParser for Passphrases {
    type SharedData<'a> = Vec<Vec<&'a str>>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        Ok(input
            .lines()
            .map(|line| line.split_whitespace().collect())
            .collect())
    }
}

impl PartSolver<1> for Passphrases {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let valid = shared
            .iter()
            .filter(|words| {
                words
                    .iter()
                    .enumerate()
                    .all(|(i, word)| !words[..i].contains(word))
            })
            .count();
        Ok(valid.to_string())
    }
}

/// Stream scores: part 2 reads what part 1 cached
#[derive(AocSolver)]
#[aoc_solver(max_parts = 2)]
struct Stream;

struct StreamData<'a> {
    text: &'a str,
    scans: usize,
    totals: Option<(u32, u32)>,
}

impl StreamData<'_> {
    /// (group score, garbage characters), scanned at most once
    fn totals(&mut self) -> (u32, u32) {
        if let Some(totals) = self.totals {
            return totals;
        }
        self.scans += 1;
        let (mut depth, mut score, mut garbage) = (0, 0, 0);
        let (mut in_garbage, mut skip) = (false, false);
        for c in self.text.chars() {
            match (in_garbage, skip, c) {
                (true, true, _) => skip = false,
                (true, false, '!') => skip = true,
                (true, false, '>') => in_garbage = false,
                (true, false, _) => garbage += 1,
                (false, _, '<') => in_garbage = true,
                (false, _, '{') => {
                    depth += 1;
                    score += depth;
                }
                (false, _, '}') => depth -= 1,
                _ => {}
            }
        }
        *self.totals.insert((score, garbage))
    }
}

impl AocParser for Stream {
    type SharedData<'a> = StreamData<'a>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        Ok(StreamData {
            text: input.trim(),
            scans: 0,
            totals: None,
        })
    }
}

impl PartSolver<1> for Stream {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.totals().0.to_string())
    }
}

impl PartSolver<2> for Stream {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.totals().1.to_string())
    }
}

#[test]
fn test_dispatch_matches_part_solvers() {
    let mut offsets = Maze::parse("0 3 0 1 -3").unwrap();
    assert_eq!(Maze::PARTS, 2);
    assert_eq!(Maze::solve_part(&mut offsets, 1).unwrap(), "5");
    assert_eq!(Maze::solve_part(&mut offsets, 2).unwrap(), "10");
    assert_eq!(
        Maze::solve_part(&mut offsets, 1).unwrap(),
        <Maze as PartSolver<1>>::solve(&mut offsets).unwrap()
    );
}

#[test]
fn test_undeclared_parts_are_not_implemented() {
    let mut offsets = Maze::parse("0").unwrap();
    assert!(matches!(
        Maze::solve_part(&mut offsets, 3),
        Err(SolveError::PartNotImplemented(3))
    ));
    assert!(matches!(
        Maze::solve_part(&mut offsets, 0),
        Err(SolveError::PartNotImplemented(0))
    ));
}

#[test]
fn test_parts_share_cached_work() {
    let mut stream = Stream::parse("{{<ab>},{<ab>},{<ab>},{<ab>}}\n").unwrap();
    assert_eq!(Stream::solve_part(&mut stream, 1).unwrap(), "9");
    assert_eq!(Stream::solve_part(&mut stream, 2).unwrap(), "8");
    assert_eq!(stream.scans, 1);

    let mut stream = Stream::parse("{<{o\"i!a,<{i<a>}").unwrap();
    assert_eq!(Stream::solve_part(&mut stream, 2).unwrap(), "10");
}

#[test]
fn test_plugins_register_with_their_part_count() {
    let registry = SolverRegistryBuilder::new()
        .register_all_plugins()
        .unwrap()
        .build();

    assert_eq!(registry.storage().len(), 2);
    assert_eq!(registry.storage().get_info(2017, 5).unwrap().parts, 2);
    assert_eq!(registry.storage().get_info(2017, 4).unwrap().parts, 1);

    let mut maze = registry.create_solver(2017, 5, "0 3 0 1 -3").unwrap();
    assert_eq!(maze.solve(2).unwrap().answer, "10");

    let input = "aa bb cc dd ee\naa bb cc dd aa\naa bb cc dd aaa";
    let mut passphrases = registry.create_solver(2017, 4, input).unwrap();
    assert_eq!(passphrases.solve(1).unwrap().answer, "2");
    assert!(matches!(
        passphrases.solve(2),
        Err(SolveError::PartOutOfRange(2))
    ));
}

#[test]
fn test_failures_propagate_through_registry() {
    let registry = SolverRegistryBuilder::new()
        .register_all_plugins()
        .unwrap()
        .build();

    assert!(registry.create_solver(2017, 5, "0 x").is_err());

    let mut maze = registry.create_solver(2017, 5, "").unwrap();
    assert!(matches!(maze.solve(1), Err(SolveError::SolveFailed(_))));
}

#[test]
fn test_tag_filtering() {
    let registry = SolverRegistryBuilder::new()
        .register_solver_plugins(|plugin| plugin.tags.contains(&"simulation"))
        .unwrap()
        .build();

    assert!(registry.storage().contains(2017, 5));
    assert!(!registry.storage().contains(2017, 4));
}
