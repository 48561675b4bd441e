//! Properties of part dispatch and part bounds

use aoc_solver::{
    AocParser, AocSolver, DynSolver, ParseError, PartSolver, SolveError, Solver, SolverExt,
    SolverInstance,
};
use proptest::prelude::*;

/// Spreadsheet checksum: row ranges, then evenly divisible pairs
#[derive(AocSolver)]
#[aoc_solver(max_parts = 2)]
struct Checksum;

impl AocParser for Checksum {
    type SharedData<'a> = Vec<Vec<u32>>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        input
            .lines()
            .filter(|row| !row.trim().is_empty())
            .map(|row| {
                row.split_whitespace()
                    .map(|cell| {
                        cell.parse()
                            .map_err(|_| ParseError::InvalidFormat(format!("bad cell {cell}")))
                    })
                    .collect::<Result<Vec<u32>, _>>()
            })
            .collect()
    }
}

impl PartSolver<1> for Checksum {
    fn solve(rows: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let sum: u32 = rows
            .iter()
            .map(|row| row.iter().max().unwrap_or(&0) - row.iter().min().unwrap_or(&0))
            .sum();
        Ok(sum.to_string())
    }
}

impl PartSolver<2> for Checksum {
    fn solve(rows: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut sum = 0;
        for row in rows.iter() {
            sum += row
                .iter()
                .flat_map(|&a| row.iter().map(move |&b| (a, b)))
                .find(|&(a, b)| a != b && b != 0 && a % b == 0)
                .map(|(a, b)| a / b)
                .ok_or_else(|| SolveError::failed("row without an evenly divisible pair"))?;
        }
        Ok(sum.to_string())
    }
}

/// Answers its own part number, with `N` parts
struct Echo<const N: u8>;

impl<const N: u8> AocParser for Echo<N> {
    type SharedData<'a> = ();

    fn parse(_input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        Ok(())
    }
}

impl<const N: u8> Solver for Echo<N> {
    const PARTS: u8 = N;

    fn solve_part(_shared: &mut Self::SharedData<'_>, part: u8) -> Result<String, SolveError> {
        Ok(part.to_string())
    }
}

fn checked(parts: u8, part: u8) -> Result<String, SolveError> {
    match parts {
        1 => Echo::<1>::solve_part_checked_range(&mut (), part),
        2 => Echo::<2>::solve_part_checked_range(&mut (), part),
        _ => Echo::<3>::solve_part_checked_range(&mut (), part),
    }
}

fn rows_text(rows: &[Vec<u32>]) -> String {
    rows.iter()
        .map(|row| row.iter().map(u32::to_string).collect::<Vec<_>>().join("\t"))
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn test_checksum_example() {
    let mut rows = Checksum::parse("5 1 9 5\n7 5 3\n2 4 6 8").unwrap();
    assert_eq!(Checksum::solve_part(&mut rows, 1).unwrap(), "18");

    let mut rows = Checksum::parse("5 9 2 8\n9 4 7 3\n3 8 6 5").unwrap();
    assert_eq!(Checksum::solve_part(&mut rows, 2).unwrap(), "9");
}

#[test]
fn test_solve_failure_surfaces_through_instance() {
    let mut instance = SolverInstance::<Checksum>::new(2017, 2, "3 5 7").unwrap();
    assert_eq!(instance.solve(1).unwrap().answer, "4");
    assert!(matches!(instance.solve(2), Err(SolveError::SolveFailed(_))));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_derive_dispatches_to_part_solvers(
        rows in prop::collection::vec(prop::collection::vec(1u32..100, 1..6), 1..6),
        part in 1u8..=2
    ) {
        let input = rows_text(&rows);
        let mut via_solver = Checksum::parse(&input).unwrap();
        let mut direct = Checksum::parse(&input).unwrap();

        let dispatched = Checksum::solve_part(&mut via_solver, part).map_err(|e| e.to_string());
        let expected = match part {
            1 => <Checksum as PartSolver<1>>::solve(&mut direct),
            _ => <Checksum as PartSolver<2>>::solve(&mut direct),
        }
        .map_err(|e| e.to_string());
        prop_assert_eq!(dispatched, expected);
    }

    #[test]
    fn prop_parts_beyond_max_are_not_implemented(part in 3u8..=255) {
        let mut rows = Checksum::parse("1 2").unwrap();
        prop_assert!(matches!(
            Checksum::solve_part(&mut rows, part),
            Err(SolveError::PartNotImplemented(p)) if p == part
        ));
    }

    #[test]
    fn prop_checked_range_bounds(parts in 1u8..=3, part in 0u8..=255) {
        let result = checked(parts, part);
        if (1..=parts).contains(&part) {
            prop_assert_eq!(result.unwrap(), part.to_string());
        } else {
            prop_assert!(matches!(result, Err(SolveError::PartOutOfRange(p)) if p == part));
        }
    }

    #[test]
    fn prop_instance_rejects_out_of_range(part in 3u8..=255) {
        let mut instance = SolverInstance::<Checksum>::new(2017, 2, "4 2").unwrap();
        prop_assert!(matches!(
            instance.solve(part),
            Err(SolveError::PartOutOfRange(p)) if p == part
        ));
        prop_assert!(matches!(instance.solve(0), Err(SolveError::PartOutOfRange(0))));
    }
}
