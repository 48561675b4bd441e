//! Parsing and solving traits implemented by every puzzle day

use crate::error::{ParseError, SolveError};

/// Turns raw puzzle input into the data every part works on
///
/// `SharedData` may borrow from the input (`&'a str`, `Vec<&'a [u8]>`) or own
/// everything. It is handed to each part mutably, so a struct with an
/// `Option` cache lets part 2 pick up what part 1 already computed.
///
/// ```
/// use aoc_solver::{AocParser, ParseError};
///
/// struct Checksum;
///
/// impl AocParser for Checksum {
///     type SharedData<'a> = Vec<Vec<u32>>;
///
///     fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
///         input
///             .lines()
///             .map(|row| {
///                 row.split_whitespace()
///                     .map(|cell| {
///                         cell.parse().map_err(|_| ParseError::InvalidFormat(cell.into()))
///                     })
///                     .collect::<Result<Vec<u32>, _>>()
///             })
///             .collect()
///     }
/// }
///
/// assert_eq!(Checksum::parse("5 1 9\n7 5 3").unwrap()[1], vec![7, 5, 3]);
/// ```
pub trait AocParser {
    type SharedData<'a>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError>;
}

/// Answer to part `N` of a puzzle
///
/// ```
/// use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
///
/// struct Jumps;
///
/// impl AocParser for Jumps {
///     type SharedData<'a> = Vec<i32>;
///
///     fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
///         input
///             .split_whitespace()
///             .map(|n| n.parse().map_err(|_| ParseError::InvalidFormat(n.into())))
///             .collect()
///     }
/// }
///
/// impl PartSolver<1> for Jumps {
///     fn solve(offsets: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
///         let mut offsets = offsets.clone();
///         let (mut pc, mut steps) = (0i32, 0);
///         while let Some(offset) = offsets.get_mut(pc as usize) {
///             pc += *offset;
///             *offset += 1;
///             steps += 1;
///         }
///         Ok(steps.to_string())
///     }
/// }
///
/// let mut offsets = Jumps::parse("0 3 0 1 -3").unwrap();
/// assert_eq!(<Jumps as PartSolver<1>>::solve(&mut offsets).unwrap(), "5");
/// ```
pub trait PartSolver<const N: u8>: AocParser {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError>;
}

/// A puzzle with `PARTS` answers
///
/// Normally produced by `#[derive(AocSolver)]`, which routes `part` to
/// `<Self as PartSolver<part>>::solve`. Written by hand it looks like this:
///
/// ```
/// use aoc_solver::{AocParser, ParseError, SolveError, Solver};
///
/// struct Captcha;
///
/// impl AocParser for Captcha {
///     type SharedData<'a> = &'a [u8];
///
///     fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
///         Ok(input.trim().as_bytes())
///     }
/// }
///
/// impl Solver for Captcha {
///     const PARTS: u8 = 2;
///
///     fn solve_part(digits: &mut Self::SharedData<'_>, part: u8) -> Result<String, SolveError> {
///         let offset = match part {
///             1 => 1,
///             2 => digits.len() / 2,
///             _ => return Err(SolveError::PartNotImplemented(part)),
///         };
///         let sum: u32 = (0..digits.len())
///             .filter(|&i| digits[i] == digits[(i + offset) % digits.len()])
///             .map(|i| u32::from(digits[i] - b'0'))
///             .sum();
///         Ok(sum.to_string())
///     }
/// }
///
/// let mut digits = Captcha::parse("1122").unwrap();
/// assert_eq!(Captcha::solve_part(&mut digits, 1).unwrap(), "3");
/// assert_eq!(Captcha::solve_part(&mut digits, 2).unwrap(), "0");
/// ```
pub trait Solver: AocParser {
    const PARTS: u8;

    /// Answer `part`
    ///
    /// Parts the type has no [`PartSolver`] for return
    /// [`SolveError::PartNotImplemented`].
    fn solve_part(shared: &mut Self::SharedData<'_>, part: u8) -> Result<String, SolveError>;
}

/// Range-checked access to [`Solver::solve_part`]
pub trait SolverExt: Solver {
    /// Like `solve_part`, but parts outside `1..=PARTS` are rejected with
    /// [`SolveError::PartOutOfRange`] before reaching the solver
    fn solve_part_checked_range(
        shared: &mut Self::SharedData<'_>,
        part: u8,
    ) -> Result<String, SolveError> {
        match part {
            1.. if part <= Self::PARTS => Self::solve_part(shared, part),
            _ => Err(SolveError::PartOutOfRange(part)),
        }
    }
}

impl<T: Solver + ?Sized> SolverExt for T {}
