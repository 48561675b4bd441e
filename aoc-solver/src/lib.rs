//! Framework for Advent of Code solvers
//!
//! A puzzle day is a type implementing [`AocParser`] plus one [`PartSolver`]
//! per part; `#[derive(AocSolver)]` ties those together into a [`Solver`].
//! Parsed input lives in `SharedData`, which every part receives mutably, so a
//! later part can reuse work an earlier one cached there.
//!
//! Solvers are looked up by `(year, day)` in a [`SolverRegistry`], either
//! registered explicitly or collected from `#[derive(AutoRegisterSolver)]`
//! plugins at link time.
//!
//! ```
//! use aoc_solver::{
//!     AocParser, AocSolver, ParseError, PartSolver, SolveError, SolverRegistryBuilder,
//! };
//!
//! /// Memory banks: how many redistributions until a state repeats
//! #[derive(AocSolver)]
//! #[aoc_solver(max_parts = 2)]
//! struct Banks;
//!
//! pub struct Reallocation {
//!     banks: Vec<u32>,
//!     /// (cycles until the first repeat, length of the loop)
//!     repeat: Option<(usize, usize)>,
//! }
//!
//! fn redistribute(banks: &mut [u32]) {
//!     let len = banks.len();
//!     let (start, &blocks) = banks
//!         .iter()
//!         .enumerate()
//!         .rev()
//!         .max_by_key(|&(_, blocks)| blocks)
//!         .unwrap();
//!     banks[start] = 0;
//!     for i in 1..=blocks as usize {
//!         banks[(start + i) % len] += 1;
//!     }
//! }
//!
//! impl Reallocation {
//!     fn repeat(&mut self) -> (usize, usize) {
//!         *self.repeat.get_or_insert_with(|| {
//!             let mut seen = std::collections::HashMap::new();
//!             let mut banks = self.banks.clone();
//!             for cycle in 0.. {
//!                 if let Some(first) = seen.insert(banks.clone(), cycle) {
//!                     return (cycle, cycle - first);
//!                 }
//!                 redistribute(&mut banks);
//!             }
//!             unreachable!()
//!         })
//!     }
//! }
//!
//! impl AocParser for Banks {
//!     type SharedData<'a> = Reallocation;
//!
//!     fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
//!         let banks = input
//!             .split_whitespace()
//!             .map(|n| n.parse().map_err(|_| ParseError::InvalidFormat(n.into())))
//!             .collect::<Result<_, _>>()?;
//!         Ok(Reallocation { banks, repeat: None })
//!     }
//! }
//!
//! impl PartSolver<1> for Banks {
//!     fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
//!         Ok(shared.repeat().0.to_string())
//!     }
//! }
//!
//! impl PartSolver<2> for Banks {
//!     fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
//!         Ok(shared.repeat().1.to_string())
//!     }
//! }
//!
//! let registry = SolverRegistryBuilder::new()
//!     .register::<Banks>(2017, 6)
//!     .unwrap()
//!     .build();
//!
//! let mut solver = registry.create_solver(2017, 6, "0 2 7 0").unwrap();
//! assert_eq!(solver.solve(1).unwrap().answer, "5");
//! assert_eq!(solver.solve(2).unwrap().answer, "4");
//! ```
//!
//! With plugins, each day only needs the derives and its coordinates:
//! ```ignore
//! #[derive(AocSolver, AutoRegisterSolver)]
//! #[aoc_solver(max_parts = 2)]
//! #[aoc(year = 2017, day = 6, tags = ["2017", "cycle"])]
//! pub struct Solver;
//! ```

mod error;
mod instance;
mod registry;
mod solver;

// Re-export public API
pub use error::{ParseError, RegistrationError, SolveError, SolverError};
pub use instance::{DynSolver, SolveResult, SolverInstance};
pub use registry::{
    FactoryInfo, RegisterableSolver, SolverFactory, SolverFactoryStorage, SolverPlugin,
    SolverRegistry, SolverRegistryBuilder, BASE_YEAR, CAPACITY, DAYS_PER_YEAR, MAX_YEARS,
};
pub use solver::{AocParser, PartSolver, Solver, SolverExt};

// Re-export inventory for use by the derive macro
pub use inventory;

// Re-export the derive macros
pub use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
