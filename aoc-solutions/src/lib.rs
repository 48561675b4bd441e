//! Advent of Code 2017 solutions
//!
//! Every day registers itself through `#[derive(AutoRegisterSolver)]`, so a
//! binary only has to link this crate to find them. Code reused by several
//! days (knot hash, the duet register machine, cycle detection) lives in
//! [`utils`].

pub mod utils;

#[cfg(feature = "my-solutions")]
pub mod my_solutions;
