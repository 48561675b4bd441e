//! Errors raised while registering, parsing and solving puzzles

use thiserror::Error;

/// The puzzle input could not be turned into shared data
#[derive(Debug, Clone, Error)]
pub enum ParseError {
    #[error("Invalid format: {0}")]
    InvalidFormat(String),
    #[error("Missing data: {0}")]
    MissingData(String),
    #[error("Parse error: {0}")]
    Other(String),
}

/// A part could not be answered
#[derive(Debug, Error)]
pub enum SolveError {
    /// The solver has no `PartSolver` for this part
    #[error("Part {0} is not implemented")]
    PartNotImplemented(u8),
    /// Part 0 or a part above the solver's `PARTS`
    #[error("Part {0} is out of range")]
    PartOutOfRange(u8),
    #[error("Solve failed: {0}")]
    SolveFailed(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl SolveError {
    /// `SolveFailed` carrying a plain message
    pub fn failed(message: impl Into<String>) -> Self {
        SolveError::SolveFailed(message.into().into())
    }
}

/// Failure to create or run a solver looked up in the registry
#[derive(Debug, Error)]
pub enum SolverError {
    #[error("No solver registered for {0}/{1:02}")]
    NotFound(u16, u8),
    #[error("{0}/{1:02} is outside the supported years and days")]
    InvalidYearDay(u16, u8),
    #[error("Parse error: {0}")]
    ParseError(#[from] ParseError),
    #[error("Solve error: {0}")]
    SolveError(#[from] SolveError),
}

#[derive(Debug, Clone, Error)]
pub enum RegistrationError {
    #[error("A solver for {0}/{1:02} is already registered")]
    DuplicateSolver(u16, u8),
    #[error("Cannot register a solver for {0}/{1:02}: out of range")]
    InvalidYearDay(u16, u8),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(SolverError::NotFound(2017, 3).to_string(), "No solver registered for 2017/03");
        assert_eq!(
            SolverError::from(SolveError::failed("no exit")).to_string(),
            "Solve error: Solve failed: no exit"
        );
        assert_eq!(
            RegistrationError::DuplicateSolver(2017, 25).to_string(),
            "A solver for 2017/25 is already registered"
        );
    }
}
