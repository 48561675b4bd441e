//! Error types for the CLI

use thiserror::Error;
use thiserror_ext::Arc as ArcDerive;

/// Errors that abort the whole run
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Registration error: {0}")]
    Registration(#[from] aoc_solver::RegistrationError),

    #[error("{0}")]
    Executor(#[from] ArcExecutorError),

    /// Not an error in itself; tells `main` to exit with status 1
    #[error("{failed} part(s) failed, {mismatched} answer(s) did not match")]
    Unsuccessful { failed: usize, mismatched: usize },
}

/// Executor errors, Arc-wrapped so worker threads can merge them cheaply
#[derive(Error, Debug, ArcDerive)]
#[thiserror_ext(newtype(name = ArcExecutorError))]
pub enum ExecutorError {
    #[error("Result channel closed")]
    ChannelSend,

    #[error("Thread pool creation failed: {0}")]
    ThreadPool(String),

    #[error("Executor thread panicked")]
    Panicked,

    #[error("{} errors occurred", .0.len())]
    Multiple(Vec<ArcExecutorError>),
}

impl ArcExecutorError {
    /// Merge two errors into one `Multiple`, flattening nested ones
    pub fn combine(first: ArcExecutorError, second: ArcExecutorError) -> ArcExecutorError {
        let mut errors = Vec::new();
        for error in [first, second] {
            match error.inner() {
                ExecutorError::Multiple(nested) => errors.extend(nested.iter().cloned()),
                _ => errors.push(error),
            }
        }
        ExecutorError::Multiple(errors).into()
    }

    pub fn combine_opt(
        existing: Option<ArcExecutorError>,
        new: ArcExecutorError,
    ) -> ArcExecutorError {
        match existing {
            Some(e) => Self::combine(e, new),
            None => new,
        }
    }
}

/// Why a single part produced no answer
#[derive(Error, Debug)]
pub enum PartError {
    #[error("{0}")]
    Input(String),

    #[error("{0}")]
    Parse(String),

    #[error(transparent)]
    Solve(#[from] aoc_solver::SolveError),

    #[error("Solver panicked: {0}")]
    Panic(String),
}

/// Problems reading the input directory
#[derive(Error, Debug)]
pub enum InputError {
    #[error("No input for {year}/{day:02} (expected {path})")]
    Missing { year: u16, day: u8, path: String },

    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn len(error: &ArcExecutorError) -> usize {
        match error.inner() {
            ExecutorError::Multiple(errors) => errors.len(),
            _ => 1,
        }
    }

    #[test]
    fn test_combine_flattens() {
        let a: ArcExecutorError = ExecutorError::ChannelSend.into();
        let b: ArcExecutorError = ExecutorError::ThreadPool("boom".into()).into();
        let c: ArcExecutorError = ExecutorError::ThreadPool("again".into()).into();

        let ab = ArcExecutorError::combine(a, b);
        assert_eq!(len(&ab), 2);

        let abc = ArcExecutorError::combine(ab.clone(), c);
        assert_eq!(len(&abc), 3);

        let both = ArcExecutorError::combine(ab.clone(), abc);
        assert_eq!(len(&both), 5);
        assert_eq!(both.to_string(), "5 errors occurred");
    }

    #[test]
    fn test_combine_opt() {
        let single = ArcExecutorError::combine_opt(None, ExecutorError::ChannelSend.into());
        assert_eq!(len(&single), 1);
        let pair = ArcExecutorError::combine_opt(Some(single), ExecutorError::ChannelSend.into());
        assert_eq!(len(&pair), 2);
    }
}
