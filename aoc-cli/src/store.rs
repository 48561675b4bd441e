//! Puzzle inputs and known answers kept in a local directory
//!
//! Layout: `{dir}/{year}_day{dd}.txt` holds the input and the optional
//! `{dir}/{year}_day{dd}.answers` holds one expected answer per line, in part
//! order. A blank line leaves that part unchecked.

use crate::error::InputError;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

pub struct InputStore {
    dir: PathBuf,
}

impl InputStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn input_path(&self, year: u16, day: u8) -> PathBuf {
        self.dir.join(format!("{}_day{:02}.txt", year, day))
    }

    pub fn answers_path(&self, year: u16, day: u8) -> PathBuf {
        self.dir.join(format!("{}_day{:02}.answers", year, day))
    }

    pub fn contains(&self, year: u16, day: u8) -> bool {
        self.input_path(year, day).is_file()
    }

    pub fn input(&self, year: u16, day: u8) -> Result<String, InputError> {
        let path = self.input_path(year, day);
        fs::read_to_string(&path).map_err(|source| match source.kind() {
            ErrorKind::NotFound => InputError::Missing {
                year,
                day,
                path: path.display().to_string(),
            },
            _ => InputError::Io {
                path: path.display().to_string(),
                source,
            },
        })
    }

    /// Expected answers indexed by `part - 1`; empty when no answers file exists
    pub fn answers(&self, year: u16, day: u8) -> Result<Vec<Option<String>>, InputError> {
        let path = self.answers_path(year, day);
        match fs::read_to_string(&path) {
            Ok(content) => Ok(content
                .lines()
                .map(str::trim)
                .map(|line| (!line.is_empty()).then(|| line.to_string()))
                .collect()),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(year, day, "no answers file, answers stay unchecked");
                Ok(Vec::new())
            }
            Err(source) => Err(InputError::Io {
                path: path.display().to_string(),
                source,
            }),
        }
    }
}
