//! Knot hash over a circular list of marks

use thiserror::Error;

/// Lengths appended to every input before the 64 sparse rounds
const SUFFIX: [u8; 5] = [17, 31, 73, 47, 23];
const ROUNDS: usize = 64;
const BLOCK: usize = 16;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum KnotHashError {
    #[error("length {length} is larger than the list size {size}")]
    LengthTooLarge { length: usize, size: usize },
    #[error("list size {0} must be within 1..=256")]
    InvalidSize(usize),
}

/// Circular list of marks with the current position and skip size
#[derive(Debug, Clone)]
pub struct KnotHasher {
    marks: Vec<u8>,
    position: usize,
    skip: usize,
}

impl KnotHasher {
    pub fn new(size: usize) -> Result<Self, KnotHashError> {
        if !(1..=256).contains(&size) {
            return Err(KnotHashError::InvalidSize(size));
        }
        Ok(Self {
            marks: (0..size).map(|mark| mark as u8).collect(),
            position: 0,
            skip: 0,
        })
    }

    pub fn marks(&self) -> &[u8] {
        &self.marks
    }

    pub fn twist(&mut self, length: usize) -> Result<(), KnotHashError> {
        let size = self.marks.len();
        if length > size {
            return Err(KnotHashError::LengthTooLarge { length, size });
        }

        // Rotating first makes the reversed span contiguous
        self.marks.rotate_left(self.position);
        self.marks[..length].reverse();
        self.marks.rotate_right(self.position);

        self.position = (self.position + length + self.skip) % size;
        self.skip += 1;
        Ok(())
    }

    pub fn round(&mut self, lengths: &[usize]) -> Result<(), KnotHashError> {
        lengths.iter().try_for_each(|&length| self.twist(length))
    }

    /// Product of the first two marks, the check value of a single round
    pub fn check_product(&self) -> u32 {
        self.marks.iter().take(2).map(|&mark| u32::from(mark)).product()
    }

    /// XOR every block of 16 marks together
    pub fn dense_hash(&self) -> [u8; 16] {
        let mut dense = [0u8; 16];
        for (slot, block) in dense.iter_mut().zip(self.marks.chunks(BLOCK)) {
            *slot = block.iter().fold(0, |acc, &mark| acc ^ mark);
        }
        dense
    }
}

/// Full 64-round knot hash of `bytes`
pub fn knot_hash(bytes: &[u8]) -> [u8; 16] {
    let lengths: Vec<usize> = bytes
        .iter()
        .chain(SUFFIX.iter())
        .map(|&byte| usize::from(byte))
        .collect();

    let mut hasher = KnotHasher {
        marks: (0..=255).collect(),
        position: 0,
        skip: 0,
    };
    for _ in 0..ROUNDS {
        for &length in &lengths {
            // every length is a byte, so it never exceeds the 256 marks
            let _ = hasher.twist(length);
        }
    }
    hasher.dense_hash()
}

pub fn to_hex(hash: &[u8; 16]) -> String {
    hash.iter().map(|byte| format!("{byte:02x}")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_round_example() {
        let mut hasher = KnotHasher::new(5).unwrap();
        hasher.round(&[3, 4, 1, 5]).unwrap();
        assert_eq!(hasher.marks(), &[3, 4, 2, 1, 0]);
        assert_eq!(hasher.check_product(), 12);
    }

    #[test]
    fn test_length_too_large() {
        let mut hasher = KnotHasher::new(5).unwrap();
        assert_eq!(
            hasher.twist(6),
            Err(KnotHashError::LengthTooLarge { length: 6, size: 5 })
        );
    }

    #[test]
    fn test_invalid_size() {
        assert!(matches!(KnotHasher::new(0), Err(KnotHashError::InvalidSize(0))));
        assert!(matches!(KnotHasher::new(257), Err(KnotHashError::InvalidSize(257))));
    }

    #[test]
    fn test_knot_hash_examples() {
        let cases = [
            ("", "a2582a3a0e66e6e86e3812dcb672a272"),
            ("AoC 2017", "33efeb34ea91902bb2f59c9920caa6cd"),
            ("1,2,3", "3efbe78a8d82f29979031a4aa0b16a9d"),
            ("1,2,4", "63960835bcdc130f0b66d7ff4f6a5a8e"),
        ];
        for (input, expected) in cases {
            assert_eq!(to_hex(&knot_hash(input.as_bytes())), expected, "input {input:?}");
        }
    }
}
