//! Cycle detection for iterated functions

/// Shape of the sequence `x0, f(x0), f(f(x0)), ...` once it starts repeating
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cycle {
    /// Index of the first element that belongs to the cycle (mu)
    pub start: usize,
    /// Number of elements in the cycle (lambda)
    pub length: usize,
}

impl Cycle {
    /// Smallest step count that lands on the same element as `steps` applications of `f`
    pub fn equivalent_step(&self, steps: usize) -> usize {
        if steps < self.start {
            steps
        } else {
            self.start + (steps - self.start) % self.length
        }
    }
}

/// Floyd's tortoise and hare
///
/// Only keeps two elements alive at a time, at the price of roughly three
/// times as many applications of `f` as a hash-based search.
pub fn floyd<T, F>(x0: &T, mut f: F) -> Cycle
where
    T: Clone + PartialEq,
    F: FnMut(&T) -> T,
{
    let mut tortoise = f(x0);
    let mut hare = {
        let once = f(x0);
        f(&once)
    };
    while tortoise != hare {
        tortoise = f(&tortoise);
        let once = f(&hare);
        hare = f(&once);
    }

    let mut start = 0;
    tortoise = x0.clone();
    while tortoise != hare {
        tortoise = f(&tortoise);
        hare = f(&hare);
        start += 1;
    }

    let mut length = 1;
    hare = f(&tortoise);
    while tortoise != hare {
        hare = f(&hare);
        length += 1;
    }

    Cycle { start, length }
}
