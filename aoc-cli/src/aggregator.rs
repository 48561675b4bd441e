//! Restores `(year, day, part)` order for results finishing in any order
//!
//! Results wait in a sorted map until every key before them has been
//! released, so printing stays deterministic under any parallel schedule.

use crate::executor::SolverResult;
use std::collections::{BTreeMap, BTreeSet};

/// Sort key of a result; fields compare in declaration order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ResultKey {
    pub year: u16,
    pub day: u8,
    pub part: u8,
}

impl ResultKey {
    pub fn of(result: &SolverResult) -> Self {
        Self {
            year: result.year,
            day: result.day,
            part: result.part,
        }
    }
}

pub struct ResultAggregator {
    outstanding: BTreeSet<ResultKey>,
    buffered: BTreeMap<ResultKey, SolverResult>,
}

impl ResultAggregator {
    pub fn new(expected: impl IntoIterator<Item = ResultKey>) -> Self {
        Self {
            outstanding: expected.into_iter().collect(),
            buffered: BTreeMap::new(),
        }
    }

    /// Buffer `result` and hand back the run of results it unblocked
    pub fn add(&mut self, result: SolverResult) -> Vec<SolverResult> {
        self.buffered.insert(ResultKey::of(&result), result);

        let mut ready = Vec::new();
        while let Some(&next) = self.outstanding.first() {
            let Some(result) = self.buffered.remove(&next) else {
                break;
            };
            self.outstanding.remove(&next);
            ready.push(result);
        }
        ready
    }

    /// Whatever is still buffered, sorted; used when the channel closes early
    pub fn drain(&mut self) -> Vec<SolverResult> {
        std::mem::take(&mut self.buffered).into_values().collect()
    }

    pub fn is_complete(&self) -> bool {
        self.outstanding.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::Verification;
    use chrono::TimeDelta;
    use proptest::prelude::*;

    fn key(year: u16, day: u8, part: u8) -> ResultKey {
        ResultKey { year, day, part }
    }

    fn finished(k: ResultKey) -> SolverResult {
        SolverResult {
            year: k.year,
            day: k.day,
            part: k.part,
            answer: Ok(format!("{}/{:02}#{}", k.year, k.day, k.part)),
            parse_duration: Some(TimeDelta::microseconds(300)),
            solve_duration: TimeDelta::milliseconds(2),
            verification: Verification::Unchecked,
        }
    }

    #[test]
    fn test_out_of_order_results() {
        let keys = [key(2017, 1, 1), key(2017, 1, 2), key(2017, 2, 1)];
        let mut agg = ResultAggregator::new(keys);

        assert!(agg.add(finished(keys[1])).is_empty());
        assert!(agg.add(finished(keys[2])).is_empty());

        let ready: Vec<_> = agg
            .add(finished(keys[0]))
            .iter()
            .map(ResultKey::of)
            .collect();
        assert_eq!(ready, keys);
        assert!(agg.is_complete());
    }

    #[test]
    fn test_drain_after_a_lost_result() {
        let mut agg = ResultAggregator::new([key(2017, 3, 1), key(2017, 3, 2), key(2017, 4, 1)]);

        assert!(agg.add(finished(key(2017, 4, 1))).is_empty());
        assert!(agg.add(finished(key(2017, 3, 2))).is_empty());
        assert!(!agg.is_complete());

        let parts: Vec<_> = agg.drain().iter().map(|r| (r.day, r.part)).collect();
        assert_eq!(parts, [(3, 2), (4, 1)]);
        assert!(agg.drain().is_empty());
    }

    proptest! {
        #[test]
        fn prop_any_arrival_order_is_emitted_sorted(
            order in Just((0..20usize).collect::<Vec<_>>()).prop_shuffle()
        ) {
            let keys: Vec<_> = (1..=10u8)
                .flat_map(|day| (1..=2u8).map(move |part| key(2017, day, part)))
                .collect();
            let mut agg = ResultAggregator::new(keys.iter().copied());

            let emitted: Vec<_> = order
                .iter()
                .flat_map(|&i| agg.add(finished(keys[i])))
                .map(|r| ResultKey::of(&r))
                .collect();

            prop_assert_eq!(emitted, keys);
            prop_assert!(agg.is_complete());
        }
    }
}
