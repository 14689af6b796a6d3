//! Per-run latency sample sequence

use crate::models::probe::ProbeOutcome;
use serde::Serialize;

/// Ordered latency samples of one run, one entry per attempt.
///
/// Insertion order is attempt order and becomes the chart's x axis. Entries
/// only enter through [`SampleSequence::record`], which keeps the timeout
/// count in step with the values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SampleSequence {
    values: Vec<u32>,
    timeouts: usize,
}

impl SampleSequence {
    /// Create an empty sequence
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty sequence sized for `attempts` entries
    pub fn with_capacity(attempts: usize) -> Self {
        Self {
            values: Vec::with_capacity(attempts),
            timeouts: 0,
        }
    }

    /// Sequence of measured replies, none of them timeouts
    pub fn from_latencies<I: IntoIterator<Item = u32>>(latencies: I) -> Self {
        let mut samples = Self::new();
        for ms in latencies {
            samples.record(ProbeOutcome::Latency(ms), 0);
        }
        samples
    }

    /// Append the sample for one attempt and return the recorded value
    pub fn record(&mut self, outcome: ProbeOutcome, timeout_ms: u32) -> u32 {
        if outcome.is_timeout() {
            self.timeouts += 1;
        }
        let value = outcome.sample_value(timeout_ms);
        self.values.push(value);
        value
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.values
    }

    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.values.iter().copied()
    }

    pub fn min(&self) -> Option<u32> {
        self.values.iter().copied().min()
    }

    pub fn max(&self) -> Option<u32> {
        self.values.iter().copied().max()
    }

    /// Sum of all samples, widened so long runs cannot overflow
    pub fn sum(&self) -> u64 {
        self.values.iter().map(|&v| u64::from(v)).sum()
    }

    /// Number of entries that were substituted timeouts
    pub fn timeout_count(&self) -> usize {
        self.timeouts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn outcome() -> impl Strategy<Value = ProbeOutcome> {
        prop_oneof![
            any::<u32>().prop_map(ProbeOutcome::Latency),
            Just(ProbeOutcome::Timeout),
        ]
    }

    #[test]
    fn test_record_preserves_attempt_order() {
        let mut samples = SampleSequence::with_capacity(3);
        samples.record(ProbeOutcome::Latency(0), 500);
        samples.record(ProbeOutcome::Timeout, 500);
        samples.record(ProbeOutcome::Latency(10), 500);

        assert_eq!(samples.as_slice(), &[0, 500, 10]);
        assert_eq!(samples.timeout_count(), 1);
        assert_eq!(samples.len(), 3);
    }

    #[test]
    fn test_min_max_sum() {
        let samples = SampleSequence::from_latencies(vec![5, 1, 9]);
        assert_eq!(samples.min(), Some(1));
        assert_eq!(samples.max(), Some(9));
        assert_eq!(samples.sum(), 15);

        let empty = SampleSequence::new();
        assert!(empty.is_empty());
        assert_eq!(empty.min(), None);
        assert_eq!(empty.max(), None);
    }

    #[test]
    fn test_sum_does_not_overflow() {
        let samples = SampleSequence::from_latencies(vec![u32::MAX, u32::MAX]);
        assert_eq!(samples.sum(), 2 * u64::from(u32::MAX));
    }

    #[test]
    fn test_latency_equal_to_boundary_is_not_a_timeout() {
        let mut samples = SampleSequence::new();
        samples.record(ProbeOutcome::Latency(500), 500);
        samples.record(ProbeOutcome::Timeout, 500);

        assert_eq!(samples.as_slice(), &[500, 500]);
        assert_eq!(samples.timeout_count(), 1);
        assert_eq!(SampleSequence::from_latencies(vec![500, 500]).timeout_count(), 0);
    }

    proptest! {
        #[test]
        fn prop_timeout_count_matches_recorded_timeouts(
            outcomes in prop::collection::vec(outcome(), 0..200),
            timeout_ms in 0u32..=1000,
        ) {
            let mut samples = SampleSequence::new();
            for outcome in &outcomes {
                samples.record(*outcome, timeout_ms);
            }

            let timeouts = outcomes.iter().filter(|o| o.is_timeout()).count();
            prop_assert_eq!(samples.timeout_count(), timeouts);
            prop_assert_eq!(samples.len(), outcomes.len());
        }
    }
}
