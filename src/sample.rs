use std::ops::Index;

use crate::model::{ReverbError, ReverbResult};

pub const SAMPLE_MAX_SIZE: usize = 100;

/// Sums below this are treated as zero.
pub const EPSILON: f64 = 0.00000001;

/// Fixed-capacity signal buffer. Slots past the pushed values hold 0.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample<const N: usize = SAMPLE_MAX_SIZE> {
    slots: [f64; N],
    len: usize,
}

impl<const N: usize> Sample<N> {
    pub fn new() -> Self {
        Self {
            slots: [0.0; N],
            len: 0,
        }
    }

    /// Wrap a fully populated buffer, e.g. a convolution output.
    pub fn from_slots(slots: [f64; N]) -> Self {
        Self { slots, len: N }
    }

    pub fn from_values(values: &[f64]) -> ReverbResult<Self> {
        let mut sample = Self::new();
        for &v in values {
            sample.push(v)?;
        }
        Ok(sample)
    }

    pub fn push(&mut self, value: f64) -> ReverbResult<()> {
        if self.len >= N {
            return Err(ReverbError::CapacityExceeded { capacity: N });
        }
        self.slots[self.len] = value;
        self.len += 1;
        Ok(())
    }

    /// Number of values pushed so far.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub const fn capacity(&self) -> usize {
        N
    }

    pub fn slots(&self) -> &[f64; N] {
        &self.slots
    }

    /// The whole buffer, unused slots included.
    pub fn as_slice(&self) -> &[f64] {
        &self.slots
    }

    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.slots
    }

    pub fn sum(&self) -> f64 {
        self.slots.iter().sum()
    }

    /// Move the occupied head of the buffer right by half of the trailing
    /// zero run, so the leading gap ends up equal to or one shorter than
    /// the trailing gap.
    ///
    /// Occupied slots must be contiguous from index 0, which is how
    /// ingestion fills a sample. Interior zeros move along with the data.
    pub fn centralize(&mut self) {
        let margin = self.slots.iter().rev().take_while(|&&v| v == 0.0).count();
        let shift = margin / 2;
        if shift == 0 {
            return;
        }

        let occupied = N - margin;
        self.slots.copy_within(0..occupied, shift);
        self.slots[..shift].fill(0.0);
    }

    pub fn normalize(&mut self) {
        normalize(&mut self.slots);
    }
}

impl<const N: usize> Default for Sample<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> Index<usize> for Sample<N> {
    type Output = f64;

    fn index(&self, idx: usize) -> &f64 {
        &self.slots[idx]
    }
}

/// Scale `values` so they sum to 1. A sum below [`EPSILON`] leaves the
/// buffer untouched.
pub fn normalize(values: &mut [f64]) {
    let sum: f64 = values.iter().sum();
    if sum < EPSILON {
        return;
    }
    for v in values.iter_mut() {
        *v /= sum;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    fn leading_zeros(values: &[f64]) -> usize {
        values.iter().take_while(|&&v| v == 0.0).count()
    }

    fn trailing_zeros(values: &[f64]) -> usize {
        values.iter().rev().take_while(|&&v| v == 0.0).count()
    }

    #[test]
    fn push_stops_at_capacity() {
        let mut sample = Sample::<3>::new();
        for v in [1.0, 2.0, 3.0] {
            sample.push(v).unwrap();
        }
        assert!(matches!(
            sample.push(4.0),
            Err(ReverbError::CapacityExceeded { capacity: 3 })
        ));
        assert_eq!(sample.len(), 3);
        assert_eq!(sample.as_slice(), &[1.0, 2.0, 3.0]);
    }

    #[test]
    fn default_capacity_is_one_hundred() {
        let sample: Sample = Sample::new();
        assert_eq!(sample.capacity(), SAMPLE_MAX_SIZE);
        assert!(sample.is_empty());
        assert_eq!(sample.sum(), 0.0);
    }

    #[test]
    fn centralize_splits_margin() {
        let mut sample = Sample::<8>::from_values(&[1.0, 2.0, 3.0]).unwrap();
        sample.centralize();
        assert_eq!(sample.as_slice(), &[0.0, 0.0, 1.0, 2.0, 3.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn centralize_keeps_interior_zeros() {
        let mut sample = Sample::<7>::from_values(&[1.0, 0.0, 2.0]).unwrap();
        sample.centralize();
        assert_eq!(sample.as_slice(), &[0.0, 0.0, 1.0, 0.0, 2.0, 0.0, 0.0]);
    }

    #[test]
    fn centralize_trailing_input_zeros_count_as_margin() {
        let mut sample: Sample = Sample::from_values(&[1.0, 0.0, 0.0]).unwrap();
        sample.centralize();
        assert_eq!(sample[49], 1.0);
        assert_eq!(sample.sum(), 1.0);
    }

    #[test]
    fn centralize_without_room_is_noop() {
        let mut full = Sample::<4>::from_values(&[1.0, 2.0, 3.0, 4.0]).unwrap();
        full.centralize();
        assert_eq!(full.as_slice(), &[1.0, 2.0, 3.0, 4.0]);

        // A single spare slot rounds down to no shift.
        let mut one_spare = Sample::<4>::from_values(&[1.0, 2.0, 3.0]).unwrap();
        one_spare.centralize();
        assert_eq!(one_spare.as_slice(), &[1.0, 2.0, 3.0, 0.0]);

        let mut empty: Sample = Sample::new();
        empty.centralize();
        assert_eq!(empty, Sample::new());
    }

    #[test]
    fn centralize_random_lengths() {
        let mut rng = rand::thread_rng();
        for _ in 0..200 {
            let occupied = rng.gen_range(1..=SAMPLE_MAX_SIZE);
            let values: Vec<f64> = (0..occupied).map(|_| rng.gen_range(0.001..10.0)).collect();
            let mut sample: Sample = Sample::from_values(&values).unwrap();
            sample.centralize();

            let k = SAMPLE_MAX_SIZE - occupied;
            let slots = sample.as_slice();
            assert_eq!(leading_zeros(slots), k / 2);
            assert_eq!(trailing_zeros(slots), k - k / 2);
            assert_eq!(&slots[k / 2..k / 2 + occupied], values.as_slice());
        }
    }

    #[test]
    fn normalize_sums_to_one() {
        let mut rng = rand::thread_rng();
        for _ in 0..200 {
            let mut values = [0.0; SAMPLE_MAX_SIZE];
            let occupied = rng.gen_range(1..=SAMPLE_MAX_SIZE);
            for v in values.iter_mut().take(occupied) {
                *v = rng.gen_range(0.001..1000.0);
            }
            normalize(&mut values);
            let sum: f64 = values.iter().sum();
            assert!((sum - 1.0).abs() < 1e-9, "sum was {}", sum);
        }
    }

    #[test]
    fn normalize_leaves_near_zero_sums_alone() {
        let mut zeros = [0.0; 5];
        normalize(&mut zeros);
        assert_eq!(zeros, [0.0; 5]);

        let mut tiny = [1e-9, 0.0, 2e-9];
        normalize(&mut tiny);
        assert_eq!(tiny, [1e-9, 0.0, 2e-9]);
    }

    #[test]
    fn normalize_proportions() {
        let mut sample = Sample::<4>::from_values(&[1.0, 3.0]).unwrap();
        sample.normalize();
        assert_eq!(sample.as_slice(), &[0.25, 0.75, 0.0, 0.0]);
    }
}
