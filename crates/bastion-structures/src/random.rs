use rand::{Rng, RngCore};

/// The only randomness the placement core consumes. Seeding belongs to the
/// caller.
pub trait RandomSource {
    /// Uniform integer in `[0, bound)`; 0 when `bound <= 0`.
    fn next_bounded_int(&mut self, bound: i32) -> i32;
}

impl<R: RngCore> RandomSource for R {
    #[inline]
    fn next_bounded_int(&mut self, bound: i32) -> i32 {
        if bound <= 0 {
            return 0;
        }
        self.gen_range(0..bound)
    }
}

/// Replays a fixed list of draws in a loop, each reduced into `[0, bound)`.
#[derive(Clone, Debug)]
pub struct SequenceRandom {
    values: Vec<i32>,
    cursor: usize,
    draws: usize,
}

impl SequenceRandom {
    pub fn new(values: impl Into<Vec<i32>>) -> Self {
        let mut values = values.into();
        if values.is_empty() {
            values.push(0);
        }
        Self {
            values,
            cursor: 0,
            draws: 0,
        }
    }

    /// Always draws `value` (reduced into range).
    pub fn constant(value: i32) -> Self {
        Self::new(vec![value])
    }

    #[inline]
    pub fn draws(&self) -> usize {
        self.draws
    }
}

impl RandomSource for SequenceRandom {
    fn next_bounded_int(&mut self, bound: i32) -> i32 {
        let v = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        self.draws += 1;
        if bound <= 0 { 0 } else { v.rem_euclid(bound) }
    }
}
