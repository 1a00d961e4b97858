//! Discrete action space

use super::Space;
use ndarray::{ArrayD, IxDyn};
use rand::Rng;

const SHAPE: [usize; 1] = [1];

/// The indices `0..n`, carried as a single-element `f32` array.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Discrete {
    pub n: usize,
}

impl Discrete {
    /// Panics if `n` is zero.
    pub fn new(n: usize) -> Self {
        assert!(n > 0, "Discrete space must have at least 1 element");
        Self { n }
    }

    /// The index `value` encodes, if it is a single integral element in `0..n`.
    pub fn index_of(&self, value: &ArrayD<f32>) -> Option<usize> {
        if value.len() != 1 {
            return None;
        }
        let v = *value.iter().next()?;
        if !v.is_finite() || v < 0.0 || v.fract() != 0.0 {
            return None;
        }
        let index = v as usize;
        (index < self.n).then_some(index)
    }

    fn encode(index: usize) -> ArrayD<f32> {
        ArrayD::from_elem(IxDyn(&SHAPE), index as f32)
    }
}

impl Space for Discrete {
    fn shape(&self) -> &[usize] {
        &SHAPE
    }

    fn sample<R: Rng>(&self, rng: &mut R) -> ArrayD<f32> {
        Self::encode(rng.gen_range(0..self.n))
    }

    fn contains(&self, value: &ArrayD<f32>) -> bool {
        self.index_of(value).is_some()
    }

    /// Rounds the first element to the closest index. NaN and empty input map to 0.
    fn project(&self, value: &ArrayD<f32>) -> ArrayD<f32> {
        let raw = value.iter().next().copied().unwrap_or(0.0);
        if raw.is_nan() {
            return Self::encode(0);
        }
        let max = (self.n - 1) as f32;
        ArrayD::from_elem(IxDyn(&SHAPE), raw.round().clamp(0.0, max))
    }
}
