//! Continuous box space

use super::Space;
use ndarray::{ArrayD, IxDyn, Zip};
use rand::Rng;
use rand_distr::{Distribution, Uniform};

/// Element-wise bounded continuous values.
#[derive(Clone, Debug, PartialEq)]
pub struct BoxSpace {
    pub low: ArrayD<f32>,
    pub high: ArrayD<f32>,
}

impl BoxSpace {
    /// Panics if `low` and `high` differ in shape.
    pub fn new(low: ArrayD<f32>, high: ArrayD<f32>) -> Self {
        assert_eq!(low.shape(), high.shape(), "Low and high must have same shape");
        Self { low, high }
    }

    /// Same bounds for every element
    pub fn uniform(shape: &[usize], low: f32, high: f32) -> Self {
        Self::new(
            ArrayD::from_elem(IxDyn(shape), low),
            ArrayD::from_elem(IxDyn(shape), high),
        )
    }

    /// [-1, 1] for every element
    pub fn symmetric(shape: &[usize]) -> Self {
        Self::uniform(shape, -1.0, 1.0)
    }
}

impl Space for BoxSpace {
    fn shape(&self) -> &[usize] {
        self.low.shape()
    }

    // Degenerate bounds (low == high) yield low
    fn sample<R: Rng>(&self, rng: &mut R) -> ArrayD<f32> {
        let mut sample = ArrayD::zeros(self.low.raw_dim());
        Zip::from(&mut sample)
            .and(&self.low)
            .and(&self.high)
            .for_each(|s, &l, &h| {
                *s = if l < h { Uniform::new(l, h).sample(rng) } else { l };
            });
        sample
    }

    fn contains(&self, value: &ArrayD<f32>) -> bool {
        value.shape() == self.shape()
            && value
                .iter()
                .zip(self.low.iter())
                .zip(self.high.iter())
                .all(|((&v, &l), &h)| v >= l && v <= h)
    }

    /// Clamps element-wise. Elements beyond the bounds' length are kept.
    fn project(&self, value: &ArrayD<f32>) -> ArrayD<f32> {
        let mut clipped = value.clone();
        for ((v, &l), &h) in clipped.iter_mut().zip(self.low.iter()).zip(self.high.iter()) {
            *v = v.max(l).min(h);
        }
        clipped
    }
}
