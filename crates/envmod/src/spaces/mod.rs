//! Observation and action spaces.
//!
//! Spaces work on the flat `f32` arrays environments exchange. The public
//! surface of a `Hooked` environment validates actions with
//! [`Space::contains`], and the built-in action filters map raw actions into
//! a space with [`Space::project`].

mod r#box;
mod discrete;

pub use discrete::Discrete;
pub use r#box::BoxSpace;

use ndarray::ArrayD;
use rand::Rng;

/// A set of valid observations or actions
pub trait Space: Clone + Send + Sync {
    /// Shape of every member
    fn shape(&self) -> &[usize];

    /// Sample a random member
    fn sample<R: Rng>(&self, rng: &mut R) -> ArrayD<f32>;

    /// Whether `value` is a member
    fn contains(&self, value: &ArrayD<f32>) -> bool;

    /// The member closest to `value`.
    fn project(&self, value: &ArrayD<f32>) -> ArrayD<f32>;
}

/// Either kind of space, as reported by an environment
#[derive(Clone, Debug, PartialEq)]
pub enum DynSpace {
    Discrete(Discrete),
    Box(BoxSpace),
}

impl Space for DynSpace {
    fn shape(&self) -> &[usize] {
        match self {
            DynSpace::Discrete(s) => s.shape(),
            DynSpace::Box(s) => s.shape(),
        }
    }

    fn sample<R: Rng>(&self, rng: &mut R) -> ArrayD<f32> {
        match self {
            DynSpace::Discrete(s) => s.sample(rng),
            DynSpace::Box(s) => s.sample(rng),
        }
    }

    fn contains(&self, value: &ArrayD<f32>) -> bool {
        match self {
            DynSpace::Discrete(s) => s.contains(value),
            DynSpace::Box(s) => s.contains(value),
        }
    }

    fn project(&self, value: &ArrayD<f32>) -> ArrayD<f32> {
        match self {
            DynSpace::Discrete(s) => s.project(value),
            DynSpace::Box(s) => s.project(value),
        }
    }
}
