//! Ready-made action filters for [`ActionFilter`](super::ActionFilter).

use crate::spaces::{BoxSpace, Discrete, DynSpace, Space};
use ndarray::ArrayD;

/// A type-erased action filter.
pub type BoxedFilter = Box<dyn FnMut(&ArrayD<f32>) -> ArrayD<f32> + Send>;

/// Clamp every element into the bounds of `space`.
pub fn clip_to_box(space: &BoxSpace) -> impl FnMut(&ArrayD<f32>) -> ArrayD<f32> + Send + 'static {
    let space = space.clone();
    move |action: &ArrayD<f32>| space.project(action)
}

/// Round a scalar action to the closest index in `0..n`.
///
/// NaN maps to 0. Panics if `n` is zero.
pub fn nearest_discrete(n: usize) -> impl FnMut(&ArrayD<f32>) -> ArrayD<f32> + Send + 'static {
    let space = Discrete::new(n);
    move |action: &ArrayD<f32>| space.project(action)
}

/// Pick the filter that maps raw actions into `space`.
pub fn for_space(space: &DynSpace) -> BoxedFilter {
    let space = space.clone();
    Box::new(move |action: &ArrayD<f32>| space.project(action))
}

/// Pass actions through unchanged.
pub fn identity() -> BoxedFilter {
    Box::new(|action: &ArrayD<f32>| action.clone())
}
