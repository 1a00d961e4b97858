//! Reward filter modifier.

use super::{Modifier, Slot};
use crate::env::{BoxedEnv, Env, EnvInfo, RenderConfig, StepResult};
use crate::spaces::DynSpace;
use crate::Result;
use ndarray::ArrayD;

/// Maps the reward of every step through `filter`.
///
/// Everything else in the step result is returned as the wrapped
/// environment produced it.
pub struct RewardFiltered<E: Env, F> {
    env: E,
    filter: F,
}

impl<E, F> RewardFiltered<E, F>
where
    E: Env,
    F: FnMut(f32) -> f32 + Send,
{
    pub fn new(env: E, filter: F) -> Self {
        Self { env, filter }
    }

    /// Get a reference to the inner environment
    pub fn inner(&self) -> &E {
        &self.env
    }

    /// Get a mutable reference to the inner environment
    pub fn inner_mut(&mut self) -> &mut E {
        &mut self.env
    }
}

impl<E, F> Env for RewardFiltered<E, F>
where
    E: Env,
    F: FnMut(f32) -> f32 + Send,
{
    fn observation_space(&self) -> DynSpace {
        self.env.observation_space()
    }

    fn action_space(&self) -> DynSpace {
        self.env.action_space()
    }

    fn reset(&mut self, seed: Option<u64>) -> Result<(ArrayD<f32>, EnvInfo)> {
        tracing::trace!(modifier = "reward_filter", "reset");
        self.env.reset(seed)
    }

    fn step(&mut self, action: &ArrayD<f32>) -> Result<StepResult> {
        tracing::trace!(modifier = "reward_filter", "step");
        let mut result = self.env.step(action)?;
        result.reward = (self.filter)(result.reward);
        Ok(result)
    }

    fn render(&mut self, config: &RenderConfig) -> Result<()> {
        self.env.render(config)
    }

    fn close(&mut self) {
        self.env.close()
    }
}

/// Attaches [`RewardFiltered`]. Defaults to the hook slot: the reward is
/// produced behind the public surface and validation never looks at it.
pub struct RewardFilter<F> {
    filter: F,
}

impl<F> RewardFilter<F>
where
    F: FnMut(f32) -> f32 + Send + 'static,
{
    pub fn new(filter: F) -> Self {
        Self { filter }
    }
}

impl RewardFilter<Box<dyn FnMut(f32) -> f32 + Send>> {
    /// Multiply every reward by `factor`.
    pub fn scale(factor: f32) -> Self {
        Self::new(Box::new(move |reward: f32| reward * factor))
    }
}

impl<F> Modifier for RewardFilter<F>
where
    F: FnMut(f32) -> f32 + Send + 'static,
{
    fn name(&self) -> &'static str {
        "reward_filter"
    }

    fn default_slot(&self) -> Slot {
        Slot::Hook
    }

    fn wrap(self: Box<Self>, env: BoxedEnv) -> BoxedEnv {
        Box::new(RewardFiltered::new(env, self.filter))
    }
}
