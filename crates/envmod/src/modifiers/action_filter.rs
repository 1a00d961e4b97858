//! Action filter modifier.

use super::{Modifier, Slot};
use crate::env::{BoxedEnv, Env, EnvInfo, RenderConfig, StepResult};
use crate::spaces::DynSpace;
use crate::Result;
use ndarray::ArrayD;

/// Passes every action through `filter` before delegating the step.
pub struct ActionFiltered<E: Env, F> {
    env: E,
    filter: F,
}

impl<E, F> ActionFiltered<E, F>
where
    E: Env,
    F: FnMut(&ArrayD<f32>) -> ArrayD<f32> + Send,
{
    pub fn new(env: E, filter: F) -> Self {
        Self { env, filter }
    }
}

impl<E, F> Env for ActionFiltered<E, F>
where
    E: Env,
    F: FnMut(&ArrayD<f32>) -> ArrayD<f32> + Send,
{
    fn observation_space(&self) -> DynSpace {
        self.env.observation_space()
    }

    fn action_space(&self) -> DynSpace {
        self.env.action_space()
    }

    fn reset(&mut self, seed: Option<u64>) -> Result<(ArrayD<f32>, EnvInfo)> {
        tracing::trace!(modifier = "action_filter", "reset");
        self.env.reset(seed)
    }

    fn step(&mut self, action: &ArrayD<f32>) -> Result<StepResult> {
        tracing::trace!(modifier = "action_filter", "step");
        let filtered = (self.filter)(action);
        self.env.step(&filtered)
    }

    fn render(&mut self, config: &RenderConfig) -> Result<()> {
        self.env.render(config)
    }

    fn close(&mut self) {
        self.env.close()
    }
}

/// Attaches [`ActionFiltered`]. Defaults to the public slot, so the filter
/// sees the driver's raw action before the public surface validates it.
pub struct ActionFilter<F> {
    filter: F,
}

impl<F> ActionFilter<F>
where
    F: FnMut(&ArrayD<f32>) -> ArrayD<f32> + Send + 'static,
{
    pub fn new(filter: F) -> Self {
        Self { filter }
    }
}

impl<F> Modifier for ActionFilter<F>
where
    F: FnMut(&ArrayD<f32>) -> ArrayD<f32> + Send + 'static,
{
    fn name(&self) -> &'static str {
        "action_filter"
    }

    fn default_slot(&self) -> Slot {
        Slot::Public
    }

    fn wrap(self: Box<Self>, env: BoxedEnv) -> BoxedEnv {
        Box::new(ActionFiltered::new(env, self.filter))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spaces::BoxSpace;
    use ndarray::IxDyn;

    // Echoes the action it received as the observation
    struct EchoEnv;

    impl Env for EchoEnv {
        fn observation_space(&self) -> DynSpace {
            DynSpace::Box(BoxSpace::symmetric(&[2]))
        }

        fn action_space(&self) -> DynSpace {
            DynSpace::Box(BoxSpace::symmetric(&[2]))
        }

        fn reset(&mut self, _seed: Option<u64>) -> Result<(ArrayD<f32>, EnvInfo)> {
            Ok((ArrayD::zeros(IxDyn(&[2])), EnvInfo::new()))
        }

        fn step(&mut self, action: &ArrayD<f32>) -> Result<StepResult> {
            Ok(StepResult {
                observation: action.clone(),
                reward: action.sum(),
                terminated: false,
                truncated: false,
                info: EnvInfo::new(),
            })
        }
    }

    #[test]
    fn test_step_receives_filtered_action() {
        let mut env = ActionFiltered::new(EchoEnv, |a: &ArrayD<f32>| a.mapv(|x| x * 10.0));
        let action = ArrayD::from_shape_vec(IxDyn(&[2]), vec![0.1, -0.2]).unwrap();

        let result = env.step(&action).unwrap();
        assert_eq!(result.observation.as_slice().unwrap(), &[1.0, -2.0]);
        assert!((result.reward - (-1.0)).abs() < 1e-6);
    }

    #[test]
    fn test_stateful_filter() {
        let mut calls = 0u32;
        let mut env = ActionFiltered::new(EchoEnv, move |a: &ArrayD<f32>| {
            calls += 1;
            a.mapv(|_| calls as f32)
        });
        let action = ArrayD::zeros(IxDyn(&[2]));

        assert_eq!(env.step(&action).unwrap().observation[[0]], 1.0);
        assert_eq!(env.step(&action).unwrap().observation[[0]], 2.0);
    }
}
