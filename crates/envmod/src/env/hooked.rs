//! Public surface over an inner hook.

use super::{Env, EnvInfo, RenderConfig, StepResult};
use crate::spaces::{DynSpace, Space};
use crate::{EnvModError, Result};
use ndarray::ArrayD;

/// An environment split into a public surface and an inner hook.
///
/// The public `step` rejects actions outside the action space and then calls
/// the hook's `step`. `reset` and `render` go straight to the hook. Modifiers
/// attached to the hook slot wrap `C`, so they run after validation; modifiers
/// attached to the public slot wrap the whole `Hooked` and see the driver's
/// raw actions.
pub struct Hooked<C: Env> {
    hook: C,
    action_space: DynSpace,
}

impl<C: Env> Hooked<C> {
    /// Put a public surface over `hook`.
    pub fn new(hook: C) -> Self {
        let action_space = hook.action_space();
        Self { hook, action_space }
    }

    /// Get a reference to the hook
    pub fn hook(&self) -> &C {
        &self.hook
    }

    /// Get a mutable reference to the hook
    pub fn hook_mut(&mut self) -> &mut C {
        &mut self.hook
    }

    /// Wrap the hook in another layer, keeping the public surface.
    ///
    /// ```rust,ignore
    /// let env = Hooked::new(CartPole::new())
    ///     .map_hook(|hook| Rendered::new(hook, RenderConfig::log()));
    /// ```
    pub fn map_hook<D, F>(self, wrap: F) -> Hooked<D>
    where
        D: Env,
        F: FnOnce(C) -> D,
    {
        Hooked::new(wrap(self.hook))
    }

    /// Fallible variant of [`Hooked::map_hook`], for layers that validate
    /// their configuration such as `TimestepLimited`.
    pub fn try_map_hook<D, F>(self, wrap: F) -> Result<Hooked<D>>
    where
        D: Env,
        F: FnOnce(C) -> Result<D>,
    {
        Ok(Hooked::new(wrap(self.hook)?))
    }
}

impl<C: Env> Env for Hooked<C> {
    fn observation_space(&self) -> DynSpace {
        self.hook.observation_space()
    }

    fn action_space(&self) -> DynSpace {
        self.action_space.clone()
    }

    fn reset(&mut self, seed: Option<u64>) -> Result<(ArrayD<f32>, EnvInfo)> {
        self.hook.reset(seed)
    }

    fn step(&mut self, action: &ArrayD<f32>) -> Result<StepResult> {
        if !self.action_space.contains(action) {
            return Err(EnvModError::InvalidAction(format!(
                "{:?} is outside the action space {:?}",
                action.as_slice().unwrap_or(&[]),
                self.action_space
            )));
        }
        self.hook.step(action)
    }

    fn render(&mut self, config: &RenderConfig) -> Result<()> {
        self.hook.render(config)
    }

    fn close(&mut self) {
        self.hook.close()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spaces::{BoxSpace, Discrete};
    use ndarray::IxDyn;

    struct CountingEnv {
        steps: u32,
    }

    impl Env for CountingEnv {
        fn observation_space(&self) -> DynSpace {
            DynSpace::Box(BoxSpace::uniform(&[1], 0.0, 100.0))
        }

        fn action_space(&self) -> DynSpace {
            DynSpace::Discrete(Discrete::new(2))
        }

        fn reset(&mut self, _seed: Option<u64>) -> Result<(ArrayD<f32>, EnvInfo)> {
            self.steps = 0;
            Ok((ArrayD::zeros(IxDyn(&[1])), EnvInfo::new()))
        }

        fn step(&mut self, _action: &ArrayD<f32>) -> Result<StepResult> {
            self.steps += 1;
            Ok(StepResult {
                observation: ArrayD::from_elem(IxDyn(&[1]), self.steps as f32),
                reward: 1.0,
                terminated: false,
                truncated: false,
                info: EnvInfo::new(),
            })
        }
    }

    #[test]
    fn test_public_step_validates_before_hook() {
        let mut env = Hooked::new(CountingEnv { steps: 0 });
        env.reset(None).unwrap();

        let bad = ArrayD::from_elem(IxDyn(&[1]), 5.0);
        assert!(matches!(env.step(&bad), Err(EnvModError::InvalidAction(_))));
        assert_eq!(env.hook().steps, 0);

        let good = ArrayD::from_elem(IxDyn(&[1]), 1.0);
        let result = env.step(&good).unwrap();
        assert_eq!(result.observation[[0]], 1.0);
        assert_eq!(env.hook().steps, 1);
    }

    #[test]
    fn test_hook_mut_bypasses_validation() {
        let mut env = Hooked::new(CountingEnv { steps: 0 });
        let bad = ArrayD::from_elem(IxDyn(&[1]), 5.0);

        assert!(env.step(&bad).is_err());
        env.hook_mut().step(&bad).unwrap();
        assert_eq!(env.hook().steps, 1);
    }

    #[test]
    fn test_map_hook_keeps_surface() {
        let env = Hooked::new(CountingEnv { steps: 3 });
        let mapped = env.map_hook(|hook| Box::new(hook) as Box<dyn Env>);
        assert_eq!(mapped.action_space(), DynSpace::Discrete(Discrete::new(2)));
    }
}
