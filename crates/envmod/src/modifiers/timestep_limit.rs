//! Per-episode timestep limit.

use super::{Modifier, Slot};
use crate::env::{BoxedEnv, Env, EnvInfo, RenderConfig, StepResult};
use crate::spaces::DynSpace;
use crate::{EnvModError, Result};
use ndarray::ArrayD;

fn check_limit(limit: usize) -> Result<()> {
    if limit == 0 {
        return Err(EnvModError::InvalidConfig(
            "timestep limit must be at least 1".into(),
        ));
    }
    Ok(())
}

/// Forces the episode to end on its `limit`-th step.
///
/// The wrapped environment's own flags are kept; on the boundary step
/// `truncated` is set regardless of what the environment reported. A failed
/// delegate call leaves the counter untouched.
pub struct TimestepLimited<E: Env> {
    env: E,
    limit: usize,
    /// 1-based index of the next step in the current episode
    step_index: usize,
}

impl<E: Env> TimestepLimited<E> {
    /// Wrap an environment with a timestep limit.
    ///
    /// Fails with `InvalidConfig` if `limit` is zero.
    pub fn new(env: E, limit: usize) -> Result<Self> {
        check_limit(limit)?;
        Ok(Self {
            env,
            limit,
            step_index: 1,
        })
    }

    pub fn limit(&self) -> usize {
        self.limit
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

impl<E: Env> Env for TimestepLimited<E> {
    fn observation_space(&self) -> DynSpace {
        self.env.observation_space()
    }

    fn action_space(&self) -> DynSpace {
        self.env.action_space()
    }

    fn reset(&mut self, seed: Option<u64>) -> Result<(ArrayD<f32>, EnvInfo)> {
        tracing::trace!(modifier = "timestep_limit", "reset");
        let reset = self.env.reset(seed)?;
        self.step_index = 1;
        Ok(reset)
    }

    fn step(&mut self, action: &ArrayD<f32>) -> Result<StepResult> {
        tracing::trace!(
            modifier = "timestep_limit",
            step = self.step_index,
            limit = self.limit,
            "step"
        );
        let mut result = self.env.step(action)?;
        if self.step_index >= self.limit {
            if !result.done() {
                tracing::debug!(limit = self.limit, "Timestep limit reached, truncating episode");
                result.info = result.info.with_extra("time_limit_truncated", 1.0);
            }
            result.truncated = true;
        }
        self.step_index += 1;
        Ok(result)
    }

    fn render(&mut self, config: &RenderConfig) -> Result<()> {
        self.env.render(config)
    }

    fn close(&mut self) {
        self.env.close()
    }
}

/// Attaches [`TimestepLimited`]. Defaults to the hook slot.
#[derive(Clone, Copy, Debug)]
pub struct TimestepLimit {
    limit: usize,
}

impl TimestepLimit {
    /// Fails with `InvalidConfig` if `limit` is zero, before anything is attached.
    pub fn new(limit: usize) -> Result<Self> {
        check_limit(limit)?;
        Ok(Self { limit })
    }

    pub fn limit(&self) -> usize {
        self.limit
    }
}

impl Modifier for TimestepLimit {
    fn name(&self) -> &'static str {
        "timestep_limit"
    }

    fn default_slot(&self) -> Slot {
        Slot::Hook
    }

    fn wrap(self: Box<Self>, env: BoxedEnv) -> BoxedEnv {
        Box::new(TimestepLimited {
            env,
            limit: self.limit,
            step_index: 1,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spaces::{BoxSpace, Discrete};
    use ndarray::IxDyn;

    // Never ends on its own; can be told to fail the next call
    struct EndlessEnv {
        steps: u32,
        fail_next: bool,
        terminate_at: Option<u32>,
    }

    impl EndlessEnv {
        fn new() -> Self {
            Self {
                steps: 0,
                fail_next: false,
                terminate_at: None,
            }
        }
    }

    impl Env for EndlessEnv {
        fn observation_space(&self) -> DynSpace {
            DynSpace::Box(BoxSpace::uniform(&[1], 0.0, f32::MAX))
        }

        fn action_space(&self) -> DynSpace {
            DynSpace::Discrete(Discrete::new(2))
        }

        fn reset(&mut self, _seed: Option<u64>) -> Result<(ArrayD<f32>, EnvInfo)> {
            if std::mem::take(&mut self.fail_next) {
                return Err(EnvModError::EnvError("reset failed".into()));
            }
            self.steps = 0;
            Ok((ArrayD::zeros(IxDyn(&[1])), EnvInfo::new()))
        }

        fn step(&mut self, _action: &ArrayD<f32>) -> Result<StepResult> {
            if std::mem::take(&mut self.fail_next) {
                return Err(EnvModError::EnvError("step failed".into()));
            }
            self.steps += 1;
            Ok(StepResult {
                observation: ArrayD::from_elem(IxDyn(&[1]), self.steps as f32),
                reward: 1.0,
                terminated: self.terminate_at == Some(self.steps),
                truncated: false,
                info: EnvInfo::new(),
            })
        }
    }

    fn action() -> ArrayD<f32> {
        ArrayD::zeros(IxDyn(&[1]))
    }

    #[test]
    fn test_zero_limit_rejected() {
        assert!(matches!(
            TimestepLimited::new(EndlessEnv::new(), 0),
            Err(EnvModError::InvalidConfig(_))
        ));
        assert!(matches!(
            TimestepLimit::new(0),
            Err(EnvModError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_done_exactly_on_limit() {
        for limit in 1..=8 {
            let mut env = TimestepLimited::new(EndlessEnv::new(), limit).unwrap();
            env.reset(None).unwrap();
            for step in 1..limit {
                assert!(!env.step(&action()).unwrap().done(), "limit {limit} step {step}");
            }
            let last = env.step(&action()).unwrap();
            assert!(last.done());
            assert!(last.truncated);
            assert!(!last.terminated);
            assert_eq!(last.info.get("time_limit_truncated"), Some(1.0));
        }
    }

    #[test]
    fn test_reset_restarts_count() {
        let mut env = TimestepLimited::new(EndlessEnv::new(), 3).unwrap();
        env.reset(None).unwrap();
        env.step(&action()).unwrap();
        env.step(&action()).unwrap();

        env.reset(None).unwrap();
        assert!(!env.step(&action()).unwrap().done());
        assert!(!env.step(&action()).unwrap().done());
        assert!(env.step(&action()).unwrap().done());
    }

    #[test]
    fn test_counts_from_attachment_without_reset() {
        let mut env = TimestepLimited::new(EndlessEnv::new(), 2).unwrap();
        assert!(!env.step(&action()).unwrap().done());
        assert!(env.step(&action()).unwrap().done());
    }

    #[test]
    fn test_environment_termination_passes_through() {
        let mut inner = EndlessEnv::new();
        inner.terminate_at = Some(2);
        let mut env = TimestepLimited::new(inner, 10).unwrap();
        env.reset(None).unwrap();
        env.step(&action()).unwrap();
        let result = env.step(&action()).unwrap();
        assert!(result.terminated);
        assert!(!result.truncated);
        assert_eq!(result.info.get("time_limit_truncated"), None);
    }

    #[test]
    fn test_failed_step_does_not_advance() {
        let mut env = TimestepLimited::new(EndlessEnv::new(), 2).unwrap();
        env.reset(None).unwrap();
        assert!(!env.step(&action()).unwrap().done());

        env.inner_mut().fail_next = true;
        assert!(env.step(&action()).is_err());
        assert_eq!(env.inner().steps, 1);

        assert!(env.step(&action()).unwrap().done());
    }

    #[test]
    fn test_failed_reset_keeps_count() {
        let mut env = TimestepLimited::new(EndlessEnv::new(), 2).unwrap();
        env.reset(None).unwrap();
        env.step(&action()).unwrap();

        env.inner_mut().fail_next = true;
        assert!(env.reset(None).is_err());

        assert!(env.step(&action()).unwrap().done());
    }
}
