//! Episode statistics modifier.

use super::{Modifier, Slot};
use crate::env::{BoxedEnv, Env, EnvInfo, RenderConfig, StepResult};
use crate::spaces::DynSpace;
use crate::Result;
use ndarray::ArrayD;

/// Wrapper that tracks episode statistics (return and length).
///
/// Adds `episode_return` and `episode_length` to info on episode completion.
pub struct EpisodeStats<E: Env> {
    env: E,
    episode_return: f32,
    episode_length: u32,
}

impl<E: Env> EpisodeStats<E> {
    /// Wrap an environment with episode statistics tracking
    pub fn new(env: E) -> Self {
        Self {
            env,
            episode_return: 0.0,
            episode_length: 0,
        }
    }
}

impl<E: Env> Env for EpisodeStats<E> {
    fn observation_space(&self) -> DynSpace {
        self.env.observation_space()
    }

    fn action_space(&self) -> DynSpace {
        self.env.action_space()
    }

    fn reset(&mut self, seed: Option<u64>) -> Result<(ArrayD<f32>, EnvInfo)> {
        tracing::trace!(modifier = "episode_stats", "reset");
        let reset = self.env.reset(seed)?;
        self.episode_return = 0.0;
        self.episode_length = 0;
        Ok(reset)
    }

    fn step(&mut self, action: &ArrayD<f32>) -> Result<StepResult> {
        tracing::trace!(modifier = "episode_stats", "step");
        let mut result = self.env.step(action)?;

        self.episode_return += result.reward;
        self.episode_length += 1;

        if result.done() {
            result.info = result
                .info
                .with_episode_stats(self.episode_return, self.episode_length);

            // The driver resets the environment; start counting the next episode now
            self.episode_return = 0.0;
            self.episode_length = 0;
        }

        Ok(result)
    }

    fn render(&mut self, config: &RenderConfig) -> Result<()> {
        self.env.render(config)
    }

    fn close(&mut self) {
        self.env.close()
    }
}

/// Attaches [`EpisodeStats`]. Defaults to the public slot.
#[derive(Clone, Copy, Debug, Default)]
pub struct EpisodeStatistics;

impl Modifier for EpisodeStatistics {
    fn name(&self) -> &'static str {
        "episode_stats"
    }

    fn default_slot(&self) -> Slot {
        Slot::Public
    }

    fn wrap(self: Box<Self>, env: BoxedEnv) -> BoxedEnv {
        Box::new(EpisodeStats::new(env))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spaces::{BoxSpace, Discrete};
    use ndarray::IxDyn;

    // Simple test environment
    struct SimpleEnv {
        step_count: u32,
    }

    impl Env for SimpleEnv {
        fn observation_space(&self) -> DynSpace {
            DynSpace::Box(BoxSpace::uniform(&[2], 0.0, 1.0))
        }

        fn action_space(&self) -> DynSpace {
            DynSpace::Discrete(Discrete::new(2))
        }

        fn reset(&mut self, _seed: Option<u64>) -> Result<(ArrayD<f32>, EnvInfo)> {
            self.step_count = 0;
            Ok((ArrayD::zeros(IxDyn(&[2])), EnvInfo::new()))
        }

        fn step(&mut self, _action: &ArrayD<f32>) -> Result<StepResult> {
            self.step_count += 1;
            Ok(StepResult {
                observation: ArrayD::zeros(IxDyn(&[2])),
                reward: 1.0,
                terminated: self.step_count >= 5,
                truncated: false,
                info: EnvInfo::new(),
            })
        }
    }

    #[test]
    fn test_episode_stats() {
        let env = SimpleEnv { step_count: 0 };
        let mut wrapped = EpisodeStats::new(env);

        wrapped.reset(None).unwrap();

        let action = ArrayD::zeros(IxDyn(&[1]));
        for _ in 0..4 {
            let result = wrapped.step(&action).unwrap();
            assert!(!result.done());
            assert!(result.info.get("episode_return").is_none());
        }

        // 5th step should terminate
        let result = wrapped.step(&action).unwrap();
        assert!(result.done());
        assert_eq!(result.info.get("episode_return"), Some(5.0));
        assert_eq!(result.info.get("episode_length"), Some(5.0));
    }
}
