//! Identity environment with continuous action space for testing.

use envmod::env::{Env, EnvInfo, RenderConfig, StepResult};
use envmod::spaces::{BoxSpace, DynSpace};
use envmod::{EnvModError, Result};
use ndarray::{ArrayD, IxDyn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Environment where the observation is a random target vector and the reward
/// is the negative squared distance between the action and the target.
///
/// The episode never terminates; it is truncated after `max_steps` steps.
pub struct IdentityContinuous {
    target: Vec<f32>,
    size: usize,
    max_steps: u32,
    steps: u32,
    rng: StdRng,
}

impl IdentityContinuous {
    pub fn new(size: usize) -> Self {
        Self::with_max_steps(size, 20)
    }

    pub fn with_max_steps(size: usize, max_steps: u32) -> Self {
        Self {
            target: vec![0.0; size],
            size,
            max_steps,
            steps: 0,
            rng: StdRng::from_entropy(),
        }
    }

    fn observation(&self) -> Result<ArrayD<f32>> {
        ArrayD::from_shape_vec(IxDyn(&[self.size]), self.target.clone())
            .map_err(|e| EnvModError::EnvError(e.to_string()))
    }

    fn resample_target(&mut self) {
        let rng = &mut self.rng;
        self.target = (0..self.size).map(|_| rng.gen::<f32>() * 2.0 - 1.0).collect();
    }
}

impl Default for IdentityContinuous {
    fn default() -> Self {
        Self::new(4)
    }
}

impl Env for IdentityContinuous {
    fn observation_space(&self) -> DynSpace {
        DynSpace::Box(BoxSpace::symmetric(&[self.size]))
    }

    fn action_space(&self) -> DynSpace {
        DynSpace::Box(BoxSpace::symmetric(&[self.size]))
    }

    fn reset(&mut self, seed: Option<u64>) -> Result<(ArrayD<f32>, EnvInfo)> {
        if let Some(s) = seed {
            self.rng = StdRng::seed_from_u64(s);
        }
        self.steps = 0;
        self.resample_target();
        Ok((self.observation()?, EnvInfo::new()))
    }

    fn step(&mut self, action: &ArrayD<f32>) -> Result<StepResult> {
        if action.len() != self.size {
            return Err(EnvModError::ShapeMismatch {
                expected: vec![self.size],
                actual: action.shape().to_vec(),
            });
        }

        let reward = -self
            .target
            .iter()
            .zip(action.iter())
            .map(|(t, a)| (t - a).powi(2))
            .sum::<f32>();

        self.steps += 1;
        self.resample_target();

        Ok(StepResult {
            observation: self.observation()?,
            reward,
            terminated: false,
            truncated: self.steps >= self.max_steps,
            info: EnvInfo::new(),
        })
    }

    fn render(&mut self, config: &RenderConfig) -> Result<()> {
        let target = self
            .target
            .iter()
            .map(|t| format!("{:+.2}", t))
            .collect::<Vec<_>>()
            .join(" ");
        config.emit(&format!("step {:>3} target [{}]", self.steps, target))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncates_at_max_steps() {
        let mut env = IdentityContinuous::with_max_steps(2, 3);
        env.reset(Some(1)).unwrap();
        let action = ArrayD::zeros(IxDyn(&[2]));
        assert!(!env.step(&action).unwrap().done());
        assert!(!env.step(&action).unwrap().done());
        let last = env.step(&action).unwrap();
        assert!(last.truncated);
        assert!(!last.terminated);
    }

    #[test]
    fn test_reward_is_negative_distance() {
        let mut env = IdentityContinuous::new(3);
        let (target, _) = env.reset(Some(9)).unwrap();
        let result = env.step(&target).unwrap();
        assert_eq!(result.reward, 0.0);
    }

    #[test]
    fn test_wrong_shape_is_an_error() {
        let mut env = IdentityContinuous::new(3);
        env.reset(None).unwrap();
        let err = env.step(&ArrayD::zeros(IxDyn(&[2]))).unwrap_err();
        assert!(matches!(err, EnvModError::ShapeMismatch { .. }));
    }
}
