//! Core environment trait definitions.

use super::RenderConfig;
use crate::spaces::DynSpace;
use crate::Result;
use ndarray::ArrayD;

/// Information returned from environment steps
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EnvInfo {
    /// Episode return (if done)
    pub episode_return: Option<f32>,
    /// Episode length (if done)
    pub episode_length: Option<f32>,
    /// Custom metrics (kept minimal for performance)
    pub extra: smallvec::SmallVec<[(&'static str, f32); 4]>,
}

impl EnvInfo {
    /// Create empty info
    pub fn new() -> Self {
        Self::default()
    }

    /// Add episode stats
    pub fn with_episode_stats(mut self, ret: f32, len: u32) -> Self {
        self.episode_return = Some(ret);
        self.episode_length = Some(len as f32);
        self
    }

    /// Add a custom metric
    pub fn with_extra(mut self, key: &'static str, value: f32) -> Self {
        self.extra.push((key, value));
        self
    }

    /// Get a value by key (including defaults)
    pub fn get(&self, key: &str) -> Option<f32> {
        match key {
            "episode_return" => self.episode_return,
            "episode_length" => self.episode_length,
            _ => self.extra.iter().find(|(k, _)| k == &key).map(|(_, v)| *v),
        }
    }
}

/// Result from a single environment step
#[derive(Clone, Debug)]
pub struct StepResult {
    /// Observation after the step
    pub observation: ArrayD<f32>,
    /// Reward received
    pub reward: f32,
    /// Whether episode terminated (goal reached, failure, etc.)
    pub terminated: bool,
    /// Whether episode truncated (time limit, etc.)
    pub truncated: bool,
    /// Additional info
    pub info: EnvInfo,
}

impl StepResult {
    /// Check if episode is done (terminated or truncated)
    pub fn done(&self) -> bool {
        self.terminated || self.truncated
    }
}

/// Core trait for environments and modifier decorators.
///
/// A decorator owns the environment it wraps and implements `Env` itself, so
/// any number of them can be stacked and the result still looks like a plain
/// environment to the driver.
///
/// # Example
///
/// ```rust,ignore
/// use envmod::prelude::*;
///
/// struct Coin;
///
/// impl Env for Coin {
///     fn observation_space(&self) -> DynSpace {
///         DynSpace::Box(BoxSpace::uniform(&[1], 0.0, 1.0))
///     }
///
///     fn action_space(&self) -> DynSpace {
///         DynSpace::Discrete(Discrete::new(2))
///     }
///
///     fn reset(&mut self, _seed: Option<u64>) -> Result<(ArrayD<f32>, EnvInfo)> {
///         Ok((ArrayD::zeros(IxDyn(&[1])), EnvInfo::new()))
///     }
///
///     fn step(&mut self, action: &ArrayD<f32>) -> Result<StepResult> {
///         // ... implement step logic
///     }
/// }
/// ```
pub trait Env: Send {
    /// Get the observation space
    fn observation_space(&self) -> DynSpace;

    /// Get the action space
    fn action_space(&self) -> DynSpace;

    /// Reset the environment to initial state
    ///
    /// # Arguments
    /// * `seed` - Optional random seed for reproducibility
    ///
    /// # Returns
    /// Tuple of (initial observation, info)
    fn reset(&mut self, seed: Option<u64>) -> Result<(ArrayD<f32>, EnvInfo)>;

    /// Take a single step in the environment
    ///
    /// # Arguments
    /// * `action` - Action to execute
    ///
    /// # Returns
    /// StepResult containing observation, reward, done flags, and info
    fn step(&mut self, action: &ArrayD<f32>) -> Result<StepResult>;

    /// Optional: Render the current state. Side effect only.
    fn render(&mut self, _config: &RenderConfig) -> Result<()> {
        Ok(())
    }

    /// Optional: Close the environment and free resources
    fn close(&mut self) {}
}

/// A type-erased environment, as produced by `EnvStack::build`.
pub type BoxedEnv = Box<dyn Env>;

impl<E: Env + ?Sized> Env for Box<E> {
    fn observation_space(&self) -> DynSpace {
        (**self).observation_space()
    }

    fn action_space(&self) -> DynSpace {
        (**self).action_space()
    }

    fn reset(&mut self, seed: Option<u64>) -> Result<(ArrayD<f32>, EnvInfo)> {
        (**self).reset(seed)
    }

    fn step(&mut self, action: &ArrayD<f32>) -> Result<StepResult> {
        (**self).step(action)
    }

    fn render(&mut self, config: &RenderConfig) -> Result<()> {
        (**self).render(config)
    }

    fn close(&mut self) {
        (**self).close()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_info_lookup() {
        let info = EnvInfo::new()
            .with_episode_stats(3.0, 3)
            .with_extra("score", 1.0);
        assert_eq!(info.get("episode_return"), Some(3.0));
        assert_eq!(info.get("episode_length"), Some(3.0));
        assert_eq!(info.get("score"), Some(1.0));
        assert_eq!(info.get("missing"), None);
    }
}
