//! Render-on-step modifier.

use super::{Modifier, Slot};
use crate::env::{BoxedEnv, Env, EnvInfo, RenderConfig, StepResult};
use crate::spaces::DynSpace;
use crate::Result;
use ndarray::ArrayD;

/// Renders the wrapped environment once before every step.
pub struct Rendered<E: Env> {
    env: E,
    config: RenderConfig,
}

impl<E: Env> Rendered<E> {
    pub fn new(env: E, config: RenderConfig) -> Self {
        Self { env, config }
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

impl<E: Env> Env for Rendered<E> {
    fn observation_space(&self) -> DynSpace {
        self.env.observation_space()
    }

    fn action_space(&self) -> DynSpace {
        self.env.action_space()
    }

    fn reset(&mut self, seed: Option<u64>) -> Result<(ArrayD<f32>, EnvInfo)> {
        tracing::trace!(modifier = "render", "reset");
        self.env.reset(seed)
    }

    fn step(&mut self, action: &ArrayD<f32>) -> Result<StepResult> {
        tracing::trace!(modifier = "render", mode = ?self.config.mode, "step");
        self.env.render(&self.config)?;
        self.env.step(action)
    }

    fn render(&mut self, config: &RenderConfig) -> Result<()> {
        self.env.render(config)
    }

    fn close(&mut self) {
        self.env.close()
    }
}

/// Attaches [`Rendered`]. Defaults to the hook slot.
#[derive(Clone, Debug, Default)]
pub struct Render {
    config: RenderConfig,
}

impl Render {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }
}

impl Modifier for Render {
    fn name(&self) -> &'static str {
        "render"
    }

    fn default_slot(&self) -> Slot {
        Slot::Hook
    }

    fn wrap(self: Box<Self>, env: BoxedEnv) -> BoxedEnv {
        Box::new(Rendered::new(env, self.config))
    }
}
