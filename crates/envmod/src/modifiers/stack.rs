//! Runtime composition of modifiers.

use super::{ActionFilter, Modifier, Render, RewardFilter, Slot, TimestepLimit};
use crate::env::{BoxedEnv, Env, Hooked, RenderConfig};
use crate::spaces::DynSpace;
use crate::Result;
use ndarray::ArrayD;

/// Builds a composed environment from a raw one and a sequence of modifiers.
///
/// Hook-slot modifiers wrap the hook chain as soon as they are attached.
/// Public-slot modifiers are kept in attach order and wrapped around the
/// public surface by [`EnvStack::build`]. In both slots the modifier attached
/// last runs outermost, and every public-slot modifier runs outside every
/// hook-slot modifier.
///
/// # Example
///
/// ```rust,ignore
/// let mut env = EnvStack::new(CartPole::new())
///     .attach_render(Slot::Hook, RenderConfig::human())
///     .attach_timestep_limit(Slot::Hook, 200)?
///     .attach_action_filter(Slot::Public, filters::nearest_discrete(2))
///     .build();
/// ```
pub struct EnvStack {
    hook: BoxedEnv,
    public: Vec<Box<dyn Modifier>>,
}

impl EnvStack {
    /// Start a stack whose hook is `env`.
    pub fn new<E: Env + 'static>(env: E) -> Self {
        Self {
            hook: Box::new(env),
            public: Vec::new(),
        }
    }

    /// Action space of the environment being composed
    pub fn action_space(&self) -> DynSpace {
        self.hook.action_space()
    }

    /// Attach `modifier` on `slot`.
    pub fn attach<M: Modifier + 'static>(self, slot: Slot, modifier: M) -> Self {
        self.attach_boxed(slot, Box::new(modifier))
    }

    /// Attach a type-erased modifier on `slot`.
    pub fn attach_boxed(mut self, slot: Slot, modifier: Box<dyn Modifier>) -> Self {
        tracing::debug!(modifier = modifier.name(), %slot, "Attaching modifier");
        match slot {
            Slot::Hook => self.hook = modifier.wrap(self.hook),
            Slot::Public => self.public.push(modifier),
        }
        self
    }

    /// Attach `modifier` on its default slot.
    pub fn push<M: Modifier + 'static>(self, modifier: M) -> Self {
        let slot = modifier.default_slot();
        self.attach(slot, modifier)
    }

    /// Render with `config` before every step.
    pub fn attach_render(self, slot: Slot, config: RenderConfig) -> Self {
        self.attach(slot, Render::new(config))
    }

    /// End every episode on its `limit`-th step. Fails if `limit` is zero.
    pub fn attach_timestep_limit(self, slot: Slot, limit: usize) -> Result<Self> {
        Ok(self.attach(slot, TimestepLimit::new(limit)?))
    }

    /// Pass every action through `filter` before it is stepped.
    pub fn attach_action_filter<F>(self, slot: Slot, filter: F) -> Self
    where
        F: FnMut(&ArrayD<f32>) -> ArrayD<f32> + Send + 'static,
    {
        self.attach(slot, ActionFilter::new(filter))
    }

    /// Pass every reward through `filter` before it reaches the caller.
    pub fn attach_reward_filter<F>(self, slot: Slot, filter: F) -> Self
    where
        F: FnMut(f32) -> f32 + Send + 'static,
    {
        self.attach(slot, RewardFilter::new(filter))
    }

    /// Number of modifiers waiting to be wrapped around the public surface
    pub fn public_len(&self) -> usize {
        self.public.len()
    }

    /// Seal the hook chain under a public surface and apply public modifiers.
    pub fn build(self) -> BoxedEnv {
        tracing::debug!(public = self.public.len(), "Building modifier stack");
        let mut env: BoxedEnv = Box::new(Hooked::new(self.hook));
        for modifier in self.public {
            tracing::trace!(modifier = modifier.name(), "Wrapping public surface");
            env = modifier.wrap(env);
        }
        env
    }
}
