//! # envmod
//!
//! Composable modifiers for step/reset reinforcement learning environments.
//!
//! ## Overview
//!
//! envmod provides:
//! - The `Env` trait and a `Hooked` environment with a public surface over an inner hook
//! - Modifiers that attach behavior to either layer without touching the environment:
//!   rendering on every step, a per-episode timestep limit, action filtering and
//!   episode statistics
//! - `EnvStack` for composing modifiers at runtime, and `StackConfig` for describing
//!   a stack in JSON
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use envmod::prelude::*;
//! use envmod_envs::CartPole;
//!
//! let mut env = EnvStack::new(CartPole::new())
//!     .attach_render(Slot::Hook, RenderConfig::log())
//!     .attach_timestep_limit(Slot::Hook, 200)?
//!     .build();
//!
//! let (obs, _) = env.reset(Some(42))?;
//! let result = env.step(&ArrayD::from_elem(IxDyn(&[1]), 1.0))?;
//! ```

pub mod config;
pub mod env;
pub mod modifiers;
pub mod spaces;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::{ModifierConfig, StackConfig};
    pub use crate::env::{BoxedEnv, Env, EnvInfo, Hooked, RenderConfig, RenderMode, StepResult};
    pub use crate::modifiers::{
        ActionFilter, EnvStack, EpisodeStatistics, Modifier, Render, RewardFilter, Slot,
        TimestepLimit,
    };
    pub use crate::spaces::*;
    pub use crate::{EnvModError, Result};
    pub use ndarray::{ArrayD, IxDyn};
}

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Error types for the library
#[derive(Debug, thiserror::Error)]
pub enum EnvModError {
    #[error("Environment error: {0}")]
    EnvError(String),

    #[error("Shape mismatch: expected {expected:?}, got {actual:?}")]
    ShapeMismatch {
        expected: Vec<usize>,
        actual: Vec<usize>,
    },

    #[error("Invalid action: {0}")]
    InvalidAction(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = core::result::Result<T, EnvModError>;
