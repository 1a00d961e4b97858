//! Modifiers and the stack that composes them.
//!
//! A modifier is a small recipe that, when attached, wraps the current
//! implementation of one slot of an environment in a decorator. Every
//! decorator owns what it wraps, so modifiers attached to the same slot nest:
//! the last one attached runs outermost.
//!
//! | modifier | decorator | default slot |
//! |---|---|---|
//! | [`Render`] | [`Rendered`] | [`Slot::Hook`] |
//! | [`TimestepLimit`] | [`TimestepLimited`] | [`Slot::Hook`] |
//! | [`ActionFilter`] | [`ActionFiltered`] | [`Slot::Public`] |
//! | [`RewardFilter`] | [`RewardFiltered`] | [`Slot::Hook`] |
//! | [`EpisodeStatistics`] | [`EpisodeStats`] | [`Slot::Public`] |

mod action_filter;
mod episode_stats;
pub mod filters;
mod render;
mod reward_filter;
mod stack;
mod timestep_limit;

pub use action_filter::{ActionFilter, ActionFiltered};
pub use episode_stats::{EpisodeStatistics, EpisodeStats};
pub use render::{Render, Rendered};
pub use reward_filter::{RewardFilter, RewardFiltered};
pub use stack::EnvStack;
pub use timestep_limit::{TimestepLimit, TimestepLimited};

use crate::env::BoxedEnv;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The layer of a `Hooked` environment a modifier wraps.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Slot {
    /// The inner hook, called after the public surface has validated the action
    Hook,
    /// The public surface the driver calls
    Public,
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slot::Hook => f.write_str("hook"),
            Slot::Public => f.write_str("public"),
        }
    }
}

/// A unit of behavior that can be attached to an environment slot.
pub trait Modifier: Send {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Slot used by `EnvStack::push`
    fn default_slot(&self) -> Slot;

    /// Wrap `env` in this modifier's decorator.
    fn wrap(self: Box<Self>, env: BoxedEnv) -> BoxedEnv;
}
