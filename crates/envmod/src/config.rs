//! Declarative modifier stacks.
//!
//! A stack can be described in JSON and applied to an `EnvStack`:
//!
//! ```json
//! {
//!   "modifiers": [
//!     { "type": "render", "mode": "log" },
//!     { "type": "timestep_limit", "limit": 200 },
//!     { "type": "action_filter", "filter": "clip", "slot": "public" },
//!     { "type": "reward_filter", "scale": 0.01 },
//!     { "type": "episode_stats" }
//!   ]
//! }
//! ```
//!
//! `slot` is optional everywhere and defaults to the modifier's default slot.

use crate::env::{RenderConfig, RenderMode};
use crate::modifiers::{
    filters, ActionFilter, EnvStack, EpisodeStatistics, Modifier, Render, RewardFilter, Slot,
    TimestepLimit,
};
use crate::{EnvModError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Which built-in action filter to attach.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterKind {
    /// Map raw actions into the environment's action space
    #[default]
    Clip,
    /// Leave actions untouched
    Identity,
}

/// One entry of a stack description.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ModifierConfig {
    Render {
        #[serde(default)]
        mode: RenderMode,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        slot: Option<Slot>,
    },
    TimestepLimit {
        limit: usize,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        slot: Option<Slot>,
    },
    ActionFilter {
        #[serde(default)]
        filter: FilterKind,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        slot: Option<Slot>,
    },
    RewardFilter {
        scale: f32,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        slot: Option<Slot>,
    },
    EpisodeStats {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        slot: Option<Slot>,
    },
}

impl ModifierConfig {
    /// Attach this modifier to `stack`.
    ///
    /// Limits are validated here, so a bad config fails before any step runs.
    pub fn apply(&self, stack: EnvStack) -> Result<EnvStack> {
        let stack = match *self {
            ModifierConfig::Render { mode, slot } => {
                attach(stack, slot, Render::new(RenderConfig::new(mode)))
            }
            ModifierConfig::TimestepLimit { limit, slot } => {
                attach(stack, slot, TimestepLimit::new(limit)?)
            }
            ModifierConfig::ActionFilter { filter, slot } => {
                let filter = match filter {
                    FilterKind::Clip => filters::for_space(&stack.action_space()),
                    FilterKind::Identity => filters::identity(),
                };
                attach(stack, slot, ActionFilter::new(filter))
            }
            ModifierConfig::RewardFilter { scale, slot } => {
                attach(stack, slot, RewardFilter::scale(scale))
            }
            ModifierConfig::EpisodeStats { slot } => attach(stack, slot, EpisodeStatistics),
        };
        Ok(stack)
    }
}

fn attach<M: Modifier + 'static>(
    stack: EnvStack,
    slot: Option<Slot>,
    modifier: M,
) -> EnvStack {
    match slot {
        Some(slot) => stack.attach(slot, modifier),
        None => stack.push(modifier),
    }
}

/// An ordered list of modifiers to attach.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StackConfig {
    #[serde(default)]
    pub modifiers: Vec<ModifierConfig>,
}

impl StackConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&contents)
    }

    /// Check every entry without building anything.
    pub fn validate(&self) -> Result<()> {
        for modifier in &self.modifiers {
            match modifier {
                ModifierConfig::TimestepLimit { limit: 0, .. } => {
                    return Err(EnvModError::InvalidConfig(
                        "timestep_limit.limit must be at least 1".into(),
                    ));
                }
                ModifierConfig::RewardFilter { scale, .. } if !scale.is_finite() => {
                    return Err(EnvModError::InvalidConfig(format!(
                        "reward_filter.scale must be finite, got {scale}"
                    )));
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Attach every modifier to `stack` in list order.
    pub fn apply(&self, stack: EnvStack) -> Result<EnvStack> {
        self.validate()?;
        self.modifiers
            .iter()
            .try_fold(stack, |stack, modifier| modifier.apply(stack))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let config = StackConfig::from_json_str(
            r#"{
                "modifiers": [
                    { "type": "render", "mode": "log" },
                    { "type": "timestep_limit", "limit": 5, "slot": "public" },
                    { "type": "action_filter" },
                    { "type": "reward_filter", "scale": 0.5 },
                    { "type": "episode_stats" }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(
            config.modifiers,
            vec![
                ModifierConfig::Render {
                    mode: RenderMode::Log,
                    slot: None
                },
                ModifierConfig::TimestepLimit {
                    limit: 5,
                    slot: Some(Slot::Public)
                },
                ModifierConfig::ActionFilter {
                    filter: FilterKind::Clip,
                    slot: None
                },
                ModifierConfig::RewardFilter {
                    scale: 0.5,
                    slot: None
                },
                ModifierConfig::EpisodeStats { slot: None },
            ]
        );
    }

    #[test]
    fn test_zero_limit_invalid() {
        let config =
            StackConfig::from_json_str(r#"{"modifiers": [{"type": "timestep_limit", "limit": 0}]}"#)
                .unwrap();
        assert!(matches!(config.validate(), Err(EnvModError::InvalidConfig(_))));
    }

    #[test]
    fn test_reward_filter_requires_scale() {
        let err = StackConfig::from_json_str(r#"{"modifiers": [{"type": "reward_filter"}]}"#)
            .unwrap_err();
        assert!(matches!(err, EnvModError::Config(_)));

        let config = StackConfig {
            modifiers: vec![ModifierConfig::RewardFilter {
                scale: f32::NAN,
                slot: None,
            }],
        };
        assert!(matches!(config.validate(), Err(EnvModError::InvalidConfig(_))));
    }

    #[test]
    fn test_unknown_modifier_rejected() {
        let err = StackConfig::from_json_str(r#"{"modifiers": [{"type": "teleport"}]}"#).unwrap_err();
        assert!(matches!(err, EnvModError::Config(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = StackConfig::from_path("/nonexistent/envmod.json").unwrap_err();
        assert!(matches!(err, EnvModError::Io(_)));
    }
}
