//! Render configuration passed to `Env::render`.

use crate::Result;
use serde::{Deserialize, Serialize};
use std::io::Write;

/// Where a rendered frame goes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderMode {
    /// Write the frame to stdout
    #[default]
    Human,
    /// Emit the frame as a `tracing` event
    Log,
}

/// Arguments for a render call.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderConfig {
    #[serde(default)]
    pub mode: RenderMode,
}

impl RenderConfig {
    pub fn new(mode: RenderMode) -> Self {
        Self { mode }
    }

    pub fn human() -> Self {
        Self::new(RenderMode::Human)
    }

    pub fn log() -> Self {
        Self::new(RenderMode::Log)
    }

    /// Send a text frame to the configured destination.
    ///
    /// Environments with a text rendering call this from `Env::render`.
    pub fn emit(&self, frame: &str) -> Result<()> {
        match self.mode {
            RenderMode::Human => {
                let mut out = std::io::stdout().lock();
                writeln!(out, "{}", frame)?;
            }
            RenderMode::Log => tracing::info!(target: "envmod::render", "{}", frame),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_from_json() {
        let config: RenderConfig = serde_json::from_str(r#"{"mode": "log"}"#).unwrap();
        assert_eq!(config, RenderConfig::log());

        let config: RenderConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.mode, RenderMode::Human);
    }
}
