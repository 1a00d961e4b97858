//! Built-in environments for envmod.
//!
//! Small environments for tests and the demo driver:
//! - `CartPole` - Classic control, discrete actions
//! - `IdentityContinuous` - Continuous actions, never terminates on its own

mod cartpole;
mod identity_continuous;

pub use cartpole::CartPole;
pub use identity_continuous::IdentityContinuous;

/// Names accepted by [`make`]
pub const ENV_NAMES: &[&str] = &["cartpole", "identity"];

/// Build a built-in environment by name.
pub fn make(name: &str) -> envmod::Result<envmod::env::BoxedEnv> {
    match name {
        "cartpole" => Ok(Box::new(CartPole::new())),
        "identity" => Ok(Box::new(IdentityContinuous::default())),
        other => Err(envmod::EnvModError::InvalidConfig(format!(
            "unknown environment '{}', expected one of {:?}",
            other, ENV_NAMES
        ))),
    }
}
