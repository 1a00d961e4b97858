//! Environment traits and the hook layer.
//!
//! Provides the `Env` trait every environment and every modifier decorator
//! implements, plus `Hooked`, which splits an environment into a validating
//! public surface and the inner hook it calls.

mod hooked;
mod render;
mod traits;

pub use hooked::Hooked;
pub use render::{RenderConfig, RenderMode};
pub use traits::{BoxedEnv, Env, EnvInfo, StepResult};
