//! CartPole classic control environment.

use envmod::env::{Env, EnvInfo, RenderConfig, StepResult};
use envmod::spaces::{BoxSpace, Discrete, DynSpace};
use envmod::{EnvModError, Result};
use ndarray::{arr1, ArrayD};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f32::consts::PI;

/// CartPole environment
///
/// A pole is attached to a cart on a frictionless track. The goal
/// is to balance the pole by applying forces to the cart.
///
/// Observation: [cart_pos, cart_vel, pole_angle, pole_vel]
/// Action: 0 = push left, 1 = push right
pub struct CartPole {
    // Physics constants
    gravity: f32,
    mass_pole: f32,
    total_mass: f32,
    length: f32, // half-pole length
    pole_mass_length: f32,
    force_mag: f32,
    tau: f32, // timestep

    // Thresholds
    theta_threshold: f32,
    x_threshold: f32,
    max_steps: u32,

    // State
    state: [f32; 4], // x, x_dot, theta, theta_dot
    steps: u32,
    rng: StdRng,
}

impl CartPole {
    /// Create a new CartPole environment
    pub fn new() -> Self {
        Self::with_max_steps(500)
    }

    /// Create with a custom internal episode limit
    pub fn with_max_steps(max_steps: u32) -> Self {
        let mass_cart = 1.0;
        let mass_pole = 0.1;
        let length = 0.5;

        Self {
            gravity: 9.8,
            mass_pole,
            total_mass: mass_cart + mass_pole,
            length,
            pole_mass_length: mass_pole * length,
            force_mag: 10.0,
            tau: 0.02,
            theta_threshold: 12.0 * 2.0 * PI / 360.0, // 12 degrees
            x_threshold: 2.4,
            max_steps,
            state: [0.0; 4],
            steps: 0,
            rng: StdRng::from_entropy(),
        }
    }

    fn is_terminal(&self) -> bool {
        let x = self.state[0];
        let theta = self.state[2];

        x.abs() > self.x_threshold || theta.abs() > self.theta_threshold
    }

    fn observation(&self) -> ArrayD<f32> {
        arr1(&self.state).into_dyn()
    }
}

impl Default for CartPole {
    fn default() -> Self {
        Self::new()
    }
}

impl Env for CartPole {
    fn observation_space(&self) -> DynSpace {
        // Observation bounds (loosely)
        DynSpace::Box(BoxSpace::uniform(&[4], -4.8, 4.8))
    }

    fn action_space(&self) -> DynSpace {
        DynSpace::Discrete(Discrete::new(2))
    }

    fn reset(&mut self, seed: Option<u64>) -> Result<(ArrayD<f32>, EnvInfo)> {
        if let Some(s) = seed {
            self.rng = StdRng::seed_from_u64(s);
        }

        // Initialize state randomly in [-0.05, 0.05]
        for v in self.state.iter_mut() {
            *v = self.rng.gen::<f32>() * 0.1 - 0.05;
        }
        self.steps = 0;

        Ok((self.observation(), EnvInfo::new()))
    }

    fn step(&mut self, action: &ArrayD<f32>) -> Result<StepResult> {
        let action_idx = match action.iter().next() {
            Some(&a) if a == 0.0 || a == 1.0 => a as usize,
            _ => {
                return Err(EnvModError::InvalidAction(format!(
                    "CartPole expects 0 or 1, got {:?}",
                    action.as_slice().unwrap_or(&[])
                )))
            }
        };

        let [x, x_dot, theta, theta_dot] = self.state;

        let force = if action_idx == 1 { self.force_mag } else { -self.force_mag };

        let cos_theta = theta.cos();
        let sin_theta = theta.sin();

        let temp =
            (force + self.pole_mass_length * theta_dot * theta_dot * sin_theta) / self.total_mass;
        let theta_acc = (self.gravity * sin_theta - cos_theta * temp)
            / (self.length * (4.0 / 3.0 - self.mass_pole * cos_theta * cos_theta / self.total_mass));
        let x_acc = temp - self.pole_mass_length * theta_acc * cos_theta / self.total_mass;

        // Euler integration
        self.state[0] = x + self.tau * x_dot;
        self.state[1] = x_dot + self.tau * x_acc;
        self.state[2] = theta + self.tau * theta_dot;
        self.state[3] = theta_dot + self.tau * theta_acc;

        self.steps += 1;

        let terminated = self.is_terminal();
        let truncated = self.steps >= self.max_steps;
        let reward = if !terminated { 1.0 } else { 0.0 };

        Ok(StepResult {
            observation: self.observation(),
            reward,
            terminated,
            truncated,
            info: EnvInfo::new(),
        })
    }

    fn render(&mut self, config: &RenderConfig) -> Result<()> {
        let [x, _, theta, _] = self.state;

        // Simple ASCII rendering
        let cart_pos = ((x + 2.4) / 4.8 * 20.0) as i32;
        let cart_pos = cart_pos.clamp(0, 20);

        let mut line = vec![' '; 21];
        line[cart_pos as usize] = if theta.abs() < 0.1 { '|' } else { '/' };

        config.emit(&format!("[{}]", line.iter().collect::<String>()))
    }
}
