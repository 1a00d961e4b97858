//! envmod CLI
//!
//! Demo driver that composes modifiers onto a built-in environment and runs it.

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use envmod::modifiers::filters;
use envmod::prelude::*;

#[derive(Parser)]
#[command(name = "envmod")]
#[command(version, about = "envmod - composable environment modifiers", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List available environments
    List,

    /// Run an environment under a modifier stack
    Demo {
        /// Environment name
        #[arg(default_value = "cartpole")]
        env: String,

        /// Number of steps
        #[arg(long, default_value = "100")]
        steps: usize,

        /// End every episode after this many steps
        #[arg(long)]
        limit: Option<usize>,

        /// Render before every step
        #[arg(long, value_enum)]
        render: Option<RenderArg>,

        /// Multiply every reward by this factor
        #[arg(long)]
        reward_scale: Option<f32>,

        /// Send raw policy actions without mapping them into the action space
        #[arg(long)]
        no_filter: bool,

        /// JSON modifier stack, applied before the flag modifiers
        #[arg(long)]
        config: Option<PathBuf>,

        /// Seed for the environment and the policy
        #[arg(long, default_value = "0")]
        seed: u64,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum RenderArg {
    Human,
    Log,
}

impl From<RenderArg> for RenderMode {
    fn from(arg: RenderArg) -> Self {
        match arg {
            RenderArg::Human => RenderMode::Human,
            RenderArg::Log => RenderMode::Log,
        }
    }
}

struct DemoOptions {
    env: String,
    steps: usize,
    limit: Option<usize>,
    render: Option<RenderArg>,
    reward_scale: Option<f32>,
    filter: bool,
    config: Option<PathBuf>,
    seed: u64,
}

fn main() -> Result<()> {
    // Initialize logging; stdout is left to frames and the summary
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::List => list_envs(),
        Commands::Demo {
            env,
            steps,
            limit,
            render,
            reward_scale,
            no_filter,
            config,
            seed,
        } => demo(DemoOptions {
            env,
            steps,
            limit,
            render,
            reward_scale,
            filter: !no_filter,
            config,
            seed,
        })?,
    }

    Ok(())
}

fn list_envs() {
    println!("Available environments:");
    for name in envmod_envs::ENV_NAMES {
        println!("  {}", name);
    }
}

fn build_env(opts: &DemoOptions) -> Result<BoxedEnv> {
    let mut stack = EnvStack::new(envmod_envs::make(&opts.env)?);

    if let Some(path) = &opts.config {
        let config = StackConfig::from_path(path)?;
        tracing::info!(path = %path.display(), modifiers = config.modifiers.len(), "Loaded modifier config");
        stack = config.apply(stack)?;
    }
    if let Some(mode) = opts.render {
        stack = stack.attach_render(Slot::Hook, RenderConfig::new(mode.into()));
    }
    if let Some(limit) = opts.limit {
        stack = stack.attach_timestep_limit(Slot::Hook, limit)?;
    }
    if let Some(scale) = opts.reward_scale {
        stack = stack.attach_reward_filter(Slot::Hook, move |reward: f32| reward * scale);
    }
    if opts.filter {
        let filter = filters::for_space(&stack.action_space());
        stack = stack.attach_action_filter(Slot::Public, filter);
    }

    Ok(stack.push(EpisodeStatistics).build())
}

fn demo(opts: DemoOptions) -> Result<()> {
    tracing::info!(
        version = envmod::VERSION,
        env = %opts.env,
        steps = opts.steps,
        limit = ?opts.limit,
        "Running demo"
    );

    let mut env = build_env(&opts)?;
    let action_space = env.action_space();
    let mut rng = StdRng::seed_from_u64(opts.seed);

    env.reset(Some(opts.seed))?;
    let mut episodes = 0usize;
    let mut total_return = 0.0f32;

    for step in 0..opts.steps {
        // Overshoot the action space so the filter has something to do
        let action = action_space.sample(&mut rng) * 1.5;
        let result = env.step(&action)?;

        if result.done() {
            episodes += 1;
            total_return += result.info.get("episode_return").unwrap_or(0.0);
            tracing::info!(
                step,
                length = ?result.info.get("episode_length"),
                "Episode ended, resetting"
            );
            env.reset(None)?;
        }
    }
    env.close();

    println!("Episodes completed: {}", episodes);
    if episodes > 0 {
        println!("Mean episode return: {:.2}", total_return / episodes as f32);
    }

    Ok(())
}
