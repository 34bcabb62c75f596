//! # Episode Loop
//!
//! Wires the reference lot into the environment and plays episodes until each
//! one parks, collides, or hits the step cap.

use crate::Args;
use anyhow::{Context, Result};
use autopark::scene::{ParkingScene, SceneLayout};
use autopark::summary::{EpisodeSummary, RunSummary};
use dynamics::KinematicIntegrator;
use parking::{EnvConfig, ParkingEnv, ResetOutcome};

/// Play `args.episodes` episodes and collect their results.
///
/// # Errors
///
/// Returns an error if the config cannot be loaded or the environment cannot
/// be built.
pub fn run(args: &Args) -> Result<RunSummary> {
    let mut config = match &args.config {
        Some(path) => EnvConfig::from_path(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => EnvConfig::default(),
    };
    if let Some(max_steps) = args.max_steps {
        config.episode.max_steps = max_steps;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }

    let layout = SceneLayout::default();
    let scene = ParkingScene::new(layout.clone(), config.sensor.clone());
    let body = KinematicIntegrator::new(config.integrator.clone(), layout.spawn);

    let mut env = ParkingEnv::builder(config.clone())
        .perception(scene.clone())
        .geometry(scene)
        .integrator(body)
        .policy(args.policy.build(config.seed))
        .lot(layout.lot())
        .build()
        .context("building parking environment")?;

    tracing::info!(
        episodes = args.episodes,
        policy = ?args.policy,
        "starting run"
    );

    let mut summary = RunSummary::default();
    for episode in 0..args.episodes {
        if env.reset_episode() == ResetOutcome::Skipped {
            anyhow::bail!("environment reset was skipped");
        }

        let result = loop {
            let result = env.tick();
            if result.is_over() {
                break result;
            }
        };

        let record = EpisodeSummary {
            episode,
            steps: env.steps(),
            episode_return: env.machine().state().episode_return,
            phase: result.phase,
            truncated: result.truncated,
        };
        tracing::info!(
            episode,
            steps = record.steps,
            episode_return = record.episode_return,
            phase = ?record.phase,
            truncated = record.truncated,
            "episode finished"
        );
        summary.record(record);
    }

    tracing::info!(
        parked = summary.parked,
        collided = summary.collided,
        truncated = summary.truncated,
        mean_return = summary.mean_return,
        "run complete"
    );
    Ok(summary)
}
