//! # Parking Environment
//!
//! Wires the collaborators, the vehicle model, the slot monitor and the reward
//! state machine into one tick-driven environment.
//!
//! One decision tick runs, in order:
//!
//! 1. ray capture and aggregation,
//! 2. geometry polling into slot events,
//! 3. the state machine (policy observation, command, actuation, reward),
//! 4. `decision_period` fixed physics steps of the integrator,
//! 5. speed bookkeeping from the integrated velocity.
//!
//! All collaborators are handed over through [`ParkingEnvBuilder`]; a missing
//! one is reported when building, never during a tick.

use crate::collaborators::{FixedPolicy, GeometrySource, PerceptionSource, PolicyAgent, WorldView};
use crate::config::EnvConfig;
use crate::controller::{EpisodeController, ResetOutcome, ResetTargets};
use crate::env::Env;
use crate::episode::Phase;
use crate::error::EnvError;
use crate::events::SlotMonitor;
use crate::lot::ParkingLot;
use crate::machine::{ParkingRewardStateMachine, TickInput};
use crate::reward::RewardBreakdown;
use dynamics::{DriveCommand, MotionIntegrator, VehicleDynamics};
use perception::aggregate;

/// Result of one decision tick.
#[derive(Clone, Debug, PartialEq)]
pub struct StepResult {
    /// `[speed_kph]`
    pub observation: Vec<f32>,
    pub reward: f32,
    pub breakdown: RewardBreakdown,
    pub phase: Phase,
    /// Parked or collided
    pub done: bool,
    /// Step cap reached without a terminal phase
    pub truncated: bool,
}

impl StepResult {
    /// Terminated or truncated.
    #[must_use]
    pub fn is_over(&self) -> bool {
        self.done || self.truncated
    }
}

/// Tick-driven parking environment. Build one with [`ParkingEnv::builder`].
pub struct ParkingEnv {
    config: EnvConfig,
    vehicle: VehicleDynamics,
    machine: ParkingRewardStateMachine,
    monitor: SlotMonitor,
    controller: EpisodeController,
    perception: Box<dyn PerceptionSource>,
    geometry: Box<dyn GeometrySource>,
    body: Box<dyn MotionIntegrator>,
    policy: Box<dyn PolicyAgent>,
    steps: u32,
    truncated: bool,
}

impl ParkingEnv {
    #[must_use]
    pub fn builder(config: EnvConfig) -> ParkingEnvBuilder {
        ParkingEnvBuilder::new(config)
    }

    #[must_use]
    pub fn vehicle(&self) -> &VehicleDynamics {
        &self.vehicle
    }

    #[must_use]
    pub fn machine(&self) -> &ParkingRewardStateMachine {
        &self.machine
    }

    /// The integrator moving the vehicle body.
    #[must_use]
    pub fn body(&self) -> &dyn MotionIntegrator {
        self.body.as_ref()
    }

    /// The bound lot, or an empty one.
    #[must_use]
    pub fn lot(&self) -> &ParkingLot {
        self.controller.lot()
    }

    /// Decision ticks taken this episode.
    #[must_use]
    pub fn steps(&self) -> u32 {
        self.steps
    }

    /// Current observation, `[speed_kph]`.
    #[must_use]
    pub fn observation(&self) -> Vec<f32> {
        vec![self.vehicle.state().speed_kph]
    }

    /// Start a new episode.
    pub fn reset_episode(&mut self) -> ResetOutcome {
        let outcome = self.controller.reset(ResetTargets {
            body: self.body.as_mut(),
            vehicle: &mut self.vehicle,
            machine: &mut self.machine,
            monitor: &mut self.monitor,
        });
        if outcome == ResetOutcome::Reset {
            self.steps = 0;
            self.truncated = false;
        }
        outcome
    }

    /// One decision tick driven by the bound policy.
    pub fn tick(&mut self) -> StepResult {
        self.advance(None)
    }

    /// One decision tick with an externally supplied action.
    pub fn tick_with(&mut self, action: DriveCommand) -> StepResult {
        self.advance(Some(action))
    }

    fn advance(&mut self, action: Option<DriveCommand>) -> StepResult {
        if self.machine.phase().is_terminal() || self.truncated {
            return self.result(RewardBreakdown::default(), 0.0);
        }

        let view = WorldView {
            pose: self.body.pose(),
            lot: self.controller.lot(),
        };
        let frame = self.perception.capture(&view);
        let readings = aggregate(&frame);
        let events = self.monitor.poll(self.geometry.as_ref(), &view, &self.vehicle);

        let input = TickInput {
            readings: &readings,
            events: &events,
            local_velocity: self.body.local_velocity(),
        };
        let mut fixed;
        let policy: &mut dyn PolicyAgent = match action {
            Some(command) => {
                fixed = FixedPolicy(command);
                &mut fixed
            }
            None => self.policy.as_mut(),
        };
        let outcome = self.machine.tick(input, &mut self.vehicle, policy);

        if let Some(actuation) = &outcome.actuation {
            self.body.actuate(actuation);
        }
        if !outcome.done {
            let episode = &self.config.episode;
            for _ in 0..episode.decision_period {
                self.body.integrate(episode.physics_dt);
            }
            self.vehicle.observe_velocity(self.body.local_velocity());
        }

        self.steps += 1;
        let max_steps = self.config.episode.max_steps;
        if !outcome.done && max_steps > 0 && self.steps >= max_steps {
            tracing::debug!(steps = self.steps, "episode truncated");
            self.truncated = true;
        }

        tracing::trace!(
            step = self.steps,
            phase = ?outcome.phase,
            reward = outcome.reward,
            speed_kph = self.vehicle.state().speed_kph,
            "tick"
        );
        self.result(outcome.breakdown, outcome.reward)
    }

    fn result(&self, breakdown: RewardBreakdown, reward: f32) -> StepResult {
        let phase = self.machine.phase();
        StepResult {
            observation: self.observation(),
            reward,
            breakdown,
            phase,
            done: phase.is_terminal(),
            truncated: self.truncated,
        }
    }
}

impl Env for ParkingEnv {
    fn step(&mut self, action: &[f32]) -> (Vec<f32>, f32, bool) {
        let steering = action.first().copied().unwrap_or(0.0);
        let throttle = action.get(1).copied().unwrap_or(0.0);
        let result = self.tick_with(DriveCommand::new(steering, throttle));
        let over = result.is_over();
        (result.observation, result.reward, over)
    }

    /// Starts a new episode when the lot is bound. A skipped reset leaves the
    /// running episode untouched and returns its current observation; call
    /// [`ParkingEnv::reset_episode`] to learn which of the two happened.
    fn reset(&mut self) -> Vec<f32> {
        if self.reset_episode() == ResetOutcome::Skipped {
            tracing::warn!(steps = self.steps, "reset skipped, episode continues");
        }
        self.observation()
    }

    fn obs_size(&self) -> usize {
        1
    }

    fn action_size(&self) -> usize {
        2
    }
}

/// Collects the collaborators of a [`ParkingEnv`].
pub struct ParkingEnvBuilder {
    config: EnvConfig,
    perception: Option<Box<dyn PerceptionSource>>,
    geometry: Option<Box<dyn GeometrySource>>,
    body: Option<Box<dyn MotionIntegrator>>,
    policy: Option<Box<dyn PolicyAgent>>,
    lot: Option<ParkingLot>,
}

impl ParkingEnvBuilder {
    /// Builder with no collaborators set.
    #[must_use]
    pub fn new(config: EnvConfig) -> Self {
        Self {
            config,
            perception: None,
            geometry: None,
            body: None,
            policy: None,
            lot: None,
        }
    }

    /// The ray sensor.
    #[must_use]
    pub fn perception(mut self, source: impl PerceptionSource + 'static) -> Self {
        self.perception = Some(Box::new(source));
        self
    }

    /// The slot and collision oracle.
    #[must_use]
    pub fn geometry(mut self, source: impl GeometrySource + 'static) -> Self {
        self.geometry = Some(Box::new(source));
        self
    }

    /// The body integrator. Its pose at build time becomes the spawn pose.
    #[must_use]
    pub fn integrator(mut self, body: impl MotionIntegrator + 'static) -> Self {
        self.body = Some(Box::new(body));
        self
    }

    /// The policy driving [`ParkingEnv::tick`].
    #[must_use]
    pub fn policy(mut self, policy: impl PolicyAgent + 'static) -> Self {
        self.policy = Some(Box::new(policy));
        self
    }

    /// Slot layout reshuffled on every reset. Without one, resets are skipped.
    #[must_use]
    pub fn lot(mut self, lot: ParkingLot) -> Self {
        self.lot = Some(lot);
        self
    }

    /// # Errors
    ///
    /// Returns [`EnvError::MissingCollaborator`] naming the first collaborator
    /// that was not provided, or any config validation error.
    pub fn build(self) -> Result<ParkingEnv, EnvError> {
        let config = self.config;
        config.validate()?;

        let perception = self.perception.ok_or(EnvError::MissingCollaborator("perception"))?;
        let geometry = self.geometry.ok_or(EnvError::MissingCollaborator("geometry"))?;
        let body = self.body.ok_or(EnvError::MissingCollaborator("integrator"))?;
        let policy = self.policy.ok_or(EnvError::MissingCollaborator("policy"))?;

        let vehicle = VehicleDynamics::new(config.vehicle.clone())?;
        let machine =
            ParkingRewardStateMachine::new(config.reward.clone(), config.cruise.clone());

        let mut controller = EpisodeController::new(config.spawn.clone(), config.seed);
        controller.bind_origin(body.pose());
        if let Some(lot) = self.lot {
            controller.bind_lot(lot);
        }

        tracing::info!(
            rays = config.sensor.ray_count,
            max_steps = config.episode.max_steps,
            lot = controller.is_ready(),
            "parking environment ready"
        );

        Ok(ParkingEnv {
            config,
            vehicle,
            machine,
            monitor: SlotMonitor::new(),
            controller,
            perception,
            geometry,
            body,
            policy,
            steps: 0,
            truncated: false,
        })
    }
}
