//! # Parking Reward State Machine
//!
//! Owns the behavioral phase of an episode and turns directional readings and
//! slot events into a per-tick reward.
//!
//! The phase in effect when a tick starts selects that tick's control law:
//!
//! - `Searching`: the machine cruises at a fixed speed and accrues nothing.
//! - `Navigating`: the policy drives (with a lateral-bias steering override)
//!   and the shaping terms accrue.
//!
//! Perception during the tick decides the phase of the next one. A tick that
//! sees a `FullyParked` or `Collided` event ends the episode on the spot with
//! the terminal value as its only reward.

use crate::collaborators::PolicyAgent;
use crate::config::{CruiseConfig, RewardConfig};
use crate::episode::{LateralBias, ParkingEpisodeState, Phase};
use crate::events::SlotEvent;
use crate::reward::RewardBreakdown;
use dynamics::{DriveCommand, Vec3, VehicleDynamics, WheelActuation};
use perception::DirectionalReadings;

/// Everything the machine consumes in one decision tick.
#[derive(Copy, Clone, Debug)]
pub struct TickInput<'a> {
    pub readings: &'a DirectionalReadings,
    pub events: &'a [SlotEvent],
    /// Integrator velocity in the vehicle frame
    pub local_velocity: Vec3,
}

/// Result of one [`ParkingRewardStateMachine::tick`].
#[derive(Clone, Debug, PartialEq)]
pub struct TickOutcome {
    /// Phase after the tick
    pub phase: Phase,
    pub reward: f32,
    pub breakdown: RewardBreakdown,
    pub done: bool,
    /// Wheel commands issued this tick, if the dynamics model was stepped
    pub actuation: Option<WheelActuation>,
}

/// Phase tracking and reward shaping for one vehicle.
#[derive(Clone, Debug)]
pub struct ParkingRewardStateMachine {
    reward: RewardConfig,
    cruise: CruiseConfig,
    state: ParkingEpisodeState,
}

impl ParkingRewardStateMachine {
    /// Machine in the searching phase with empty episode state.
    #[must_use]
    pub fn new(reward: RewardConfig, cruise: CruiseConfig) -> Self {
        Self {
            reward,
            cruise,
            state: ParkingEpisodeState::default(),
        }
    }

    #[must_use]
    pub fn state(&self) -> &ParkingEpisodeState {
        &self.state
    }

    /// Phase that will govern the next tick.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    /// Discard the episode state.
    pub fn reset(&mut self) {
        self.state = ParkingEpisodeState::default();
    }

    /// Advance one decision tick.
    pub fn tick(
        &mut self,
        input: TickInput<'_>,
        vehicle: &mut VehicleDynamics,
        policy: &mut dyn PolicyAgent,
    ) -> TickOutcome {
        let phase = self.state.phase;
        if phase.is_terminal() {
            return self.outcome(RewardBreakdown::default(), None);
        }

        if let Some(terminal) = self.consume_events(input.events) {
            let value = match terminal {
                Phase::Collided => self.reward.collided_reward,
                _ => self.reward.parked_reward,
            };
            tracing::debug!(phase = ?terminal, reward = value, "episode terminated");
            self.state.phase = terminal;
            return self.outcome(RewardBreakdown::terminal(value), None);
        }

        let readings = input.readings;
        if !readings.is_empty() {
            self.perceive(phase, readings);
        }

        policy.observe(vehicle.state().speed_kph);

        let command = match phase {
            Phase::Searching => self.cruise_command(vehicle),
            _ => Some(self.navigation_command(policy.request_action())),
        };
        let actuation = command.map(|command| vehicle.step(command, input.local_velocity));

        let breakdown = if phase == Phase::Navigating {
            self.shape(readings)
        } else {
            RewardBreakdown::default()
        };

        self.outcome(breakdown, actuation)
    }

    /// Apply slot events. Returns the terminal phase if one was reached.
    fn consume_events(&mut self, events: &[SlotEvent]) -> Option<Phase> {
        let mut parked = false;
        let mut collided = false;
        for event in events {
            match event {
                SlotEvent::EnteredSlot => {
                    self.state.in_target = true;
                    self.state.nearest_wall_distance_in_slot = None;
                    self.state.target_bias = None;
                }
                SlotEvent::LeftSlot => self.state.in_target = false,
                SlotEvent::FullyParked => parked = true,
                SlotEvent::Collided => collided = true,
            }
        }

        if collided {
            Some(Phase::Collided)
        } else if parked {
            Some(Phase::Parked)
        } else {
            None
        }
    }

    /// Update flags and the next phase from this tick's readings.
    fn perceive(&mut self, phase: Phase, readings: &DirectionalReadings) {
        let state = &mut self.state;
        let target_seen = readings.any_target_hit();

        if let Some(distance) = readings.latest_target_distance() {
            state.last_distance_to_target = Some(distance);
        }
        state.is_facing_spot = readings.front_hits_target();

        state.target_bias = if state.in_target {
            None
        } else if readings.target_off_right() {
            Some(LateralBias::Right)
        } else if readings.target_off_left() {
            Some(LateralBias::Left)
        } else {
            None
        };

        match phase {
            Phase::Searching if target_seen => {
                // Best-so-far survives losing the target; only a reset clears it
                if state.nearest_distance_to_target.is_none() {
                    state.nearest_distance_to_target = state.last_distance_to_target;
                }
                state.phase = Phase::Navigating;
                tracing::debug!(distance = ?state.last_distance_to_target, "target spotted");
            }
            Phase::Navigating if !target_seen => {
                state.phase = Phase::Searching;
                tracing::debug!("target lost");
            }
            _ => {}
        }
    }

    fn cruise_command(&self, vehicle: &VehicleDynamics) -> Option<DriveCommand> {
        let speed = vehicle.state().speed_kph;
        if speed < self.cruise.target_kph {
            Some(DriveCommand::new(0.0, self.cruise.throttle))
        } else if speed > self.cruise.target_kph {
            Some(DriveCommand::new(0.0, self.cruise.brake_throttle))
        } else {
            None
        }
    }

    fn navigation_command(&self, action: DriveCommand) -> DriveCommand {
        match self.state.target_bias {
            Some(bias) => DriveCommand::new(bias.steering(), action.throttle),
            None => action,
        }
    }

    /// Shaping terms of a navigating tick.
    fn shape(&mut self, readings: &DirectionalReadings) -> RewardBreakdown {
        let config = &self.reward;
        let state = &mut self.state;
        let mut breakdown = RewardBreakdown {
            step_penalty: config.step_penalty,
            ..RewardBreakdown::default()
        };

        if state.in_target && !state.has_earned_first_contact_bonus {
            state.has_earned_first_contact_bonus = true;
            breakdown.first_contact = config.first_contact_bonus;
        }

        if readings.is_empty() {
            return breakdown;
        }

        if state.in_target {
            if let Some(front) = readings.front() {
                match state.nearest_wall_distance_in_slot {
                    None => state.nearest_wall_distance_in_slot = Some(front.distance),
                    Some(nearest) if front.distance < nearest => {
                        breakdown.wall_proximity = (1.0 - front.distance) / config.wall_divisor;
                        state.nearest_wall_distance_in_slot = Some(front.distance);
                    }
                    Some(_) => {}
                }
            }

            state.is_parallel_in_slot = readings
                .center_lateral_spread()
                .is_some_and(|spread| spread < config.parallel_tolerance);
            if state.is_parallel_in_slot {
                breakdown.parallel = config.parallel_reward;
            }
        } else {
            state.is_parallel_in_slot = false;
            if let Some(latest) = readings.latest_target_distance() {
                match state.nearest_distance_to_target {
                    None => state.nearest_distance_to_target = Some(latest),
                    Some(best) if latest < best => {
                        let multiplier = if state.is_facing_spot {
                            config.facing_multiplier
                        } else {
                            config.oblique_multiplier
                        };
                        breakdown.progress = (1.0 - latest) / config.progress_divisor * multiplier;
                        state.nearest_distance_to_target = Some(latest);
                    }
                    Some(best) if latest - best > config.regression_margin => {
                        breakdown.progress = config.regression_penalty;
                        state.nearest_distance_to_target = Some(latest);
                    }
                    Some(_) => {}
                }
            }
        }

        breakdown
    }

    fn outcome(
        &mut self,
        breakdown: RewardBreakdown,
        actuation: Option<WheelActuation>,
    ) -> TickOutcome {
        let reward = breakdown.total();
        self.state.episode_return += reward;
        TickOutcome {
            phase: self.state.phase,
            reward,
            breakdown,
            done: self.state.phase.is_terminal(),
            actuation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collaborators::FixedPolicy;
    use dynamics::VehicleConfig;

    fn machine() -> ParkingRewardStateMachine {
        ParkingRewardStateMachine::new(RewardConfig::default(), CruiseConfig::default())
    }

    #[test]
    fn terminal_phase_ignores_further_ticks() {
        let mut machine = machine();
        let mut vehicle = VehicleDynamics::new(VehicleConfig::default()).unwrap();
        let mut policy = FixedPolicy::default();
        let readings = DirectionalReadings::default();

        let input = TickInput {
            readings: &readings,
            events: &[SlotEvent::Collided],
            local_velocity: Vec3::ZERO,
        };
        let first = machine.tick(input, &mut vehicle, &mut policy);
        assert!(first.done);

        let input = TickInput {
            readings: &readings,
            events: &[],
            local_velocity: Vec3::ZERO,
        };
        let second = machine.tick(input, &mut vehicle, &mut policy);
        assert!(second.done);
        assert_eq!(second.reward, 0.0);
        assert!(second.actuation.is_none());
        assert_eq!(machine.state().episode_return, -0.5);
    }

    #[test]
    fn reset_discards_state() {
        let mut machine = machine();
        machine.state.phase = Phase::Parked;
        machine.state.has_earned_first_contact_bonus = true;
        machine.reset();
        assert_eq!(machine.state(), &ParkingEpisodeState::default());
    }
}
