//! Baseline policies for driving the environment without a learner.

use clap::ValueEnum;
use dynamics::DriveCommand;
use parking::PolicyAgent;
use serde::{Deserialize, Serialize};

/// Uniform random steering and throttle in `[-1, 1]`.
#[derive(Debug)]
pub struct RandomPolicy {
    rng: fastrand::Rng,
}

impl RandomPolicy {
    /// Seeded from `seed`, or from entropy when absent.
    #[must_use]
    pub fn new(seed: Option<u64>) -> Self {
        Self {
            rng: seed.map_or_else(fastrand::Rng::new, fastrand::Rng::with_seed),
        }
    }
}

impl PolicyAgent for RandomPolicy {
    fn observe(&mut self, _speed_kph: f32) {}

    fn request_action(&mut self) -> DriveCommand {
        let steering = self.rng.f32().mul_add(2.0, -1.0);
        let throttle = self.rng.f32().mul_add(2.0, -1.0);
        DriveCommand::new(steering, throttle)
    }
}

/// Straight ahead with gentle throttle, backing off above a speed limit.
#[derive(Clone, Debug)]
pub struct CruisePolicy {
    pub throttle: f32,
    pub limit_kph: f32,
    speed_kph: f32,
}

impl CruisePolicy {
    /// Hold `throttle` until the observed speed reaches `limit_kph`.
    #[must_use]
    pub fn new(throttle: f32, limit_kph: f32) -> Self {
        Self {
            throttle,
            limit_kph,
            speed_kph: 0.0,
        }
    }
}

impl Default for CruisePolicy {
    fn default() -> Self {
        Self::new(0.3, 4.0)
    }
}

impl PolicyAgent for CruisePolicy {
    fn observe(&mut self, speed_kph: f32) {
        self.speed_kph = speed_kph;
    }

    fn request_action(&mut self) -> DriveCommand {
        let throttle = if self.speed_kph < self.limit_kph {
            self.throttle
        } else {
            0.0
        };
        DriveCommand::new(0.0, throttle)
    }
}

/// Never touches the controls.
#[derive(Copy, Clone, Debug, Default)]
pub struct IdlePolicy;

impl PolicyAgent for IdlePolicy {
    fn observe(&mut self, _speed_kph: f32) {}

    fn request_action(&mut self) -> DriveCommand {
        DriveCommand::IDLE
    }
}

/// Baseline policy selectable from the command line.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolicyKind {
    Random,
    #[default]
    Cruise,
    Idle,
}

impl PolicyKind {
    /// Boxed policy ready to hand to the environment builder.
    #[must_use]
    pub fn build(self, seed: Option<u64>) -> Box<dyn PolicyAgent> {
        match self {
            Self::Random => Box::new(RandomPolicy::new(seed)),
            Self::Cruise => Box::new(CruisePolicy::default()),
            Self::Idle => Box::new(IdlePolicy),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_actions_stay_in_range_and_repeat_per_seed() {
        let mut a = RandomPolicy::new(Some(9));
        let mut b = RandomPolicy::new(Some(9));
        for _ in 0..100 {
            let action = a.request_action();
            assert!((-1.0..=1.0).contains(&action.steering));
            assert!((-1.0..=1.0).contains(&action.throttle));
            assert_eq!(action, b.request_action());
        }
    }

    #[test]
    fn cruise_backs_off_at_limit() {
        let mut policy = CruisePolicy::new(0.5, 4.0);
        policy.observe(2.0);
        assert_eq!(policy.request_action().throttle, 0.5);
        policy.observe(4.0);
        assert_eq!(policy.request_action().throttle, 0.0);
    }
}
