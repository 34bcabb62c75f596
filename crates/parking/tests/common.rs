#![allow(dead_code)]

use dynamics::{
    DriveCommand, IntegratorConfig, KinematicIntegrator, Pose, Vec3, VehicleConfig,
    VehicleDynamics,
};
use parking::{
    CruiseConfig, GeometrySource, ParkingRewardStateMachine, PerceptionSource, PolicyAgent,
    RewardConfig, SlotEvent, TickInput, TickOutcome, WorldView,
};
use perception::{DirectionalReadings, RaySample, Reading, SensorConfig, SensorFrame};
use std::cell::RefCell;
use std::rc::Rc;

pub fn machine() -> ParkingRewardStateMachine {
    ParkingRewardStateMachine::new(RewardConfig::default(), CruiseConfig::default())
}

pub fn vehicle() -> VehicleDynamics {
    VehicleDynamics::new(VehicleConfig::default()).unwrap()
}

/// Readings where only the front ray sees the target, at `distance`.
pub fn front_target(distance: f32) -> DirectionalReadings {
    DirectionalReadings {
        front: vec![Reading::new(distance, true)],
        back: vec![Reading::new(2.0, false)],
        ..DirectionalReadings::default()
    }
}

/// Readings with no target anywhere.
pub fn clear() -> DirectionalReadings {
    DirectionalReadings {
        front: vec![Reading::new(2.0, false)],
        back: vec![Reading::new(2.0, false)],
        ..DirectionalReadings::default()
    }
}

/// Front target at `front` plus three rays per side, the center-lateral pair
/// at `left` and `right`.
pub fn in_slot(front: f32, left: f32, right: f32) -> DirectionalReadings {
    let side = |center: f32| {
        vec![
            Reading::new(1.0, false),
            Reading::new(1.0, false),
            Reading::new(center, false),
        ]
    };
    DirectionalReadings {
        front: vec![Reading::new(front, true)],
        back: vec![Reading::new(2.0, false)],
        left: side(left),
        right: side(right),
    }
}

/// Policy that replays one command and records what it observed.
#[derive(Clone, Default)]
pub struct RecordingPolicy {
    pub command: DriveCommand,
    pub observed: Rc<RefCell<Vec<f32>>>,
    pub requests: Rc<RefCell<usize>>,
}

impl RecordingPolicy {
    pub fn new(command: DriveCommand) -> Self {
        Self {
            command,
            ..Self::default()
        }
    }
}

impl PolicyAgent for RecordingPolicy {
    fn observe(&mut self, speed_kph: f32) {
        self.observed.borrow_mut().push(speed_kph);
    }

    fn request_action(&mut self) -> DriveCommand {
        *self.requests.borrow_mut() += 1;
        self.command
    }
}

/// Drives a machine directly, without an environment around it.
pub struct Harness {
    pub machine: ParkingRewardStateMachine,
    pub vehicle: VehicleDynamics,
    pub policy: RecordingPolicy,
    pub velocity: Vec3,
}

impl Harness {
    pub fn new() -> Self {
        Self {
            machine: machine(),
            vehicle: vehicle(),
            policy: RecordingPolicy::new(DriveCommand::new(0.0, 0.3)),
            velocity: Vec3::ZERO,
        }
    }

    pub fn tick(&mut self, readings: &DirectionalReadings, events: &[SlotEvent]) -> TickOutcome {
        let input = TickInput {
            readings,
            events,
            local_velocity: self.velocity,
        };
        self.machine.tick(input, &mut self.vehicle, &mut self.policy)
    }

    /// Spot the target at `distance`, leaving the machine navigating.
    pub fn spotted_at(distance: f32) -> Self {
        let mut harness = Self::new();
        harness.tick(&front_target(distance), &[]);
        harness
    }
}

/// Frame of `n` misses with the listed `(index, fraction)` rays hitting the
/// target.
pub fn frame(n: usize, target_hits: &[(usize, f32)]) -> SensorFrame {
    let config = SensorConfig::default();
    let mut samples = vec![RaySample::miss(); n];
    for &(i, fraction) in target_hits {
        samples[i] = RaySample::hit(fraction, config.target_tag);
    }
    SensorFrame::new(samples, &config)
}

/// Perception that always returns the same frame.
#[derive(Clone)]
pub struct StaticPerception(pub SensorFrame);

impl PerceptionSource for StaticPerception {
    fn capture(&mut self, _view: &WorldView<'_>) -> SensorFrame {
        self.0.clone()
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct GeometryFlags {
    pub inside_trigger: bool,
    pub fully_inside: bool,
    pub collided: bool,
}

/// Geometry whose answers the test can change after handing it over.
#[derive(Clone, Default)]
pub struct SharedGeometry(pub Rc<RefCell<GeometryFlags>>);

impl SharedGeometry {
    pub fn set(&self, flags: GeometryFlags) {
        *self.0.borrow_mut() = flags;
    }
}

impl GeometrySource for SharedGeometry {
    fn inside_trigger_region(&self, _view: &WorldView<'_>) -> bool {
        self.0.borrow().inside_trigger
    }

    fn fully_inside_slot(&self, _view: &WorldView<'_>) -> bool {
        self.0.borrow().fully_inside
    }

    fn collided(&self, _view: &WorldView<'_>) -> bool {
        self.0.borrow().collided
    }
}

pub fn body_at(position: Vec3) -> KinematicIntegrator {
    KinematicIntegrator::new(IntegratorConfig::default(), Pose::new(position, 0.0))
}
