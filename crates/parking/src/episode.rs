use serde::{Deserialize, Serialize};

/// Behavioral phase of an episode.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Cruising under self-control until a ray sees the target.
    #[default]
    Searching,
    /// The policy drives toward the target.
    Navigating,
    Parked,
    Collided,
}

impl Phase {
    /// Parked or collided.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Parked | Self::Collided)
    }
}

/// Side on which the target was spotted while the front ray misses it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LateralBias {
    Left,
    Right,
}

impl LateralBias {
    /// Full-lock steering toward this side.
    #[must_use]
    pub const fn steering(self) -> f32 {
        match self {
            Self::Left => -1.0,
            Self::Right => 1.0,
        }
    }
}

/// Per-episode bookkeeping of the reward state machine.
///
/// Replaced wholesale at every episode reset.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ParkingEpisodeState {
    pub phase: Phase,
    /// Inside the slot trigger region, as reported by slot events
    pub in_target: bool,
    /// Best-so-far distance to the target
    pub nearest_distance_to_target: Option<f32>,
    /// Most recent distance at which a ray saw the target
    pub last_distance_to_target: Option<f32>,
    /// Closest front-wall distance since the vehicle last entered the slot
    pub nearest_wall_distance_in_slot: Option<f32>,
    pub is_facing_spot: bool,
    pub is_parallel_in_slot: bool,
    /// At most one side can be biased at a time
    pub target_bias: Option<LateralBias>,
    pub has_earned_first_contact_bonus: bool,
    /// Sum of rewards so far
    pub episode_return: f32,
}

impl ParkingEpisodeState {
    #[must_use]
    pub fn target_bias_left(&self) -> bool {
        self.target_bias == Some(LateralBias::Left)
    }

    #[must_use]
    pub fn target_bias_right(&self) -> bool {
        self.target_bias == Some(LateralBias::Right)
    }
}
