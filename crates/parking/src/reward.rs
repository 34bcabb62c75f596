use serde::{Deserialize, Serialize};

/// Itemized reward of one tick.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RewardBreakdown {
    /// Closing in on the slot's front wall while inside the slot
    pub wall_proximity: f32,
    /// Centered between the slot's side walls
    pub parallel: f32,
    /// Closing in on the target from outside the slot (or regressing)
    pub progress: f32,
    /// First entry into the slot this episode
    pub first_contact: f32,
    pub step_penalty: f32,
    /// Parked or collided
    pub terminal: f32,
}

impl RewardBreakdown {
    /// Breakdown of a terminal tick: `value` and nothing else.
    #[must_use]
    pub fn terminal(value: f32) -> Self {
        Self {
            terminal: value,
            ..Self::default()
        }
    }

    /// Sum of all terms.
    #[must_use]
    pub fn total(&self) -> f32 {
        self.wall_proximity
            + self.parallel
            + self.progress
            + self.first_contact
            + self.step_penalty
            + self.terminal
    }
}
