//! # Perception Aggregation
//!
//! Splits a [`SensorFrame`] into front, back, left and right channels and
//! derives the scalar signals the reward state machine works with.
//!
//! Layout: sample 0 is the front ray, sample `N-1` the back ray. Samples
//! `1..N-1` alternate by index parity, even indices to the left channel and
//! odd indices to the right channel, each keeping frame order.

use crate::frame::SensorFrame;

/// Position of the center-lateral ray within the left and right channels.
pub const CENTER_LATERAL_INDEX: usize = 2;

/// Center-lateral distances are compared at twice their scale.
const CENTER_LATERAL_SCALE: f32 = 2.0;

/// One ray after aggregation.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Reading {
    /// Hit distance in sensor units (`fraction * max_range`)
    pub distance: f32,
    pub is_target_hit: bool,
}

impl Reading {
    #[must_use]
    pub const fn new(distance: f32, is_target_hit: bool) -> Self {
        Self {
            distance,
            is_target_hit,
        }
    }
}

/// Directionally partitioned readings for one tick.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DirectionalReadings {
    pub left: Vec<Reading>,
    pub right: Vec<Reading>,
    pub front: Vec<Reading>,
    pub back: Vec<Reading>,
}

/// Partition a frame into directional channels.
///
/// Frames with fewer than 3 samples have no usable lateral channel and yield
/// empty readings.
#[must_use]
pub fn aggregate(frame: &SensorFrame) -> DirectionalReadings {
    let n = frame.len();
    if n < 3 {
        tracing::warn!(rays = n, "degenerate sensor frame");
        return DirectionalReadings::default();
    }

    let samples = frame.samples();
    let reading = |i: usize| {
        let s = &samples[i];
        Reading::new(frame.distance(s), frame.is_target_hit(s))
    };

    let mut readings = DirectionalReadings {
        front: vec![reading(0)],
        back: vec![reading(n - 1)],
        ..DirectionalReadings::default()
    };
    for i in 1..n - 1 {
        if i % 2 == 0 {
            readings.left.push(reading(i));
        } else {
            readings.right.push(reading(i));
        }
    }
    readings
}

impl DirectionalReadings {
    /// True when the frame carried no usable information.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.front.is_empty()
            && self.back.is_empty()
            && self.left.is_empty()
            && self.right.is_empty()
    }

    /// The straight-ahead reading.
    #[must_use]
    pub fn front(&self) -> Option<&Reading> {
        self.front.first()
    }

    /// The straight-back reading.
    #[must_use]
    pub fn back(&self) -> Option<&Reading> {
        self.back.first()
    }

    /// Channels in scan order: left, right, front, back.
    fn scan(&self) -> impl Iterator<Item = &Reading> {
        self.left.iter().chain(&self.right).chain(&self.front).chain(&self.back)
    }

    /// Whether any direction sees the target.
    #[must_use]
    pub fn any_target_hit(&self) -> bool {
        self.scan().any(|r| r.is_target_hit)
    }

    /// Distance of the last target hit in scan order.
    #[must_use]
    pub fn latest_target_distance(&self) -> Option<f32> {
        self.scan().filter(|r| r.is_target_hit).last().map(|r| r.distance)
    }

    /// Whether the front ray sees the target.
    #[must_use]
    pub fn front_hits_target(&self) -> bool {
        self.front().is_some_and(|r| r.is_target_hit)
    }

    /// Target seen by the first right-side ray while the front ray misses it.
    #[must_use]
    pub fn target_off_right(&self) -> bool {
        self.right.first().is_some_and(|r| r.is_target_hit) && !self.front_hits_target()
    }

    /// Target seen by the first left-side ray while the front ray misses it.
    #[must_use]
    pub fn target_off_left(&self) -> bool {
        self.left.first().is_some_and(|r| r.is_target_hit) && !self.front_hits_target()
    }

    /// Absolute difference between the scaled center-lateral distances.
    ///
    /// `None` when either lateral channel is too short.
    #[must_use]
    pub fn center_lateral_spread(&self) -> Option<f32> {
        let left = self.left.get(CENTER_LATERAL_INDEX)?.distance * CENTER_LATERAL_SCALE;
        let right = self.right.get(CENTER_LATERAL_INDEX)?.distance * CENTER_LATERAL_SCALE;
        Some((left - right).abs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::{RaySample, SensorConfig};

    #[test]
    fn three_rays_fill_right_only() {
        let frame = SensorFrame::new(vec![RaySample::miss(); 3], &SensorConfig::default());
        let r = aggregate(&frame);
        assert_eq!(r.front.len(), 1);
        assert_eq!(r.back.len(), 1);
        assert_eq!(r.right.len(), 1);
        assert!(r.left.is_empty());
    }

    #[test]
    fn distances_are_scaled_by_range() {
        let config = SensorConfig {
            max_range: 10.0,
            ..SensorConfig::default()
        };
        let frame = SensorFrame::new(
            vec![RaySample::hit(0.3, 5), RaySample::miss(), RaySample::miss()],
            &config,
        );
        let r = aggregate(&frame);
        assert!((r.front[0].distance - 3.0).abs() < 1e-6);
        assert!((r.back[0].distance - 10.0).abs() < 1e-6);
    }
}
