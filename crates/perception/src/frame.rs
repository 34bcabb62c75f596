//! Raw ray-sensor frames.
//!
//! A frame is one tick's worth of radial ray samples, in the order the sensor
//! casts them: index 0 points forward, the last index points backward, and
//! the rays in between alternate right/left by index parity.

use crate::error::PerceptionError;
use serde::{Deserialize, Serialize};

/// Tag value meaning the ray hit nothing within range.
pub const NO_HIT: i32 = -1;

/// Sensor layout shared by the provider and the aggregator.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SensorConfig {
    /// Number of rays per frame
    pub ray_count: usize,
    /// Distance represented by a hit fraction of 1.0
    pub max_range: f32,
    /// Tag index reserved for the parking-slot marker
    pub target_tag: i32,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            ray_count: 11,
            max_range: 2.0,
            target_tag: 0,
        }
    }
}

impl SensorConfig {
    /// # Errors
    ///
    /// Returns [`PerceptionError`] if fewer than 3 rays are configured or the
    /// range is not a positive finite number.
    pub fn validate(&self) -> Result<(), PerceptionError> {
        if self.ray_count < 3 {
            return Err(PerceptionError::TooFewRays(self.ray_count));
        }
        if !self.max_range.is_finite() || self.max_range <= 0.0 {
            return Err(PerceptionError::InvalidRange(self.max_range));
        }
        Ok(())
    }
}

/// A single ray result as produced by the sensor.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable, Serialize, Deserialize)]
pub struct RaySample {
    /// Hit distance as a fraction of max range; 1.0 means no hit
    pub fraction: f32,
    /// Classification tag of the hit object, [`NO_HIT`] if nothing was hit
    pub tag: i32,
}

impl RaySample {
    /// Ray that hit something tagged `tag` at `fraction` of full range.
    #[must_use]
    pub const fn hit(fraction: f32, tag: i32) -> Self {
        Self { fraction, tag }
    }

    /// Ray that hit nothing.
    #[must_use]
    pub const fn miss() -> Self {
        Self {
            fraction: 1.0,
            tag: NO_HIT,
        }
    }
}

/// One tick of ray samples. Immutable once built.
#[derive(Clone, Debug, PartialEq)]
pub struct SensorFrame {
    samples: Vec<RaySample>,
    max_range: f32,
    target_tag: i32,
}

impl SensorFrame {
    /// Frame over `samples`, interpreted with `config`.
    #[must_use]
    pub fn new(samples: Vec<RaySample>, config: &SensorConfig) -> Self {
        Self {
            samples,
            max_range: config.max_range,
            target_tag: config.target_tag,
        }
    }

    /// Build a frame from a packed buffer of [`RaySample`]s.
    ///
    /// # Errors
    ///
    /// Returns [`PerceptionError::MalformedBuffer`] if the byte length is not
    /// a multiple of the sample size or the buffer is misaligned.
    pub fn from_bytes(bytes: &[u8], config: &SensorConfig) -> Result<Self, PerceptionError> {
        let samples: &[RaySample] = bytemuck::try_cast_slice(bytes)
            .map_err(|e| PerceptionError::MalformedBuffer(format!("{e:?}")))?;
        Ok(Self::new(samples.to_vec(), config))
    }

    /// Samples in sensor order.
    #[must_use]
    pub fn samples(&self) -> &[RaySample] {
        &self.samples
    }

    /// Number of rays in the frame.
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Distance a fraction of `1.0` stands for.
    #[must_use]
    pub fn max_range(&self) -> f32 {
        self.max_range
    }

    /// Whether `sample` hit the parking-slot marker.
    #[must_use]
    pub fn is_target_hit(&self, sample: &RaySample) -> bool {
        sample.tag == self.target_tag
    }

    /// Hit distance of `sample` in sensor units.
    #[must_use]
    pub fn distance(&self, sample: &RaySample) -> f32 {
        sample.fraction * self.max_range
    }
}
