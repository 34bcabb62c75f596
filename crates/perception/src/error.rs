use thiserror::Error;

/// Errors in sensor configuration or raw frame data.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PerceptionError {
    #[error("sensor needs at least 3 rays, got {0}")]
    TooFewRays(usize),
    #[error("sensor range must be positive, got {0}")]
    InvalidRange(f32),
    #[error("malformed ray buffer: {0}")]
    MalformedBuffer(String),
}
