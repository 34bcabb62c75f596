use thiserror::Error;

/// Errors raised when building a vehicle model.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DynamicsError {
    #[error("vehicle needs at least one {0} wheel")]
    NoWheels(&'static str),
    #[error("invalid vehicle parameter `{name}`: {value}")]
    InvalidParameter { name: &'static str, value: f32 },
}
