use dynamics::DynamicsError;
use perception::PerceptionError;
use thiserror::Error;

/// Errors raised while configuring or building an environment.
#[derive(Error, Debug)]
pub enum EnvError {
    #[error("collaborator `{0}` was not provided")]
    MissingCollaborator(&'static str),
    #[error("invalid config: {0}")]
    Config(String),
    #[error(transparent)]
    Dynamics(#[from] DynamicsError),
    #[error(transparent)]
    Perception(#[from] PerceptionError),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
}
