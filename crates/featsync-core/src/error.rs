use thiserror::Error;

#[derive(Debug, Error)]
pub enum FeatsyncError {
    #[error("feature not found: {0}.feature")]
    FeatureNotFound(String),

    #[error("feature already exists: {0}.feature")]
    FeatureExists(String),

    #[error("invalid feature identifier '{0}': must be a bare file name")]
    InvalidIdentifier(String),

    #[error("test runner not found: {0}")]
    RunnerNotFound(String),

    #[error("test runner command is empty")]
    RunnerCommandEmpty,

    #[error("failed to spawn test runner: {0}")]
    RunnerSpawnFailed(String),

    #[error("test runner failed without producing output: {0}")]
    RunnerFailed(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, FeatsyncError>;
