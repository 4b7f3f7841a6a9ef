use thiserror::Error;

use crate::GenState;

/// Rejected configuration, caught before generation touches memory.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("lattice size on {axis} must be at least 1 (got {value})")]
    InvalidSize { axis: &'static str, value: i32 },
    #[error("lattice spacing on {axis} must be positive (got {value})")]
    InvalidSpacing { axis: &'static str, value: f32 },
    #[error("noise scale must be positive (got {0})")]
    InvalidScale(f32),
    #[error("failed to read config {path}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {path}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Error)]
pub enum PipelineError {
    /// A stage operation was invoked out of order.
    #[error("{op} requires {expected}, but the pipeline is in {actual:?}")]
    InvalidState {
        op: &'static str,
        expected: &'static str,
        actual: GenState,
    },
    #[error(transparent)]
    Config(#[from] ConfigError),
}
