use std::path::PathBuf;
use thiserror::Error;

/// Failures outside the robot itself: reading input, writing reports, loading config.
///
/// The robot never produces errors; bad commands are dropped.
#[derive(Debug, Error)]
pub enum SimulatorError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("cannot read config `{path}`: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config `{path}`: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
