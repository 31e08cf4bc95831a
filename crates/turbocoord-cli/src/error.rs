use std::path::PathBuf;
use thiserror::Error;
use turbocoord::engine::error::EngineError;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to parse file '{path}': {source}", path = path.display())]
    FileParsing {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{failed} of {attempted} conformer(s) could not be written")]
    PartialWrite { failed: usize, attempted: usize },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
