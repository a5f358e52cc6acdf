use std::path::PathBuf;
use thiserror::Error;

/// Failure while loading track, config or input script files
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid track: {0}")]
    InvalidTrack(String),
}

/// Reads and deserializes a JSON file, tagging errors with the path
pub(crate) fn read_json<T: serde::de::DeserializeOwned>(
    path: impl Into<PathBuf>,
) -> Result<T, LoadError> {
    let path = path.into();
    let contents = std::fs::read_to_string(&path).map_err(|source| LoadError::Io {
        path: path.clone(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| LoadError::Json { path, source })
}
