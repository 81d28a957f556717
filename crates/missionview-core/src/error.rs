use std::path::PathBuf;

/// Errors raised while loading scene inputs or configuration.
///
/// Building a scene never fails; only the JSON/file boundary does.
#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid scene config: {0}")]
    InvalidConfig(String),
}

/// Read a UTF-8 file, tagging I/O failures with the offending path.
pub(crate) fn read_to_string(path: &std::path::Path) -> Result<String, SceneError> {
    std::fs::read_to_string(path).map_err(|source| SceneError::Io {
        path: path.to_path_buf(),
        source,
    })
}
