use std::path::PathBuf;

/// Failures of the collaborators around the polyfill core.
///
/// The core itself never fails; these cover reading sources, config and
/// writing generated output.
#[derive(thiserror::Error, Debug)]
pub enum PolyfillError {
    #[error("IO error on {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Config parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid glob pattern `{pattern}`: {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error("Unreadable glob entry: {0}")]
    Glob(#[from] glob::GlobError),

    #[error("{} and {} both write {}", .owner, .origin, .destination.display())]
    DestinationConflict {
        destination: PathBuf,
        owner: String,
        origin: String,
    },

    #[error("Invalid value for `{key}`: {value}")]
    Config { key: &'static str, value: String },
}

impl PolyfillError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PolyfillError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, PolyfillError>;
