use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading a [`crate::NavigationConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read navigation config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid navigation config: {0}")]
    Parse(#[from] toml::de::Error),
}
