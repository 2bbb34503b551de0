// hcs-logs - Store error types

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to parse credential store {path}: {source}. Run `hcs-logs config` to start a new store (the broken file is kept as .bak)")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Credential store not found at {0}. Run `hcs-logs config` first")]
    Missing(PathBuf),

    #[error("Failed to serialize credential store: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Scope not found: {0}")]
    ScopeNotFound(String),

    #[error("Scope name {0} collides with a reserved key")]
    AmbiguousKey(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
