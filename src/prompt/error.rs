// hcs-logs - Prompt error types

use thiserror::Error;

/// Input rejected by a length, option, or custom check. Always handled inside
/// the scanner by re-prompting.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct ValidationError(pub String);

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

#[derive(Debug, Error)]
pub enum PromptError {
    #[error("Terminal IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Input closed before a value was accepted")]
    Closed,
}
