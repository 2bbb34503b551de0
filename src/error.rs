// hcs-logs - Top-level error types
//
// Aggregates errors from every module into a single enum for the
// application boundary and maps them to process exit codes.

use thiserror::Error;

use crate::destination::DestinationError;
use crate::prompt::PromptError;
use crate::resolve::{ProvisionError, ResolveError};
use crate::store::StoreError;

/// Exit code for configuration problems (store unreadable, scope missing).
pub const EXIT_CONFIG: i32 = 3;

/// Exit code for provisioning and destination failures.
pub const EXIT_PROVISION: i32 = 5;

/// Top-level error type for all hcs-logs operations.
#[derive(Debug, Error)]
pub enum HcsError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Prompt error: {0}")]
    Prompt(#[from] PromptError),

    #[error("{0}")]
    Resolve(#[from] ResolveError),

    #[error("Provisioning client error: {0}")]
    Provision(#[from] ProvisionError),

    #[error("{0}")]
    Destination(#[from] DestinationError),

    #[error("Default/global configure {0} not found; run `hcs-logs config` first")]
    DefaultScopeMissing(String),
}

impl HcsError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            HcsError::Store(_) | HcsError::DefaultScopeMissing(_) => EXIT_CONFIG,
            HcsError::Resolve(ResolveError::CredentialsNotConfigured { .. })
            | HcsError::Resolve(ResolveError::InvalidAccountHash(_))
            | HcsError::Resolve(ResolveError::Store(_)) => EXIT_CONFIG,
            HcsError::Resolve(_) | HcsError::Provision(_) | HcsError::Destination(_) => {
                EXIT_PROVISION
            }
            HcsError::Prompt(_) => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, HcsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        let missing = HcsError::from(ResolveError::CredentialsNotConfigured {
            account_hash: "33334444".to_string(),
        });
        assert_eq!(missing.exit_code(), EXIT_CONFIG);

        let limit = HcsError::from(ResolveError::LimitExceeded {
            account_hash: "33334444".to_string(),
            existing: 4,
            limit: 3,
        });
        assert_eq!(limit.exit_code(), EXIT_PROVISION);
        assert!(limit.to_string().contains("33334444"));

        let invalid = HcsError::from(ResolveError::InvalidAccountHash("DEFAULT".to_string()));
        assert_eq!(invalid.exit_code(), EXIT_CONFIG);

        let closed = HcsError::from(PromptError::Closed);
        assert_eq!(closed.exit_code(), 1);
    }
}
