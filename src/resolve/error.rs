// hcs-logs - Resolution error types
//
// Every variant is fatal to the download run. Messages carry the account hash
// and, for provisioning, the step that failed.

use std::fmt;

use thiserror::Error;

use crate::store::StoreError;

/// Failure reported by the provisioning collaborator.
#[derive(Debug, Error)]
pub enum ProvisionError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API returned {status}: {body}")]
    Status { status: u16, body: String },
}

/// Which provisioning call failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProvisionStep {
    AccountLookup,
    AccountCreation,
    KeyLookup,
    KeyCreation,
}

impl fmt::Display for ProvisionStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ProvisionStep::AccountLookup => "service account lookup",
            ProvisionStep::AccountCreation => "service account creation",
            ProvisionStep::KeyLookup => "access key lookup",
            ProvisionStep::KeyCreation => "access key creation",
        })
    }
}

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("{0} is not an account hash ({len} letters or digits)", len = crate::store::ACCOUNT_HASH_LEN)]
    InvalidAccountHash(String),

    #[error("Credentials for account {account_hash} not configured; run `hcs-logs config` or enable --auto")]
    CredentialsNotConfigured { account_hash: String },

    #[error("Account {account_hash} already has {existing} access keys (limit {limit}); too many keys already exist, create one manually or pass --force-generate")]
    LimitExceeded {
        account_hash: String,
        existing: usize,
        limit: usize,
    },

    #[error("Provisioning for account {account_hash} failed at {step}: {source}")]
    Provisioning {
        account_hash: String,
        step: ProvisionStep,
        #[source]
        source: ProvisionError,
    },

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}
