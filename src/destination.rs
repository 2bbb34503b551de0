// hcs-logs - Download destinations
//
// `-d` takes either a local directory or `{remoteName}:{prefix}`, where
// `remoteName` refers to a remote scope holding S3 credentials.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::store::{ScopeName, ScopeStore};

#[derive(Debug, Error)]
pub enum DestinationError {
    #[error("Remote configure {0} not found; create it with `hcs-logs config`")]
    RemoteNotFound(String),

    #[error("Remote configure {name} is invalid: {reason}")]
    InvalidRemote { name: String, reason: String },
}

/// Where downloaded logs are written.
#[derive(Clone, PartialEq, Eq)]
pub enum Destination {
    Local(PathBuf),
    Remote(RemoteTarget),
}

/// An S3 bucket location plus the credentials to write to it.
#[derive(Clone, PartialEq, Eq)]
pub struct RemoteTarget {
    pub name: String,
    pub bucket: String,
    pub region: String,
    pub prefix: String,
    pub access_key_id: String,
    pub secret_access_key: String,
}

impl Destination {
    /// Interpret an output argument against the configured remote scopes.
    pub fn parse(output: &str, store: &ScopeStore) -> Result<Self, DestinationError> {
        let Some((name, prefix)) = output.split_once(':').filter(|(name, _)| !name.is_empty())
        else {
            return Ok(Destination::Local(PathBuf::from(output)));
        };

        let credential = store
            .get(&ScopeName::remote(name))
            .ok_or_else(|| DestinationError::RemoteNotFound(name.to_string()))?;
        credential
            .validate_remote()
            .map_err(|reason| DestinationError::InvalidRemote {
                name: name.to_string(),
                reason,
            })?;

        Ok(Destination::Remote(RemoteTarget {
            name: name.to_string(),
            bucket: credential.bucket_name.clone(),
            region: credential.region.clone(),
            prefix: prefix.to_string(),
            access_key_id: credential.access_key_id.clone(),
            secret_access_key: credential.secret_access_key.clone(),
        }))
    }

    /// Where one account's files go: a per-account directory for remote
    /// targets. Hosts are not known at this layer, so the account hash keys
    /// the subdirectory.
    pub fn for_account(&self, account_hash: &str) -> String {
        match self {
            Destination::Local(dir) => dir.display().to_string(),
            Destination::Remote(target) => format!(
                "{}:{}:{}/{}/",
                target.name,
                target.bucket,
                target.prefix.trim_end_matches('/'),
                account_hash
            ),
        }
    }
}

impl fmt::Debug for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Destination::Local(dir) => f.debug_tuple("Local").field(dir).finish(),
            Destination::Remote(target) => f
                .debug_struct("Remote")
                .field("name", &target.name)
                .field("bucket", &target.bucket)
                .field("region", &target.region)
                .field("prefix", &target.prefix)
                .field("secret_access_key", &"[REDACTED]")
                .finish(),
        }
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Destination::Local(dir) => write!(f, "{}", dir.display()),
            Destination::Remote(target) => {
                write!(f, "s3://{}/{} ({})", target.bucket, target.prefix, target.region)
            }
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
