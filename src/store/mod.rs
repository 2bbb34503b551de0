// hcs-logs - Store Module
//
// Named credential scopes (default, per-account, remote storage) and the
// load/save contract that persists them. Secrets are stored as plain text.

mod error;
mod file;
mod models;
mod repository;

pub use error::StoreError;
pub use file::FileBackend;
pub use models::{
    is_account_hash, AuthType, Credential, CredentialSummary, ScopeName, ACCOUNT_HASH_LEN,
    DEFAULT_SCOPE, REMOTE_PREFIX, REMOTE_PROVIDER_S3,
};
pub use repository::{MemoryBackend, ScopeBackend, ScopeStore};
