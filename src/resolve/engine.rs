// hcs-logs - Credential resolution and auto-provisioning
//
// Per target host:
//   1. no scope for the host's account -> copy the default scope into a new
//      account scope (secrets stripped across accounts), persist
//   2. no usable secret and auto-generation on -> find or create a service
//      account, check the key limit, create one access key, persist
//   3. usable key pair or private key -> use it
//   4. otherwise -> CredentialsNotConfigured
// Every error aborts the whole run; hosts are never skipped.

use std::fmt;

use crate::store::{is_account_hash, Credential, ScopeBackend, ScopeName, ScopeStore, StoreError};

use super::provisioner::{NewAccessKey, Provisioner};
use super::{ProvisionError, ProvisionStep, ResolveError};

/// Default maximum number of existing keys before creation is refused.
pub const DEFAULT_KEY_LIMIT: usize = 3;

/// Name and description given to auto-created service accounts.
const SERVICE_ACCOUNT_NAME: &str = "log_account";
const SERVICE_ACCOUNT_DESCRIPTION: &str = "auto generate log account";

/// When the engine may create cloud credentials on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvePolicy {
    pub auto_generate: bool,
    pub force_generate: bool,
    pub key_limit: usize,
}

impl Default for ResolvePolicy {
    fn default() -> Self {
        Self {
            auto_generate: false,
            force_generate: false,
            key_limit: DEFAULT_KEY_LIMIT,
        }
    }
}

/// Credentials handed to the log download client.
#[derive(Clone, PartialEq, Eq)]
pub struct HostCredentials {
    pub access_key_id: String,
    pub secret_key: String,
    pub private_key_json: String,
}

impl From<&Credential> for HostCredentials {
    fn from(credential: &Credential) -> Self {
        Self {
            access_key_id: credential.access_key_id.clone(),
            secret_key: credential.secret_access_key.clone(),
            private_key_json: credential.private_key_json.clone(),
        }
    }
}

impl fmt::Debug for HostCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HostCredentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_key", &"[REDACTED]")
            .field("private_key_json", &"[REDACTED]")
            .finish()
    }
}

/// Resolves per-account credentials against a store, persisting every
/// mutation through `backend`.
pub struct CredentialResolver<'a, B: ?Sized, P: ?Sized> {
    backend: &'a B,
    provisioner: &'a P,
    own_account: String,
    default_scope: ScopeName,
    policy: ResolvePolicy,
}

impl<'a, B, P> CredentialResolver<'a, B, P>
where
    B: ScopeBackend + ?Sized,
    P: Provisioner + ?Sized,
{
    /// `own_account` is the account hash of the operator's login.
    pub fn new(
        backend: &'a B,
        provisioner: &'a P,
        own_account: impl Into<String>,
        policy: ResolvePolicy,
    ) -> Self {
        Self {
            backend,
            provisioner,
            own_account: own_account.into(),
            default_scope: ScopeName::Default,
            policy,
        }
    }

    /// Inherit from `scope` instead of the global default (which stays the
    /// fallback when `scope` is absent).
    pub fn with_default_scope(mut self, scope: ScopeName) -> Self {
        self.default_scope = scope;
        self
    }

    /// Resolve the credentials for a host owned by `account_hash`.
    pub async fn resolve(
        &self,
        store: &mut ScopeStore,
        account_hash: &str,
    ) -> Result<HostCredentials, ResolveError> {
        if !is_account_hash(account_hash) {
            return Err(ResolveError::InvalidAccountHash(account_hash.to_string()));
        }
        let scope = ScopeName::custom(account_hash);

        if !store.contains(&scope) {
            self.inherit(store, &scope, account_hash)?;
        }

        let has_secret = store
            .get(&scope)
            .is_some_and(Credential::has_usable_secret);

        if !has_secret {
            if !self.policy.auto_generate {
                tracing::error!(account_hash, "No credentials configured for account");
                return Err(ResolveError::CredentialsNotConfigured {
                    account_hash: account_hash.to_string(),
                });
            }

            let key = self.provision(account_hash).await?;
            let credential = store.get_mut(&scope)?;
            credential.access_key_id = key.access_id;
            credential.secret_access_key = key.secret;
            self.backend.save(store)?;
            tracing::info!(account_hash, "Stored auto-generated access key");
        }

        store
            .get(&scope)
            .map(HostCredentials::from)
            .ok_or_else(|| StoreError::ScopeNotFound(scope.key()).into())
    }

    /// Create the account scope as a copy of the default scope.
    fn inherit(
        &self,
        store: &mut ScopeStore,
        scope: &ScopeName,
        account_hash: &str,
    ) -> Result<(), ResolveError> {
        let mut copy = match store.lookup(&self.default_scope, &ScopeName::Default) {
            Some(default) => default.clone(),
            None => {
                tracing::warn!(account_hash, "No default scope to inherit from");
                Credential::default()
            }
        };

        if account_hash != self.own_account {
            copy.strip_secrets();
        }

        tracing::debug!(
            account_hash,
            inherited_from = %self.default_scope,
            cross_account = account_hash != self.own_account,
            "Creating account scope from default"
        );
        store.insert(scope.clone(), copy);
        self.backend.save(store)?;
        Ok(())
    }

    /// Find or create a service account and issue one access key for it.
    async fn provision(&self, account_hash: &str) -> Result<NewAccessKey, ResolveError> {
        let failed = |step: ProvisionStep| {
            move |source: ProvisionError| ResolveError::Provisioning {
                account_hash: account_hash.to_string(),
                step,
                source,
            }
        };

        tracing::debug!(account_hash, "Looking up service accounts");
        let existing = self
            .provisioner
            .list_service_accounts(account_hash)
            .await
            .map_err(failed(ProvisionStep::AccountLookup))?;

        let service_account = match existing.into_iter().next() {
            Some(service_account) => service_account,
            None => {
                tracing::info!(account_hash, "Creating service account");
                self.provisioner
                    .create_service_account(
                        account_hash,
                        SERVICE_ACCOUNT_NAME,
                        SERVICE_ACCOUNT_DESCRIPTION,
                    )
                    .await
                    .map_err(failed(ProvisionStep::AccountCreation))?
            }
        };

        let keys = self
            .provisioner
            .list_access_keys(account_hash, &service_account.id)
            .await
            .map_err(failed(ProvisionStep::KeyLookup))?;

        if keys.len() > self.policy.key_limit && !self.policy.force_generate {
            tracing::error!(
                account_hash,
                existing_keys = keys.len(),
                key_limit = self.policy.key_limit,
                "Access key limit reached"
            );
            return Err(ResolveError::LimitExceeded {
                account_hash: account_hash.to_string(),
                existing: keys.len(),
                limit: self.policy.key_limit,
            });
        }

        tracing::info!(
            account_hash,
            service_account = %service_account.name,
            existing_keys = keys.len(),
            "Creating access key"
        );
        self.provisioner
            .create_access_key(account_hash, &service_account.id)
            .await
            .map_err(failed(ProvisionStep::KeyCreation))
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
