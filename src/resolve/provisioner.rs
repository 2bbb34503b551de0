// hcs-logs - Provisioning collaborator contract
//
// The resolution engine creates service accounts and access keys through
// this trait; `HttpProvisioner` talks to the CDN API, tests use a mock.

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::ProvisionError;

/// Cloud identity under which access keys are issued.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceAccount {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// An access key already issued to a service account (no secret).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessKey {
    pub access_id: String,
    #[serde(default)]
    pub state: String,
}

/// A freshly created access key, including its secret.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAccessKey {
    pub access_id: String,
    pub secret: String,
}

impl fmt::Debug for NewAccessKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewAccessKey")
            .field("access_id", &self.access_id)
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

#[async_trait]
pub trait Provisioner: Send + Sync {
    /// Existing service accounts under `account_hash`.
    async fn list_service_accounts(
        &self,
        account_hash: &str,
    ) -> Result<Vec<ServiceAccount>, ProvisionError>;

    /// Create one service account under `account_hash`.
    async fn create_service_account(
        &self,
        account_hash: &str,
        name: &str,
        description: &str,
    ) -> Result<ServiceAccount, ProvisionError>;

    /// Access keys already issued to a service account.
    async fn list_access_keys(
        &self,
        account_hash: &str,
        service_account_id: &str,
    ) -> Result<Vec<AccessKey>, ProvisionError>;

    /// Issue one new access key for a service account.
    async fn create_access_key(
        &self,
        account_hash: &str,
        service_account_id: &str,
    ) -> Result<NewAccessKey, ProvisionError>;
}
