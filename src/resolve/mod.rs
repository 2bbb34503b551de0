// hcs-logs - Resolve Module
//
// Per-host credential lookup with inheritance from the default scope and
// on-demand creation of service accounts and access keys.

mod engine;
mod error;
mod http;
mod provisioner;

pub use engine::{CredentialResolver, HostCredentials, ResolvePolicy, DEFAULT_KEY_LIMIT};
pub use error::{ProvisionError, ProvisionStep, ResolveError};
pub use http::{ApiAuth, HttpProvisioner, DEFAULT_API_BASE};
pub use provisioner::{AccessKey, NewAccessKey, Provisioner, ServiceAccount};
