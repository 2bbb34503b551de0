// hcs-logs - Scope and credential data models
//
// SECURITY: secret fields are plain strings on disk (no encryption at rest),
// but they are never included in Debug output, log messages, or the
// maintenance table. Use `summary()` for anything shown to the operator.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Reserved name of the global fallback scope.
pub const DEFAULT_SCOPE: &str = "DEFAULT";

/// Prefix that marks remote-storage scopes in the store file.
pub const REMOTE_PREFIX: &str = "remote-";

/// Length of a CDN account hash.
pub const ACCOUNT_HASH_LEN: usize = 8;

/// The only object-storage provider remote scopes may use.
pub const REMOTE_PROVIDER_S3: &str = "s3";

/// Returns true if `s` has the shape of an account hash: exactly
/// `ACCOUNT_HASH_LEN` ASCII letters or digits. No reserved key (`DEFAULT`,
/// `remote-*`) can pass this check.
pub fn is_account_hash(s: &str) -> bool {
    s.len() == ACCOUNT_HASH_LEN && s.chars().all(|c| c.is_ascii_alphanumeric())
}

// ─── Scope names ─────────────────────────────────────────────────────────────

/// Name of a credential scope.
///
/// The store file keys scopes by plain strings; this enum is the in-memory
/// view of those keys, so nothing outside `parse`/`key` inspects prefixes.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ScopeName {
    /// The global fallback scope.
    Default,
    /// CDN credentials for one account, keyed by account hash.
    Custom(String),
    /// Object-storage credentials for an upload destination.
    Remote(String),
}

impl ScopeName {
    /// Interpret a stored key.
    pub fn parse(key: &str) -> Self {
        if key == DEFAULT_SCOPE {
            ScopeName::Default
        } else if let Some(name) = key.strip_prefix(REMOTE_PREFIX) {
            ScopeName::Remote(name.to_string())
        } else {
            ScopeName::Custom(key.to_string())
        }
    }

    pub fn custom(account_hash: impl Into<String>) -> Self {
        ScopeName::Custom(account_hash.into())
    }

    pub fn remote(name: impl Into<String>) -> Self {
        ScopeName::Remote(name.into())
    }

    /// True if this name survives a round trip through its stored key.
    /// A `Custom` name spelled `DEFAULT` or `remote-*` does not.
    pub fn is_unambiguous(&self) -> bool {
        ScopeName::parse(&self.key()) == *self
    }

    /// The key this scope is stored under.
    pub fn key(&self) -> String {
        match self {
            ScopeName::Default => DEFAULT_SCOPE.to_string(),
            ScopeName::Custom(hash) => hash.clone(),
            ScopeName::Remote(name) => format!("{}{}", REMOTE_PREFIX, name),
        }
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, ScopeName::Remote(_))
    }

    /// Short label for the kind of scope, used when listing.
    pub fn kind(&self) -> &'static str {
        match self {
            ScopeName::Default => "default",
            ScopeName::Custom(_) => "account",
            ScopeName::Remote(_) => "remote",
        }
    }
}

impl fmt::Display for ScopeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key())
    }
}

// ─── Credentials ─────────────────────────────────────────────────────────────

/// How the CDN API is authenticated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthType {
    #[default]
    Basic,
    Token,
}

impl AuthType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthType::Basic => "basic",
            AuthType::Token => "token",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "basic" => Some(AuthType::Basic),
            "token" => Some(AuthType::Token),
            _ => None,
        }
    }
}

/// One stored credential record. Remote scopes use the trailing
/// `bucket_name`/`region`/`provider` fields; they stay empty otherwise.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Credential {
    pub auth_type: AuthType,
    #[serde(rename = "user_name")]
    pub username: String,
    pub password: String,
    pub token: String,
    /// Base64-encoded service-account JSON.
    pub private_key_json: String,
    pub access_key_id: String,
    pub secret_access_key: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub bucket_name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub region: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub provider: String,
}

impl Credential {
    /// True if both halves of the access key pair are set.
    pub fn has_key_pair(&self) -> bool {
        !self.access_key_id.is_empty() && !self.secret_access_key.is_empty()
    }

    /// True if the record can authenticate log downloads on its own.
    pub fn has_usable_secret(&self) -> bool {
        self.has_key_pair() || !self.private_key_json.is_empty()
    }

    /// Drop the secret material that must never cross account boundaries.
    pub fn strip_secrets(&mut self) {
        self.access_key_id.clear();
        self.secret_access_key.clear();
        self.private_key_json.clear();
    }

    /// Copy only the CDN login fields of `other` into this record.
    pub fn seed_login_from(&mut self, other: &Credential) {
        self.username = other.username.clone();
        self.password = other.password.clone();
    }

    /// Check the fields a remote-storage scope cannot work without.
    pub fn validate_remote(&self) -> Result<(), String> {
        if self.provider != REMOTE_PROVIDER_S3 {
            return Err(format!(
                "provider must be \"{}\", got \"{}\"",
                REMOTE_PROVIDER_S3, self.provider
            ));
        }
        let required = [
            ("region", &self.region),
            ("bucket_name", &self.bucket_name),
            ("access_key_id", &self.access_key_id),
            ("secret_access_key", &self.secret_access_key),
        ];
        for (field, value) in required {
            if value.is_empty() {
                return Err(format!("{} must not be empty", field));
            }
        }
        Ok(())
    }

    /// A view of this record that is safe to print.
    pub fn summary(&self) -> CredentialSummary {
        CredentialSummary {
            auth_type: self.auth_type,
            username: self.username.clone(),
            has_password: !self.password.is_empty(),
            has_token: !self.token.is_empty(),
            has_private_key: !self.private_key_json.is_empty(),
            has_key_pair: self.has_key_pair(),
            bucket_name: self.bucket_name.clone(),
            region: self.region.clone(),
        }
    }
}

/// Custom Debug implementation that never reveals secrets.
impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redact = |s: &String| if s.is_empty() { "" } else { "[REDACTED]" };
        f.debug_struct("Credential")
            .field("auth_type", &self.auth_type)
            .field("username", &self.username)
            .field("password", &redact(&self.password))
            .field("token", &redact(&self.token))
            .field("private_key_json", &redact(&self.private_key_json))
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &redact(&self.secret_access_key))
            .field("bucket_name", &self.bucket_name)
            .field("region", &self.region)
            .field("provider", &self.provider)
            .finish()
    }
}

/// Presence flags for a credential. Never contains a secret value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialSummary {
    pub auth_type: AuthType,
    pub username: String,
    pub has_password: bool,
    pub has_token: bool,
    pub has_private_key: bool,
    pub has_key_pair: bool,
    pub bucket_name: String,
    pub region: String,
}

// ─── Tests ───────────────────────────────────────────────────────────────────
