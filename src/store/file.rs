// hcs-logs - TOML file backend
//
// One table per scope, keyed by the scope's stored name. Saving rewrites the
// whole file in place; there is no temp-file rename, so a crash mid-write can
// leave a truncated store behind.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::models::Credential;
use super::repository::{ScopeBackend, ScopeStore};
use super::StoreError;

/// Directory (under the home directory) holding the store file.
const STORE_DIR: &str = ".highwinds";

/// File name of the store.
const STORE_FILE: &str = "hcs.toml";

/// Scope store persisted as a TOML file.
#[derive(Debug, Clone)]
pub struct FileBackend {
    path: PathBuf,
}

impl FileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `$HOME/.highwinds/hcs.toml`, or `./.highwinds/hcs.toml` without a home.
    pub fn default_path() -> PathBuf {
        let base = dirs_next::home_dir().unwrap_or_else(|| PathBuf::from("."));
        base.join(STORE_DIR).join(STORE_FILE)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Copy the current store file next to itself as `<name>.bak`.
    pub fn backup(&self) -> Result<PathBuf, StoreError> {
        let mut name = self.path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
        name.push(".bak");
        let target = self.path.with_file_name(name);
        fs::copy(&self.path, &target)?;
        restrict_permissions(&target, 0o600)?;
        Ok(target)
    }
}

impl ScopeBackend for FileBackend {
    fn load(&self) -> Result<ScopeStore, StoreError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(StoreError::Missing(self.path.clone()));
            }
            Err(e) => return Err(StoreError::Io(e)),
        };

        let raw: BTreeMap<String, Credential> =
            toml::from_str(&text).map_err(|source| StoreError::Parse {
                path: self.path.clone(),
                source,
            })?;

        tracing::debug!(path = %self.path.display(), scopes = raw.len(), "Credential store loaded");
        Ok(ScopeStore::from_keyed(raw))
    }

    fn save(&self, store: &ScopeStore) -> Result<(), StoreError> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            if !dir.exists() {
                fs::create_dir_all(dir)?;
                restrict_permissions(dir, 0o700)?;
            }
        }

        let text = toml::to_string(&store.to_keyed()?)?;
        fs::write(&self.path, text)?;
        restrict_permissions(&self.path, 0o600)?;

        tracing::debug!(path = %self.path.display(), scopes = store.len(), "Credential store saved");
        Ok(())
    }
}

#[cfg(unix)]
fn restrict_permissions(path: &Path, mode: u32) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(mode))
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path, _mode: u32) -> std::io::Result<()> {
    Ok(())
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::models::{AuthType, ScopeName};

    fn full_record() -> Credential {
        Credential {
            auth_type: AuthType::Token,
            username: "ops \"quoted\" user".to_string(),
            password: "p@ss=word#1".to_string(),
            token: "0123456789abcdef0123456789abcdef".to_string(),
            private_key_json: "eyJ0eXBlIjoic2VydmljZV9hY2NvdW50In0=".to_string(),
            access_key_id: "GOOG1EXAMPLEKEY".to_string(),
            secret_access_key: "s3cr3t/with+chars".to_string(),
            ..Credential::default()
        }
    }

    #[test]
    fn test_save_then_load_round_trips_fields() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FileBackend::new(dir.path().join("nested").join("hcs.toml"));

        let mut store = ScopeStore::new();
        store.insert(ScopeName::Default, full_record());
        store.insert(ScopeName::custom("11112222"), Credential {
            username: "sub-account".to_string(),
            ..Credential::default()
        });
        store.insert(ScopeName::remote("archive"), Credential {
            provider: "s3".to_string(),
            region: "eu-west-1".to_string(),
            bucket_name: "logs".to_string(),
            access_key_id: "AKIAEXAMPLE1".to_string(),
            secret_access_key: "remote-secret".to_string(),
            ..Credential::default()
        });

        backend.save(&store).unwrap();
        let loaded = backend.load().unwrap();

        assert_eq!(loaded, store, "Every field of every scope must survive a save/load");
        assert_eq!(loaded.default_scope(), Some(&full_record()));
    }

    #[test]
    fn test_saved_file_uses_scope_keys_as_tables() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FileBackend::new(dir.path().join("hcs.toml"));

        let mut store = ScopeStore::new();
        store.insert(ScopeName::Default, Credential::default());
        store.insert(ScopeName::remote("archive"), Credential::default());
        backend.save(&store).unwrap();

        let text = fs::read_to_string(backend.path()).unwrap();
        assert!(text.contains("[DEFAULT]"), "Default scope table missing:\n{}", text);
        assert!(text.contains("[remote-archive]"), "Remote scope table missing:\n{}", text);
        assert!(text.contains("user_name"));
    }

    #[test]
    fn test_save_overwrites_previous_contents() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FileBackend::new(dir.path().join("hcs.toml"));

        let mut store = ScopeStore::new();
        store.insert(ScopeName::custom("11112222"), Credential::default());
        backend.save(&store).unwrap();

        store.remove(&ScopeName::custom("11112222")).unwrap();
        backend.save(&store).unwrap();

        assert!(backend.load().unwrap().is_empty(), "Removed scopes must not linger on disk");
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hcs.toml");
        fs::write(&path, "[DEFAULT\nuser_name = ").unwrap();

        let err = FileBackend::new(&path).load().unwrap_err();
        assert!(matches!(err, StoreError::Parse { .. }), "got {:?}", err);
        assert!(
            err.to_string().contains("hcs-logs config"),
            "Parse errors must tell the operator how to fix the store"
        );
    }

    #[test]
    fn test_wrong_field_type_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hcs.toml");
        fs::write(&path, "[DEFAULT]\nauth_type = \"oauth\"\n").unwrap();

        let err = FileBackend::new(&path).load().unwrap_err();
        assert!(matches!(err, StoreError::Parse { .. }));
    }

    #[test]
    fn test_missing_file_is_reported_separately() {
        let dir = tempfile::tempdir().unwrap();
        let err = FileBackend::new(dir.path().join("absent.toml")).load().unwrap_err();
        assert!(matches!(err, StoreError::Missing(_)));
    }

    #[test]
    fn test_absent_fields_default_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hcs.toml");
        fs::write(&path, "[11112222]\nuser_name = \"only-user\"\n").unwrap();

        let store = FileBackend::new(&path).load().unwrap();
        let cred = store.get(&ScopeName::custom("11112222")).unwrap();
        assert_eq!(cred.username, "only-user");
        assert_eq!(cred.auth_type, AuthType::Basic);
        assert!(cred.access_key_id.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_saved_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let backend = FileBackend::new(dir.path().join("hcs.toml"));
        backend.save(&ScopeStore::new()).unwrap();

        let mode = fs::metadata(backend.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn test_backup_copies_store_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hcs.toml");
        fs::write(&path, "[DEFAULT\n").unwrap();

        let backup = FileBackend::new(&path).backup().unwrap();
        assert_eq!(backup, dir.path().join("hcs.toml.bak"));
        assert_eq!(fs::read_to_string(backup).unwrap(), "[DEFAULT\n");
    }
}
