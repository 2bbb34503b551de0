// hcs-logs - CLI Command Handlers
//
// `config` loads the store, runs the maintenance menu, and saves on quit.
// `download` resolves credentials account by account; the first failure aborts
// the whole run.

use std::io::{BufRead, Write};
use std::path::Path;
use std::time::Instant;

use crate::destination::Destination;
use crate::error::HcsError;
use crate::maintenance::Maintenance;
use crate::prompt::Scanner;
use crate::resolve::{ApiAuth, CredentialResolver, HttpProvisioner, ResolvePolicy};
use crate::store::{FileBackend, ScopeBackend, ScopeName, ScopeStore, StoreError};

use super::{Cli, Commands, DownloadArgs};

/// Split `--config` into the store file and the default-scope selector.
///
/// An existing file is the store; anything else names the scope to use as
/// default/global config, with the store at its default location.
pub fn store_location(config: Option<&str>) -> (FileBackend, ScopeName) {
    match config {
        Some(value) if Path::new(value).is_file() => (FileBackend::new(value), ScopeName::Default),
        Some(value) if !value.is_empty() => {
            (FileBackend::new(FileBackend::default_path()), ScopeName::parse(value))
        }
        _ => (FileBackend::new(FileBackend::default_path()), ScopeName::Default),
    }
}

/// Execute the parsed CLI command.
pub async fn execute(cli: Cli) -> Result<(), HcsError> {
    let (backend, selector) = store_location(cli.config.as_deref());

    match cli.command {
        Commands::Config => cmd_config(&backend, cli.show_secret),
        Commands::Download(args) => cmd_download(&backend, selector, args).await,
    }
}

/// Write the single user-facing line for a fatal error and return the
/// process exit code.
pub fn report_failure<W: Write>(err: &HcsError, out: &mut W) -> i32 {
    let _ = writeln!(out, "Error: {}", err);
    err.exit_code()
}

// ─── Config ──────────────────────────────────────────────────────────────────

fn cmd_config(backend: &FileBackend, show_secret: bool) -> Result<(), HcsError> {
    let mut scanner = Scanner::stdio(show_secret);
    let scopes = edit_store(backend, &mut scanner)?;

    println!("✓ Configure saved ({} scopes)", scopes);
    println!("  Store: {}", backend.path().display());

    Ok(())
}

/// Run the maintenance menu over the store and save it on quit.
///
/// A missing store starts empty. An unparsable one is backed up first and
/// then also starts empty, so `config` is always the way out of a broken file.
fn edit_store<R: BufRead, W: Write>(
    backend: &FileBackend,
    scanner: &mut Scanner<R, W>,
) -> Result<usize, HcsError> {
    let mut store = match backend.load() {
        Ok(store) => store,
        Err(StoreError::Missing(path)) => {
            tracing::info!(path = %path.display(), "No credential store yet, starting empty");
            ScopeStore::new()
        }
        Err(StoreError::Parse { path, source }) => {
            let backup = backend.backup()?;
            tracing::warn!(
                path = %path.display(),
                backup = %backup.display(),
                error = %source,
                "Credential store unreadable, starting empty"
            );
            ScopeStore::new()
        }
        Err(e) => return Err(e.into()),
    };

    Maintenance::new(&mut store, scanner).run()?;
    backend.save(&store)?;

    Ok(store.len())
}

// ─── Download ────────────────────────────────────────────────────────────────

async fn cmd_download(
    backend: &FileBackend,
    selector: ScopeName,
    args: DownloadArgs,
) -> Result<(), HcsError> {
    let mut store = backend.load()?;

    let login = store
        .lookup(&selector, &ScopeName::Default)
        .cloned()
        .ok_or_else(|| HcsError::DefaultScopeMissing(selector.key()))?;

    let destination = Destination::parse(&args.output, &store)?;
    tracing::info!(destination = %destination, "Download destination");

    let provisioner = HttpProvisioner::new(args.api_base, ApiAuth::from_credential(&login))?;
    let policy = ResolvePolicy {
        auto_generate: args.auto,
        force_generate: args.force_generate,
        key_limit: args.key_limit,
    };
    let resolver = CredentialResolver::new(backend, &provisioner, args.own_account, policy)
        .with_default_scope(selector);

    for account_hash in &args.accounts {
        let started = Instant::now();
        let credentials = resolver.resolve(&mut store, account_hash).await?;

        tracing::info!(
            account_hash = %account_hash,
            key_pair = !credentials.access_key_id.is_empty(),
            private_key = !credentials.private_key_json.is_empty(),
            target = %destination.for_account(account_hash),
            spent_ms = started.elapsed().as_millis() as u64,
            "Credentials ready"
        );
        println!("✓ {} │ credentials ready │ {}", account_hash, destination.for_account(account_hash));
    }

    Ok(())
}

// ─── Tests ───────────────────────────────────────────────────────────────────
