// hcs-logs - Scope listing
//
// Prints one row per scope with presence flags. Secret values never reach
// this table; it only sees `CredentialSummary`.

use std::io::{self, Write};

use crate::store::{ScopeName, ScopeStore};

pub fn render_scopes<W: Write>(store: &ScopeStore, out: &mut W) -> io::Result<()> {
    writeln!(
        out,
        "# {:<15} {:<8} {:<24} {:<9} {:<6} {:<11} {}",
        "Scope", "Kind", "Username/Bucket", "Password", "Token", "PrivateKey", "AccessKey&Secret"
    )?;

    for (i, (name, credential)) in store.iter().enumerate() {
        let summary = credential.summary();
        let who = match name {
            ScopeName::Remote(_) => format!("s3://{} ({})", summary.bucket_name, summary.region),
            _ => summary.username.clone(),
        };
        writeln!(
            out,
            "{} {:<15} {:<8} {:<24} {:<9} {:<6} {:<11} {}",
            i + 1,
            name.key(),
            name.kind(),
            who,
            summary.has_password,
            summary.has_token,
            summary.has_private_key,
            summary.has_key_pair,
        )?;
    }
    Ok(())
}
