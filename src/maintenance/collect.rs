// hcs-logs - Credential collection flows
//
// Each flow edits a record in place, offering the current values as defaults
// so an edit only needs the fields that change.

use std::io::{BufRead, Write};

use crate::prompt::{Prompt, PromptError, Scanner, ValidationError};
use crate::store::{AuthType, Credential, REMOTE_PROVIDER_S3};

/// Required length of a CDN access token.
const TOKEN_LEN: usize = 32;

/// Ask for CDN API credentials: auth method, then login or token.
pub fn collect_credential<R: BufRead, W: Write>(
    scanner: &mut Scanner<R, W>,
    credential: &mut Credential,
) -> Result<(), PromptError> {
    let auth_type = scanner.scan(
        &Prompt::new("Select auth method:")
            .default_value(credential.auth_type.as_str())
            .min_length(1)
            .option(
                AuthType::Basic.as_str(),
                "basic authenticate, valid username and password are needed",
            )
            .option(
                AuthType::Token.as_str(),
                "token authenticate, valid token is needed",
            ),
    )?;
    credential.auth_type = AuthType::parse(&auth_type).unwrap_or_default();

    match credential.auth_type {
        AuthType::Basic => {
            credential.username = scanner.scan(
                &Prompt::new("Input your username :")
                    .default_value(credential.username.as_str())
                    .min_length(3),
            )?;
            credential.password = scanner.scan(
                &Prompt::new("Input your password :")
                    .default_value(credential.password.as_str())
                    .password()
                    .min_length(3),
            )?;
        }
        AuthType::Token => {
            credential.token = scanner.scan(
                &Prompt::new("Input your accessToken, permanent token is recommended :")
                    .default_value(credential.token.as_str())
                    .password()
                    .validator(|t| {
                        if t.chars().count() == TOKEN_LEN {
                            Ok(())
                        } else {
                            Err(ValidationError::new(format!(
                                "accessToken length must be {}",
                                TOKEN_LEN
                            )))
                        }
                    }),
            )?;
        }
    }

    Ok(())
}

/// Ask for object-storage credentials of an upload destination.
pub fn collect_remote_credential<R: BufRead, W: Write>(
    scanner: &mut Scanner<R, W>,
    credential: &mut Credential,
) -> Result<(), PromptError> {
    credential.provider = scanner.scan(
        &Prompt::new("Select storage provider:")
            .default_value(REMOTE_PROVIDER_S3)
            .option(REMOTE_PROVIDER_S3, "AWS S3 or S3 compatible storage"),
    )?;
    credential.region = scanner.scan(
        &Prompt::new("Input bucket region :")
            .default_value(credential.region.as_str())
            .min_length(3),
    )?;
    credential.bucket_name = scanner.scan(
        &Prompt::new("Input bucket name :")
            .default_value(credential.bucket_name.as_str())
            .min_length(1),
    )?;
    credential.access_key_id = scanner.scan(
        &Prompt::new("Input your access key ID : ")
            .default_value(credential.access_key_id.as_str())
            .min_length(10),
    )?;
    credential.secret_access_key = scanner.scan(
        &Prompt::new("Input your secret key : ")
            .default_value(credential.secret_access_key.as_str())
            .password()
            .min_length(10),
    )?;
    Ok(())
}

// ─── Tests ───────────────────────────────────────────────────────────────────
