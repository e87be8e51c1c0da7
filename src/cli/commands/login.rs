//! Login command handler

use std::io::{BufRead, Write};

use super::FILL_ALL_FIELDS;
use crate::cli::{Console, Outcome};
use crate::services::{AccountInfo, AuthService};

pub async fn cmd_login<R: BufRead, W: Write>(
    auth: &dyn AuthService,
    console: &mut Console<R, W>,
    username: &str,
) -> anyhow::Result<Outcome> {
    Ok(match login_flow(auth, console, username).await? {
        Some(_) => Outcome::Done,
        None => Outcome::Failed,
    })
}

/// Prompt for the password and authenticate; `Some` on success.
pub async fn login_flow<R: BufRead, W: Write>(
    auth: &dyn AuthService,
    console: &mut Console<R, W>,
    username: &str,
) -> anyhow::Result<Option<AccountInfo>> {
    let username = username.trim();
    let password = console.prompt("Password")?;

    if username.is_empty() || password.is_empty() {
        console.failure("Error", FILL_ALL_FIELDS)?;
        return Ok(None);
    }

    match auth.authenticate(username, &password).await {
        Ok(account) => {
            console.success("Success", format!("Welcome back, {}!", account.username))?;
            Ok(Some(account))
        }
        Err(err) => {
            console.failure("Login Failed", err)?;
            Ok(None)
        }
    }
}
