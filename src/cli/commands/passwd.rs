//! Change-password command handler

use std::io::{BufRead, Write};

use super::{FILL_ALL_FIELDS, PASSWORDS_DIFFER};
use crate::cli::{Console, Outcome};
use crate::services::AuthService;

pub async fn cmd_passwd<R: BufRead, W: Write>(
    auth: &dyn AuthService,
    console: &mut Console<R, W>,
    username: &str,
) -> anyhow::Result<Outcome> {
    let username = username.trim();
    let current = console.prompt("Current password")?;
    let new_password = console.prompt("New password")?;
    let confirm = console.prompt("Confirm new password")?;

    if username.is_empty() || current.is_empty() || new_password.is_empty() || confirm.is_empty()
    {
        console.failure("Error", FILL_ALL_FIELDS)?;
        return Ok(Outcome::Failed);
    }

    if new_password != confirm {
        console.failure("Error", PASSWORDS_DIFFER)?;
        return Ok(Outcome::Failed);
    }

    match auth
        .change_password(username, &current, &new_password)
        .await
    {
        Ok(()) => {
            console.success("Success", "Password changed successfully!")?;
            Ok(Outcome::Done)
        }
        Err(err) => {
            console.failure("Password Change Failed", err)?;
            Ok(Outcome::Failed)
        }
    }
}
