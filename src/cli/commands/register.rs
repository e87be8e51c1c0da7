//! Register command handler

use std::io::{BufRead, Write};

use super::{FILL_ALL_FIELDS, PASSWORDS_DIFFER};
use crate::cli::{Console, Outcome};
use crate::services::AuthService;

pub async fn cmd_register<R: BufRead, W: Write>(
    auth: &dyn AuthService,
    console: &mut Console<R, W>,
    username: &str,
) -> anyhow::Result<Outcome> {
    let username = username.trim();
    let password = console.prompt("Password")?;
    let confirm = console.prompt("Confirm password")?;

    if username.is_empty() || password.is_empty() || confirm.is_empty() {
        console.failure("Error", FILL_ALL_FIELDS)?;
        return Ok(Outcome::Failed);
    }

    if password != confirm {
        console.failure("Error", PASSWORDS_DIFFER)?;
        return Ok(Outcome::Failed);
    }

    match auth.register(username, &password).await {
        Ok(account) => {
            console.success(
                "Success",
                format!("User '{}' registered successfully!", account.username),
            )?;
            Ok(Outcome::Done)
        }
        Err(err) => {
            console.failure("Registration Failed", err)?;
            Ok(Outcome::Failed)
        }
    }
}
