//! List accounts command handler

use std::io::{BufRead, Write};

use crate::cli::{Console, Outcome};
use crate::services::AuthService;

pub async fn cmd_list<R: BufRead, W: Write>(
    auth: &dyn AuthService,
    console: &mut Console<R, W>,
) -> anyhow::Result<Outcome> {
    let accounts = match auth.list_accounts().await {
        Ok(accounts) => accounts,
        Err(err) => {
            console.failure("Error", err)?;
            return Ok(Outcome::Failed);
        }
    };

    if accounts.is_empty() {
        console.say("No accounts registered.")?;
        console.say("")?;
        console.say("Create one with: userauth register <username>")?;
        return Ok(Outcome::Done);
    }

    console.say(format!("Registered Accounts ({} total)", accounts.len()))?;
    console.say(format!("{:-<50}", ""))?;

    for account in accounts {
        console.say(format!(
            "{:<24} created {}",
            account.username, account.created_at
        ))?;
    }

    Ok(Outcome::Done)
}
