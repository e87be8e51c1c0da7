use std::io::{BufRead, Write};

use crate::cli::{Console, Outcome};
use crate::services::AuthService;

pub async fn cmd_exists<R: BufRead, W: Write>(
    auth: &dyn AuthService,
    console: &mut Console<R, W>,
    username: &str,
) -> anyhow::Result<Outcome> {
    let username = username.trim();

    match auth.exists(username).await {
        Ok(true) => {
            console.say(format!("User '{username}' exists"))?;
            Ok(Outcome::Done)
        }
        Ok(false) => {
            console.say(format!("User '{username}' does not exist"))?;
            Ok(Outcome::Done)
        }
        Err(err) => {
            console.failure("Error", err)?;
            Ok(Outcome::Failed)
        }
    }
}
