use std::io::{BufRead, Write};

use crate::cli::{Console, Outcome};
use crate::services::AuthService;

pub async fn cmd_delete<R: BufRead, W: Write>(
    auth: &dyn AuthService,
    console: &mut Console<R, W>,
    username: &str,
) -> anyhow::Result<Outcome> {
    let username = username.trim();

    console.say(format!("Delete account '{username}'?"))?;
    let answer = console.prompt("Enter 'y' to confirm, anything else to cancel")?;

    if !answer.trim().eq_ignore_ascii_case("y") {
        console.say("Cancelled.")?;
        return Ok(Outcome::Cancelled);
    }

    match auth.delete_account(username).await {
        Ok(_) => {
            console.success("Success", format!("User '{username}' deleted successfully!"))?;
            Ok(Outcome::Done)
        }
        Err(err) => {
            console.failure("Error", format!("Error deleting user: {err}"))?;
            Ok(Outcome::Failed)
        }
    }
}
