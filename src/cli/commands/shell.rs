//! Interactive session: a login screen and, once signed in, a dashboard.

use std::io::{BufRead, Write};

use super::{cmd_delete, cmd_passwd, cmd_register, login_flow};
use crate::cli::{Console, Outcome};
use crate::services::{AccountInfo, AuthService};

pub async fn cmd_shell<R: BufRead, W: Write>(
    auth: &dyn AuthService,
    console: &mut Console<R, W>,
) -> anyhow::Result<Outcome> {
    loop {
        console.say("")?;
        console.say("=== Login ===")?;
        console.say("[1] Login   [2] Register   [q] Quit")?;

        let Some(choice) = console.read("Select")? else {
            break;
        };

        match choice.trim() {
            "1" | "login" => {
                let username = console.prompt("Username")?;
                if let Some(account) = login_flow(auth, console, &username).await? {
                    dashboard(auth, console, account).await?;
                }
            }
            "2" | "register" => {
                let username = console.prompt("Username")?;
                cmd_register(auth, console, &username).await?;
            }
            "q" | "quit" | "exit" => break,
            "" => {}
            other => console.say(format!("Unknown option: {other}"))?,
        }
    }

    console.say("Goodbye.")?;
    Ok(Outcome::Done)
}

/// Runs until logout, account deletion, or end of input.
async fn dashboard<R: BufRead, W: Write>(
    auth: &dyn AuthService,
    console: &mut Console<R, W>,
    account: AccountInfo,
) -> anyhow::Result<()> {
    console.say("")?;
    console.say(format!("Welcome, {}!", account.username))?;
    console.say("You have successfully logged in")?;
    console.say("✓ Authentication Successful")?;
    console.say("")?;
    console.say("Account Information")?;
    console.say(format!("  Username: {}", account.username))?;
    console.say(format!("  Created:  {}", account.created_at))?;
    console.say("  Status:   Active")?;

    loop {
        console.say("")?;
        console.say("[1] Change password   [2] Delete account   [l] Logout")?;

        let Some(choice) = console.read("Select")? else {
            return Ok(());
        };

        match choice.trim() {
            "1" | "passwd" => {
                cmd_passwd(auth, console, &account.username).await?;
            }
            "2" | "delete" => {
                if cmd_delete(auth, console, &account.username).await? == Outcome::Done {
                    return Ok(());
                }
            }
            "l" | "logout" => {
                console.success("Logged Out", "You have been logged out successfully")?;
                return Ok(());
            }
            "" => {}
            other => console.say(format!("Unknown option: {other}"))?,
        }
    }
}
