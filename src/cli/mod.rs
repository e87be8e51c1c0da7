//! CLI module - terminal front end for the account store
//!
//! Commands only ever see `&dyn AuthService`; the storage behind it is
//! wired up in `crate::run`.

mod commands;
mod console;

use clap::{Parser, Subcommand};
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::services::AuthService;

pub use commands::*;
pub use console::Console;

/// userauth - local account registration and login
#[derive(Parser)]
#[command(name = "userauth")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Read configuration from this file instead of the default locations
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Database URL, overrides `general.database_path`
    #[arg(long, global = true)]
    pub database: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(flatten)]
    Account(AccountCommands),

    /// Create default config file (at `--config` when given)
    Init,
}

/// Commands that run against the account store.
#[derive(Subcommand)]
pub enum AccountCommands {
    /// Create a new account (prompts for the password)
    #[command(alias = "signup")]
    Register {
        /// Desired username
        username: String,
    },

    /// Check a username/password pair
    #[command(alias = "auth")]
    Login {
        /// Username to authenticate
        username: String,
    },

    /// Change an account's password
    #[command(alias = "change-password")]
    Passwd {
        /// Account whose password changes
        username: String,
    },

    /// Delete an account
    #[command(alias = "rm")]
    Delete {
        /// Account to delete
        username: String,
    },

    /// Tell whether an account exists
    Exists {
        /// Username to look up
        username: String,
    },

    /// List all accounts with their creation time
    #[command(alias = "ls")]
    List,

    /// Interactive login/register session
    Shell,
}

/// How a command ended, mapped to the process exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Done,
    Cancelled,
    Failed,
}

impl Outcome {
    #[must_use]
    pub const fn is_failure(self) -> bool {
        matches!(self, Self::Failed)
    }

    #[must_use]
    pub fn exit_code(self) -> ExitCode {
        if self.is_failure() {
            ExitCode::FAILURE
        } else {
            ExitCode::SUCCESS
        }
    }
}

/// Run one command against the account service.
pub async fn execute<R: BufRead, W: Write>(
    auth: &dyn AuthService,
    command: AccountCommands,
    console: &mut Console<R, W>,
) -> anyhow::Result<Outcome> {
    match command {
        AccountCommands::Register { username } => cmd_register(auth, console, &username).await,
        AccountCommands::Login { username } => cmd_login(auth, console, &username).await,
        AccountCommands::Passwd { username } => cmd_passwd(auth, console, &username).await,
        AccountCommands::Delete { username } => cmd_delete(auth, console, &username).await,
        AccountCommands::Exists { username } => cmd_exists(auth, console, &username).await,
        AccountCommands::List => cmd_list(auth, console).await,
        AccountCommands::Shell => cmd_shell(auth, console).await,
    }
}
