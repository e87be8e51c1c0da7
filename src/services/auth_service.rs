//! Domain service for account registration and authentication.
//!
//! The interaction layer talks to accounts only through [`AuthService`];
//! every failure carries the message that is shown to the user verbatim.

use thiserror::Error;

use crate::db::User;

pub const EMPTY_CREDENTIALS: &str = "Username and password cannot be empty";
pub const INCORRECT_PASSWORD: &str = "Incorrect password!";
pub const INCORRECT_CURRENT_PASSWORD: &str = "Current password is incorrect!";

/// Errors specific to account operations.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("{0}")]
    Validation(String),

    #[error("Username '{0}' already exists!")]
    DuplicateUsername(String),

    #[error("User '{0}' not found!")]
    NotFound(String),

    #[error("{0}")]
    InvalidCredentials(&'static str),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<sea_orm::DbErr> for AuthError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Storage(err.to_string())
    }
}

impl From<anyhow::Error> for AuthError {
    /// Keeps the context line and the root cause; the layers in between
    /// repeat the same database text.
    fn from(err: anyhow::Error) -> Self {
        let context = err.to_string();
        let root = err.root_cause().to_string();
        if context == root {
            Self::Storage(context)
        } else {
            Self::Storage(format!("{context}: {root}"))
        }
    }
}

/// Public view of an account; never carries the hash or salt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountInfo {
    pub username: String,
    pub created_at: String,
}

impl From<User> for AccountInfo {
    fn from(user: User) -> Self {
        Self {
            username: user.username,
            created_at: user.created_at,
        }
    }
}

/// Domain service trait for account management.
#[async_trait::async_trait]
pub trait AuthService: Send + Sync {
    /// Creates an account with a freshly salted hash.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Validation`] for empty or too-short input and
    /// [`AuthError::DuplicateUsername`] when the name is already taken.
    async fn register(&self, username: &str, password: &str) -> Result<AccountInfo, AuthError>;

    /// Checks a password against the stored hash.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::NotFound`] for unknown users and
    /// [`AuthError::InvalidCredentials`] on a wrong password.
    async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<AccountInfo, AuthError>;

    /// Replaces hash and salt after verifying the current password.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] if the current password does not
    /// verify, [`AuthError::Validation`] if the new one is too short.
    async fn change_password(
        &self,
        username: &str,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), AuthError>;

    /// Removes the account. Succeeds when there was nothing to remove;
    /// the returned flag says whether a row was deleted.
    async fn delete_account(&self, username: &str) -> Result<bool, AuthError>;

    async fn exists(&self, username: &str) -> Result<bool, AuthError>;

    /// Every account, oldest first.
    async fn list_accounts(&self) -> Result<Vec<AccountInfo>, AuthError>;
}
