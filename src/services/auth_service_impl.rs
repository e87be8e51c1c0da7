//! `SeaORM` implementation of the `AuthService` trait.

use crate::config::SecurityConfig;
use crate::db::repositories::user::{is_unique_violation, verify_password};
use crate::db::{Store, StoredSecret, User};
use crate::services::auth_service::{
    AccountInfo, AuthError, AuthService, EMPTY_CREDENTIALS, INCORRECT_CURRENT_PASSWORD,
    INCORRECT_PASSWORD,
};
use async_trait::async_trait;
use tracing::{debug, info, warn};

pub struct SeaOrmAuthService {
    store: Store,
    policy: SecurityConfig,
}

impl SeaOrmAuthService {
    #[must_use]
    pub const fn new(store: Store, policy: SecurityConfig) -> Self {
        Self { store, policy }
    }

    fn validate_registration(&self, username: &str, password: &str) -> Result<(), AuthError> {
        if username.is_empty() || password.is_empty() {
            return Err(AuthError::Validation(EMPTY_CREDENTIALS.to_string()));
        }

        if username.chars().count() < self.policy.min_username_length {
            return Err(AuthError::Validation(format!(
                "Username must be at least {} characters",
                self.policy.min_username_length
            )));
        }

        if password.chars().count() < self.policy.min_password_length {
            return Err(AuthError::Validation(format!(
                "Password must be at least {} characters",
                self.policy.min_password_length
            )));
        }

        Ok(())
    }

    /// Looks the user up and checks `password`, handing back the secret that
    /// was verified so callers can make a conditional write against it.
    async fn verify(
        &self,
        username: &str,
        password: &str,
    ) -> Result<(User, StoredSecret), AuthError> {
        if username.is_empty() || password.is_empty() {
            return Err(AuthError::Validation(EMPTY_CREDENTIALS.to_string()));
        }

        let (user, secret) = self
            .store
            .get_user_with_secret(username)
            .await?
            .ok_or_else(|| AuthError::NotFound(username.to_string()))?;

        if !verify_password(password, &secret) {
            return Err(AuthError::InvalidCredentials(INCORRECT_PASSWORD));
        }

        Ok((user, secret))
    }
}

#[async_trait]
impl AuthService for SeaOrmAuthService {
    async fn register(&self, username: &str, password: &str) -> Result<AccountInfo, AuthError> {
        self.validate_registration(username, password)?;

        let secret = StoredSecret::derive(password);

        // Rely on the UNIQUE constraint rather than a lookup first; two
        // registrations racing for one name can't both get through.
        match self.store.create_user(username, &secret).await {
            Ok(user) => {
                info!(username = %user.username, id = user.id, "Account registered");
                Ok(user.into())
            }
            Err(err) if is_unique_violation(&err) => {
                debug!(username, "Registration rejected: username taken");
                Err(AuthError::DuplicateUsername(username.to_string()))
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<AccountInfo, AuthError> {
        match self.verify(username, password).await {
            Ok((user, _)) => {
                info!(username = %user.username, "Login succeeded");
                Ok(user.into())
            }
            Err(err) => {
                if matches!(err, AuthError::InvalidCredentials(_)) {
                    warn!(username, "Login failed: wrong password");
                }
                Err(err)
            }
        }
    }

    async fn change_password(
        &self,
        username: &str,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), AuthError> {
        let (_, current) = match self.verify(username, current_password).await {
            Ok(verified) => verified,
            Err(AuthError::Storage(e)) => return Err(AuthError::Storage(e)),
            Err(_) => {
                warn!(username, "Password change rejected: current password did not verify");
                return Err(AuthError::InvalidCredentials(INCORRECT_CURRENT_PASSWORD));
            }
        };

        if new_password.chars().count() < self.policy.min_password_length {
            return Err(AuthError::Validation(format!(
                "New password must be at least {} characters",
                self.policy.min_password_length
            )));
        }

        let replacement = StoredSecret::derive(new_password);

        let updated = self
            .store
            .replace_user_secret(username, &current.password_hash, &replacement)
            .await?;

        if !updated {
            // The row changed (or vanished) between verify and write.
            warn!(username, "Password change lost a race with another update");
            return Err(AuthError::InvalidCredentials(INCORRECT_CURRENT_PASSWORD));
        }

        info!(username, "Password changed");
        Ok(())
    }

    async fn delete_account(&self, username: &str) -> Result<bool, AuthError> {
        let removed = self.store.delete_user(username).await?;

        if removed {
            info!(username, "Account deleted");
        } else {
            debug!(username, "Delete requested for unknown account");
        }

        Ok(removed)
    }

    async fn exists(&self, username: &str) -> Result<bool, AuthError> {
        Ok(self.store.user_exists(username).await?)
    }

    async fn list_accounts(&self) -> Result<Vec<AccountInfo>, AuthError> {
        let users = self.store.list_users().await?;
        Ok(users.into_iter().map(AccountInfo::from).collect())
    }
}
