use anyhow::{Context, Result};
use rand::Rng;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set, SqlErr,
};
use sha2::{Digest, Sha256};

use crate::entities::{prelude::*, users};

/// Number of random bytes in a freshly generated salt.
pub const SALT_BYTES: usize = 32;

/// User data returned from repository (without password hash or salt)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub created_at: String,
}

impl From<users::Model> for User {
    fn from(model: users::Model) -> Self {
        Self {
            id: model.id,
            username: model.username,
            created_at: model.created_at,
        }
    }
}

/// The secret half of a user row: what a password is checked against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredSecret {
    pub password_hash: String,
    pub salt: String,
}

impl StoredSecret {
    /// Generates a fresh salt and derives the hash for `password`.
    #[must_use]
    pub fn derive(password: &str) -> Self {
        let salt = generate_salt();
        let password_hash = hash_password(password, &salt);
        Self {
            password_hash,
            salt,
        }
    }
}

pub struct UserRepository {
    conn: DatabaseConnection,
}

impl UserRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Insert a new user row. Fails with a unique-constraint error (see
    /// [`is_unique_violation`]) when the username is taken.
    pub async fn create(&self, username: &str, secret: &StoredSecret) -> Result<User> {
        let active = users::ActiveModel {
            username: Set(username.to_string()),
            password_hash: Set(secret.password_hash.clone()),
            salt: Set(secret.salt.clone()),
            ..Default::default()
        };

        let model = active
            .insert(&self.conn)
            .await
            .context("Failed to insert user")?;

        Ok(User::from(model))
    }

    /// Get user by username
    pub async fn get_by_username(&self, username: &str) -> Result<Option<User>> {
        let user = Users::find()
            .filter(users::Column::Username.eq(username))
            .one(&self.conn)
            .await
            .context("Failed to query user by username")?;

        Ok(user.map(User::from))
    }

    /// Get user by username together with the stored hash and salt
    pub async fn get_by_username_with_secret(
        &self,
        username: &str,
    ) -> Result<Option<(User, StoredSecret)>> {
        let user = Users::find()
            .filter(users::Column::Username.eq(username))
            .one(&self.conn)
            .await
            .context("Failed to query user for password verification")?;

        Ok(user.map(|u| {
            let secret = StoredSecret {
                password_hash: u.password_hash.clone(),
                salt: u.salt.clone(),
            };
            (User::from(u), secret)
        }))
    }

    pub async fn exists(&self, username: &str) -> Result<bool> {
        let count = Users::find()
            .filter(users::Column::Username.eq(username))
            .count(&self.conn)
            .await
            .context("Failed to check whether user exists")?;

        Ok(count > 0)
    }

    /// All users in insertion order.
    pub async fn list(&self) -> Result<Vec<User>> {
        let users = Users::find()
            .order_by_asc(users::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to list users")?;

        Ok(users.into_iter().map(User::from).collect())
    }

    /// Overwrite hash and salt in one statement, but only while the row still
    /// carries `expected_hash`. Returns `false` when nothing was updated.
    pub async fn replace_secret(
        &self,
        username: &str,
        expected_hash: &str,
        secret: &StoredSecret,
    ) -> Result<bool> {
        let changes = users::ActiveModel {
            password_hash: Set(secret.password_hash.clone()),
            salt: Set(secret.salt.clone()),
            ..Default::default()
        };

        let result = Users::update_many()
            .set(changes)
            .filter(users::Column::Username.eq(username))
            .filter(users::Column::PasswordHash.eq(expected_hash))
            .exec(&self.conn)
            .await
            .context("Failed to update user password")?;

        Ok(result.rows_affected == 1)
    }

    /// Delete by username. Returns whether a row was removed.
    pub async fn delete(&self, username: &str) -> Result<bool> {
        let result = Users::delete_many()
            .filter(users::Column::Username.eq(username))
            .exec(&self.conn)
            .await
            .context("Failed to delete user")?;

        Ok(result.rows_affected > 0)
    }
}

/// Generate a random salt (64 character hex string)
#[must_use]
pub fn generate_salt() -> String {
    let mut rng = rand::rng();
    let bytes: [u8; SALT_BYTES] = rng.random();
    to_hex(&bytes)
}

/// SHA-256 over the password text followed by the hex salt text.
#[must_use]
pub fn hash_password(password: &str, salt: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    hasher.update(salt.as_bytes());
    to_hex(&hasher.finalize())
}

/// Recompute the digest with the stored salt and compare.
///
/// Plain string equality, not constant-time.
#[must_use]
pub fn verify_password(password: &str, secret: &StoredSecret) -> bool {
    hash_password(password, &secret.salt) == secret.password_hash
}

/// True when `err` comes from the `UNIQUE` constraint on a column.
#[must_use]
pub fn is_unique_violation(err: &anyhow::Error) -> bool {
    err.downcast_ref::<DbErr>()
        .and_then(DbErr::sql_err)
        .is_some_and(|e| matches!(e, SqlErr::UniqueConstraintViolation(_)))
}

fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().fold(String::with_capacity(bytes.len() * 2), |mut acc, b| {
        use std::fmt::Write;
        let _ = write!(acc, "{b:02x}");
        acc
    })
}
