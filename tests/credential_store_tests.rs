//! Integration tests for the account store against an on-disk SQLite file.

use std::path::PathBuf;

use userauth::config::SecurityConfig;
use userauth::db::Store;
use userauth::db::repositories::user::hash_password;
use userauth::services::{AuthError, AuthService, SeaOrmAuthService};

fn temp_db() -> (PathBuf, String) {
    let db_path =
        std::env::temp_dir().join(format!("userauth-store-test-{}.db", uuid::Uuid::new_v4()));
    let url = format!("sqlite:{}", db_path.display());
    (db_path, url)
}

async fn open(url: &str) -> (Store, SeaOrmAuthService) {
    let store = Store::new(url).await.expect("failed to open store");
    let auth = SeaOrmAuthService::new(store.clone(), SecurityConfig::default());
    (store, auth)
}

#[tokio::test]
async fn test_alice_walkthrough() {
    let (path, url) = temp_db();
    let (store, auth) = open(&url).await;

    auth.register("alice", "secret1").await.unwrap();
    auth.authenticate("alice", "secret1").await.unwrap();

    let err = auth.authenticate("alice", "wrong").await.unwrap_err();
    assert!(matches!(err, AuthError::InvalidCredentials(_)));

    let err = auth.register("alice", "other12").await.unwrap_err();
    assert!(matches!(err, AuthError::DuplicateUsername(_)));

    assert!(auth.authenticate("alice", "secret1").await.is_ok());

    store.close().await.unwrap();
    let _ = std::fs::remove_file(&path);
}

#[tokio::test]
async fn test_accounts_survive_reopen() {
    let (path, url) = temp_db();

    let (store, auth) = open(&url).await;
    auth.register("alice", "secret1").await.unwrap();
    auth.change_password("alice", "secret1", "rotated1")
        .await
        .unwrap();
    store.close().await.unwrap();

    assert!(path.exists());

    let (store, auth) = open(&url).await;
    assert!(auth.exists("alice").await.unwrap());
    assert!(auth.authenticate("alice", "rotated1").await.is_ok());
    assert!(auth.authenticate("alice", "secret1").await.is_err());

    store.close().await.unwrap();
    let _ = std::fs::remove_file(&path);
}

#[tokio::test]
async fn test_stored_row_holds_salted_digest_not_plaintext() {
    let (path, url) = temp_db();
    let (store, auth) = open(&url).await;

    auth.register("alice", "secret1").await.unwrap();

    let (user, secret) = store
        .get_user_with_secret("alice")
        .await
        .unwrap()
        .expect("row missing");

    assert_eq!(user.username, "alice");
    assert_eq!(secret.salt.len(), 64);
    assert_eq!(secret.password_hash.len(), 64);
    assert_eq!(secret.password_hash, hash_password("secret1", &secret.salt));
    assert!(!secret.password_hash.contains("secret1"));

    store.close().await.unwrap();
    let _ = std::fs::remove_file(&path);
}

#[tokio::test]
async fn test_ids_increase_and_are_not_reused() {
    let (path, url) = temp_db();
    let (store, auth) = open(&url).await;

    auth.register("alice", "secret1").await.unwrap();
    auth.register("bobby", "secret1").await.unwrap();
    let bobby = store.get_user_by_username("bobby").await.unwrap().unwrap();

    auth.delete_account("bobby").await.unwrap();
    auth.register("carol", "secret1").await.unwrap();
    let carol = store.get_user_by_username("carol").await.unwrap().unwrap();

    assert!(carol.id > bobby.id);

    store.close().await.unwrap();
    let _ = std::fs::remove_file(&path);
}

#[tokio::test]
async fn test_list_reports_creation_time() {
    let (path, url) = temp_db();
    let (store, auth) = open(&url).await;

    auth.register("alice", "secret1").await.unwrap();
    auth.register("bobby", "secret2").await.unwrap();

    let accounts = auth.list_accounts().await.unwrap();
    assert_eq!(accounts.len(), 2);
    assert_eq!(accounts[0].username, "alice");
    assert_eq!(accounts[1].username, "bobby");
    // SQLite CURRENT_TIMESTAMP: "YYYY-MM-DD HH:MM:SS"
    assert_eq!(accounts[0].created_at.len(), 19);

    store.close().await.unwrap();
    let _ = std::fs::remove_file(&path);
}

#[tokio::test]
async fn test_store_creates_missing_directories() {
    let dir = std::env::temp_dir().join(format!("userauth-dir-test-{}", uuid::Uuid::new_v4()));
    let db_path = dir.join("nested").join("users.db");
    let url = format!("sqlite:{}", db_path.display());

    let store = Store::new(&url).await.unwrap();
    store.ping().await.unwrap();
    store.close().await.unwrap();

    assert!(db_path.exists());
    let _ = std::fs::remove_dir_all(&dir);
}
