//! Password hashing for accounts

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::error::AppError;
use crate::model::Account;

/// Hashes `password` with a fresh random salt, returning a PHC string.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| {
            tracing::error!("failed to hash password: {e}");
            AppError::PasswordHash
        })
}

/// Checks `password` against a stored PHC string.
///
/// A hash that does not parse never verifies.
pub fn verify_password(password: &str, password_hash: &str) -> bool {
    let parsed_hash = match PasswordHash::new(password_hash) {
        Ok(hash) => hash,
        Err(e) => {
            tracing::error!("stored password hash is malformed: {e}");
            return false;
        }
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}

/// [`hash_password`] on the blocking thread pool, off the async executor.
pub async fn hash_password_blocking(password: String) -> Result<String, AppError> {
    tokio::task::spawn_blocking(move || hash_password(&password)).await?
}

/// Returns the first account whose email and password both match.
///
/// Every candidate is checked, on the blocking thread pool since each
/// verification runs Argon2.
pub async fn find_by_credentials(
    accounts: Vec<Account>,
    email: String,
    password: String,
) -> Result<Option<Account>, AppError> {
    let account = tokio::task::spawn_blocking(move || {
        accounts.into_iter().find(|account| {
            account.email == email && verify_password(&password, &account.password_hash)
        })
    })
    .await?;

    Ok(account)
}
