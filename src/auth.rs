//! Credential handling. Passwords are stored as Argon2id PHC strings; the
//! login contract never reveals whether the username or the password was the
//! wrong half of the pair.

use argon2::password_hash::{rand_core::OsRng, SaltString};
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use rusqlite::Connection;

use crate::error::StoreError;
use crate::models::User;
use crate::repo;

/// Syntactically valid hash verified against when the username does not
/// exist, so both failure paths cost one Argon2 evaluation.
const DUMMY_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$c2Nob29sbWdtdC1kdW1teQ$AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";

pub fn hash_password(password: &str) -> Result<String, StoreError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| StoreError::Password(e.to_string()))?;
    Ok(hash.to_string())
}

pub fn verify_password(password: &str, hash: &str) -> bool {
    match PasswordHash::new(hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

/// Looks up the active user by username and checks the credential pair.
/// `Ok(None)` means "no such active user or wrong password", deliberately
/// undistinguished.
pub fn authenticate(
    conn: &Connection,
    username: &str,
    password: &str,
) -> Result<Option<User>, StoreError> {
    match repo::users::find_by_username(conn, username)? {
        Some(user) => {
            if verify_password(password, &user.password_hash) {
                Ok(Some(user))
            } else {
                Ok(None)
            }
        }
        None => {
            let _ = verify_password(password, DUMMY_HASH);
            Ok(None)
        }
    }
}

/// Re-hashes and stores a new password. Returns whether a row was affected.
pub fn change_password(
    conn: &Connection,
    user_id: i64,
    new_password: &str,
) -> Result<bool, StoreError> {
    let hash = hash_password(new_password)?;
    repo::users::set_password(conn, user_id, &hash)
}
