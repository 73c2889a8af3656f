use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
};
use once_cell::sync::Lazy;
use password_hash::rand_core::OsRng;

pub(crate) static ABSENT_ACCOUNT_HASH: Lazy<Option<String>> =
    Lazy::new(|| hash_password("absent-account-placeholder").ok());

pub fn hash_password(password: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!(e.to_string()))?
        .to_string();
    Ok(hash)
}

/// A malformed stored hash never verifies.
pub fn verify_password(password: &str, hash: &str) -> bool {
    match PasswordHash::new(hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(e) => {
            tracing::warn!(error = %e, "stored_password_hash_unparseable");
            false
        }
    }
}

/// Spends one full Argon2 verification for a login whose email matched no
/// account, so the response takes as long as a wrong password.
pub fn verify_absent_account(password: &str) {
    if let Some(hash) = ABSENT_ACCOUNT_HASH.as_deref() {
        let _ = verify_password(password, hash);
    }
}
