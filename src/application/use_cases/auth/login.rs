use crate::application::ports::user_repository::UserRepository;
use crate::application::services::passwords::{verify_absent_account, verify_password};
use crate::domain::users::user::User;

pub struct Login<'a, R: UserRepository + ?Sized> {
    pub repo: &'a R,
}

#[derive(Debug, Clone)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(thiserror::Error, Debug)]
pub enum LoginError {
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("failed to load account")]
    Repository(#[source] anyhow::Error),
}

impl<'a, R: UserRepository + ?Sized> Login<'a, R> {
    /// Unknown email and wrong password are reported identically and both pay
    /// for a password verification.
    pub async fn execute(&self, req: &LoginRequest) -> Result<User, LoginError> {
        let Some(user) = self
            .repo
            .find_by_email(&req.email)
            .await
            .map_err(LoginError::Repository)?
        else {
            verify_absent_account(&req.password);
            return Err(LoginError::InvalidCredentials);
        };
        if verify_password(&req.password, &user.password_hash) {
            Ok(user)
        } else {
            Err(LoginError::InvalidCredentials)
        }
    }
}
