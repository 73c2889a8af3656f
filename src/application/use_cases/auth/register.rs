use once_cell::sync::Lazy;
use regex::Regex;

use crate::application::ports::RepositoryError;
use crate::application::ports::user_repository::{NewUser, UserRepository};
use crate::application::services::passwords::hash_password;
use crate::domain::users::user::{Role, User, normalize_email};

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid regex"));

pub const MIN_PASSWORD_LEN: usize = 6;

pub struct Register<'a, R: UserRepository + ?Sized> {
    pub repo: &'a R,
}

#[derive(Debug, Clone)]
pub struct RegisterRequest {
    pub email: String,
    pub name: String,
    pub phone: Option<String>,
    pub password: String,
}

#[derive(thiserror::Error, Debug)]
pub enum RegisterError {
    #[error("{0}")]
    InvalidInput(String),
    #[error("an account with this email already exists")]
    DuplicateAccount,
    #[error("failed to hash password")]
    Hash(#[source] anyhow::Error),
    #[error("failed to persist account")]
    Repository(#[source] anyhow::Error),
}

impl<'a, R: UserRepository + ?Sized> Register<'a, R> {
    /// Self-service registration; accounts created here are always applicants.
    pub async fn execute(&self, req: &RegisterRequest) -> Result<User, RegisterError> {
        self.create(req, Role::Applicant).await
    }

    pub(crate) async fn create(
        &self,
        req: &RegisterRequest,
        role: Role,
    ) -> Result<User, RegisterError> {
        let email = normalize_email(&req.email);
        if !EMAIL_RE.is_match(&email) {
            return Err(RegisterError::InvalidInput("email is not valid".into()));
        }
        let name = req.name.trim();
        if name.is_empty() {
            return Err(RegisterError::InvalidInput("name is required".into()));
        }
        if req.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(RegisterError::InvalidInput(format!(
                "password must be at least {MIN_PASSWORD_LEN} characters"
            )));
        }

        if self
            .repo
            .find_by_email(&email)
            .await
            .map_err(RegisterError::Repository)?
            .is_some()
        {
            return Err(RegisterError::DuplicateAccount);
        }

        let password_hash = hash_password(&req.password).map_err(RegisterError::Hash)?;
        let phone = req
            .phone
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_string);
        let new_user = NewUser {
            email,
            name: name.to_string(),
            phone,
            password_hash,
            role,
        };
        // The lookup above is advisory; the store's unique constraint decides races.
        match self.repo.create_user(&new_user).await {
            Ok(user) => Ok(user),
            Err(RepositoryError::Conflict) => Err(RegisterError::DuplicateAccount),
            Err(RepositoryError::Other(e)) => Err(RegisterError::Repository(e)),
        }
    }
}
