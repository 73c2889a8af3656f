use tracing::info;

use crate::application::ports::user_repository::UserRepository;
use crate::application::use_cases::auth::register::{Register, RegisterError, RegisterRequest};
use crate::domain::users::user::{Role, User};

/// Ensures a bootstrap administrator account exists.
pub struct SeedAdmin<'a, R: UserRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: UserRepository + ?Sized> SeedAdmin<'a, R> {
    /// Returns `None` when an account with that email already exists; its
    /// role and password are left untouched.
    pub async fn execute(&self, req: &RegisterRequest) -> Result<Option<User>, RegisterError> {
        let register = Register { repo: self.repo };
        match register.create(req, Role::Admin).await {
            Ok(user) => {
                info!(user_id = %user.id, email = %user.email, "admin_account_seeded");
                Ok(Some(user))
            }
            Err(RegisterError::DuplicateAccount) => Ok(None),
            Err(e) => Err(e),
        }
    }
}
