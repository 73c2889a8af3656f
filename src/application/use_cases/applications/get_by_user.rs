use uuid::Uuid;

use crate::application::access::{self, Actor};
use crate::application::ports::application_repository::ApplicationRepository;
use crate::application::use_cases::applications::ApplicationError;
use crate::domain::applications::application::Application;

pub struct GetUserApplication<'a, A: ApplicationRepository + ?Sized> {
    pub applications: &'a A,
}

impl<'a, A: ApplicationRepository + ?Sized> GetUserApplication<'a, A> {
    pub async fn execute(
        &self,
        actor: &Actor,
        user_id: Uuid,
    ) -> Result<Application, ApplicationError> {
        access::ensure_owner_or_admin(actor, user_id)?;
        self.applications
            .find_by_user(user_id)
            .await
            .map_err(ApplicationError::Repository)?
            .ok_or(ApplicationError::NotFound)
    }
}
