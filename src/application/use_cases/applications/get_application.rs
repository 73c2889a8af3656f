use uuid::Uuid;

use crate::application::access::{self, Actor};
use crate::application::ports::application_repository::ApplicationRepository;
use crate::application::use_cases::applications::ApplicationError;
use crate::domain::applications::application::Application;

pub struct GetApplication<'a, A: ApplicationRepository + ?Sized> {
    pub applications: &'a A,
}

impl<'a, A: ApplicationRepository + ?Sized> GetApplication<'a, A> {
    pub async fn execute(&self, actor: &Actor, id: Uuid) -> Result<Application, ApplicationError> {
        let application = self
            .applications
            .find_by_id(id)
            .await
            .map_err(ApplicationError::Repository)?
            .ok_or(ApplicationError::NotFound)?;
        access::ensure_owner_or_admin(actor, application.user_id)?;
        Ok(application)
    }
}
