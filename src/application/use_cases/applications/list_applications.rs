use crate::application::access::{self, Actor};
use crate::application::ports::application_repository::ApplicationRepository;
use crate::application::use_cases::applications::ApplicationError;
use crate::domain::applications::application::Application;

pub struct ListApplications<'a, A: ApplicationRepository + ?Sized> {
    pub applications: &'a A,
}

impl<'a, A: ApplicationRepository + ?Sized> ListApplications<'a, A> {
    pub async fn execute(&self, actor: &Actor) -> Result<Vec<Application>, ApplicationError> {
        access::require_admin(actor)?;
        self.applications
            .list_all()
            .await
            .map_err(ApplicationError::Repository)
    }
}
