use tracing::info;
use uuid::Uuid;

use crate::application::access::{self, Actor};
use crate::application::ports::application_repository::ApplicationRepository;
use crate::application::use_cases::applications::ApplicationError;
use crate::domain::applications::application::{Application, ApplicationStatus};

pub struct UpdateApplicationStatus<'a, A: ApplicationRepository + ?Sized> {
    pub applications: &'a A,
}

impl<'a, A: ApplicationRepository + ?Sized> UpdateApplicationStatus<'a, A> {
    /// Any status may follow any other; there are no terminal states.
    pub async fn execute(
        &self,
        actor: &Actor,
        id: Uuid,
        status: ApplicationStatus,
    ) -> Result<Application, ApplicationError> {
        access::require_admin(actor)?;
        let application = self
            .applications
            .update_status(id, status)
            .await
            .map_err(ApplicationError::Repository)?
            .ok_or(ApplicationError::NotFound)?;
        info!(
            application_id = %id,
            admin_id = %actor.user_id,
            status = %status,
            "application_status_updated"
        );
        Ok(application)
    }
}
