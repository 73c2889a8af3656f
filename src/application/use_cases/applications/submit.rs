use tracing::info;

use crate::application::access::Actor;
use crate::application::ports::RepositoryError;
use crate::application::ports::application_repository::{ApplicationRepository, NewApplication};
use crate::application::ports::user_repository::UserRepository;
use crate::application::use_cases::applications::ApplicationError;
use crate::domain::applications::application::{
    ApplicantProfile, Application, ApplicationStatus,
};

pub struct SubmitApplication<'a, A, U>
where
    A: ApplicationRepository + ?Sized,
    U: UserRepository + ?Sized,
{
    pub applications: &'a A,
    pub users: &'a U,
}

impl<'a, A, U> SubmitApplication<'a, A, U>
where
    A: ApplicationRepository + ?Sized,
    U: UserRepository + ?Sized,
{
    /// The owner is always the acting user and the status always starts at
    /// `UNDER_REVIEW`.
    pub async fn execute(
        &self,
        actor: &Actor,
        profile: ApplicantProfile,
    ) -> Result<Application, ApplicationError> {
        let missing = profile.missing_fields();
        if !missing.is_empty() {
            return Err(ApplicationError::InvalidInput(format!(
                "missing required fields: {}",
                missing.join(", ")
            )));
        }

        self.users
            .find_by_id(actor.user_id)
            .await
            .map_err(ApplicationError::Repository)?
            .ok_or(ApplicationError::UnknownUser)?;

        if self
            .applications
            .find_by_user(actor.user_id)
            .await
            .map_err(ApplicationError::Repository)?
            .is_some()
        {
            return Err(ApplicationError::AlreadySubmitted);
        }

        let new_application = NewApplication {
            id: uuid::Uuid::new_v4(),
            user_id: actor.user_id,
            profile,
            status: ApplicationStatus::UnderReview,
            created_at: chrono::Utc::now(),
        };
        let application = match self.applications.insert(&new_application).await {
            Ok(a) => a,
            Err(RepositoryError::Conflict) => return Err(ApplicationError::AlreadySubmitted),
            Err(RepositoryError::Other(e)) => return Err(ApplicationError::Repository(e)),
        };
        info!(
            application_id = %application.id,
            user_id = %application.user_id,
            program = %application.profile.program,
            "application_submitted"
        );
        Ok(application)
    }
}
