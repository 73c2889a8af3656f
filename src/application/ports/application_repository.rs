use async_trait::async_trait;
use uuid::Uuid;

use crate::application::ports::RepositoryError;
use crate::domain::applications::application::{
    ApplicantProfile, Application, ApplicationStatus,
};

#[derive(Debug, Clone)]
pub struct NewApplication {
    pub id: Uuid,
    pub user_id: Uuid,
    pub profile: ApplicantProfile,
    pub status: ApplicationStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[async_trait]
pub trait ApplicationRepository: Send + Sync {
    /// Fails with `RepositoryError::Conflict` when the user already has an
    /// application.
    async fn insert(&self, application: &NewApplication) -> Result<Application, RepositoryError>;
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Application>>;
    async fn find_by_user(&self, user_id: Uuid) -> anyhow::Result<Option<Application>>;
    /// Newest first.
    async fn list_all(&self) -> anyhow::Result<Vec<Application>>;
    async fn update_status(
        &self,
        id: Uuid,
        status: ApplicationStatus,
    ) -> anyhow::Result<Option<Application>>;
}
