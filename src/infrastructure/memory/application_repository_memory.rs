use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::application::ports::RepositoryError;
use crate::application::ports::application_repository::{ApplicationRepository, NewApplication};
use crate::domain::applications::application::{Application, ApplicationStatus};

#[derive(Default)]
pub struct MemoryApplicationRepository {
    applications: RwLock<HashMap<Uuid, Application>>,
}

impl MemoryApplicationRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ApplicationRepository for MemoryApplicationRepository {
    async fn insert(&self, application: &NewApplication) -> Result<Application, RepositoryError> {
        let mut applications = self.applications.write().await;
        if applications.contains_key(&application.id)
            || applications
                .values()
                .any(|a| a.user_id == application.user_id)
        {
            return Err(RepositoryError::Conflict);
        }
        let row = Application {
            id: application.id,
            user_id: application.user_id,
            profile: application.profile.clone(),
            status: application.status,
            created_at: application.created_at,
        };
        applications.insert(row.id, row.clone());
        Ok(row)
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Application>> {
        Ok(self.applications.read().await.get(&id).cloned())
    }

    async fn find_by_user(&self, user_id: Uuid) -> anyhow::Result<Option<Application>> {
        let applications = self.applications.read().await;
        Ok(applications
            .values()
            .find(|a| a.user_id == user_id)
            .cloned())
    }

    async fn list_all(&self) -> anyhow::Result<Vec<Application>> {
        let mut items: Vec<Application> =
            self.applications.read().await.values().cloned().collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(items)
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: ApplicationStatus,
    ) -> anyhow::Result<Option<Application>> {
        let mut applications = self.applications.write().await;
        Ok(applications.get_mut(&id).map(|a| {
            a.status = status;
            a.clone()
        }))
    }
}
