use std::sync::Arc;

use crate::application::ports::application_repository::ApplicationRepository;
use crate::application::ports::user_repository::UserRepository;
use crate::bootstrap::config::Config;
use crate::infrastructure::db::PgPool;
use crate::infrastructure::memory::{MemoryApplicationRepository, MemoryUserRepository};

#[derive(Clone)]
pub struct AppContext {
    pub cfg: Config,
    services: Arc<AppServices>,
}

#[derive(Clone)]
pub struct AppServices {
    user_repo: Arc<dyn UserRepository>,
    application_repo: Arc<dyn ApplicationRepository>,
    db_pool: Option<PgPool>,
}

impl AppServices {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        application_repo: Arc<dyn ApplicationRepository>,
        db_pool: Option<PgPool>,
    ) -> Self {
        Self {
            user_repo,
            application_repo,
            db_pool,
        }
    }

    pub fn postgres(pool: PgPool) -> Self {
        use crate::infrastructure::db::repositories::{
            application_repository_sqlx::SqlxApplicationRepository,
            user_repository_sqlx::SqlxUserRepository,
        };
        Self::new(
            Arc::new(SqlxUserRepository::new(pool.clone())),
            Arc::new(SqlxApplicationRepository::new(pool.clone())),
            Some(pool),
        )
    }

    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(MemoryUserRepository::new()),
            Arc::new(MemoryApplicationRepository::new()),
            None,
        )
    }
}

impl AppContext {
    pub fn new(cfg: Config, services: AppServices) -> Self {
        Self {
            cfg,
            services: Arc::new(services),
        }
    }

    pub fn user_repo(&self) -> Arc<dyn UserRepository> {
        self.services.user_repo.clone()
    }

    pub fn application_repo(&self) -> Arc<dyn ApplicationRepository> {
        self.services.application_repo.clone()
    }

    /// `None` when running on the in-memory store.
    pub fn db_pool(&self) -> Option<PgPool> {
        self.services.db_pool.clone()
    }
}
