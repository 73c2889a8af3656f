use async_trait::async_trait;
use sqlx::Row;
use sqlx::postgres::PgRow;
use sqlx::types::Json;
use uuid::Uuid;

use crate::application::ports::RepositoryError;
use crate::application::ports::application_repository::{ApplicationRepository, NewApplication};
use crate::domain::applications::application::{
    ApplicantProfile, Application, ApplicationStatus, DocumentRef, EducationRecord,
};
use crate::infrastructure::db::{PgPool, is_unique_violation};

const COLUMNS: &str = "id, user_id, full_name, email, phone, address, date_of_birth, program, \
     previous_education, document_urls, statement, status, created_at";

pub struct SqlxApplicationRepository {
    pub pool: PgPool,
}

impl SqlxApplicationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_application(r: &PgRow) -> anyhow::Result<Application> {
    let status: String = r.get("status");
    let Json(previous_education): Json<Vec<EducationRecord>> = r.try_get("previous_education")?;
    let Json(document_urls): Json<Vec<DocumentRef>> = r.try_get("document_urls")?;
    Ok(Application {
        id: r.get("id"),
        user_id: r.get("user_id"),
        profile: ApplicantProfile {
            full_name: r.get("full_name"),
            email: r.get("email"),
            phone: r.get("phone"),
            address: r.get("address"),
            date_of_birth: r.get("date_of_birth"),
            program: r.get("program"),
            previous_education,
            document_urls,
            statement: r.get("statement"),
        },
        status: status.parse()?,
        created_at: r.get("created_at"),
    })
}

#[async_trait]
impl ApplicationRepository for SqlxApplicationRepository {
    async fn insert(&self, application: &NewApplication) -> Result<Application, RepositoryError> {
        let p = &application.profile;
        let sql = format!(
            r#"INSERT INTO applications
                 (id, user_id, full_name, email, phone, address, date_of_birth, program,
                  previous_education, document_urls, statement, status, created_at)
               VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
               RETURNING {COLUMNS}"#
        );
        let res = sqlx::query(&sql)
            .bind(application.id)
            .bind(application.user_id)
            .bind(&p.full_name)
            .bind(&p.email)
            .bind(&p.phone)
            .bind(&p.address)
            .bind(&p.date_of_birth)
            .bind(&p.program)
            .bind(Json(&p.previous_education))
            .bind(Json(&p.document_urls))
            .bind(&p.statement)
            .bind(application.status.as_str())
            .bind(application.created_at)
            .fetch_one(&self.pool)
            .await;
        match res {
            Ok(row) => Ok(map_application(&row)?),
            Err(e) if is_unique_violation(&e) => Err(RepositoryError::Conflict),
            Err(e) => Err(RepositoryError::Other(e.into())),
        }
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Application>> {
        let sql = format!("SELECT {COLUMNS} FROM applications WHERE id = $1");
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(map_application).transpose()
    }

    async fn find_by_user(&self, user_id: Uuid) -> anyhow::Result<Option<Application>> {
        let sql = format!("SELECT {COLUMNS} FROM applications WHERE user_id = $1");
        let row = sqlx::query(&sql)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(map_application).transpose()
    }

    async fn list_all(&self) -> anyhow::Result<Vec<Application>> {
        let sql = format!("SELECT {COLUMNS} FROM applications ORDER BY created_at DESC");
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;
        rows.iter().map(map_application).collect()
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: ApplicationStatus,
    ) -> anyhow::Result<Option<Application>> {
        let sql = format!("UPDATE applications SET status = $2 WHERE id = $1 RETURNING {COLUMNS}");
        let row = sqlx::query(&sql)
            .bind(id)
            .bind(status.as_str())
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(map_application).transpose()
    }
}
