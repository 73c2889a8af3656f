use async_trait::async_trait;
use sqlx::Row;
use sqlx::postgres::PgRow;
use uuid::Uuid;

use crate::application::ports::RepositoryError;
use crate::application::ports::user_repository::{NewUser, UserRepository};
use crate::domain::users::user::{User, normalize_email};
use crate::infrastructure::db::{PgPool, is_unique_violation};

pub struct SqlxUserRepository {
    pub pool: PgPool,
}

impl SqlxUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_user(r: &PgRow) -> anyhow::Result<User> {
    let role: String = r.get("role");
    Ok(User {
        id: r.get("id"),
        email: r.get("email"),
        name: r.get("name"),
        phone: r.get("phone"),
        password_hash: r.get("password_hash"),
        role: role.parse()?,
        created_at: r.get("created_at"),
    })
}

#[async_trait]
impl UserRepository for SqlxUserRepository {
    async fn create_user(&self, user: &NewUser) -> Result<User, RepositoryError> {
        let res = sqlx::query(
            r#"INSERT INTO users (id, email, name, phone, password_hash, role)
               VALUES ($1, $2, $3, $4, $5, $6)
               RETURNING id, email, name, phone, password_hash, role, created_at"#,
        )
        .bind(Uuid::new_v4())
        .bind(normalize_email(&user.email))
        .bind(&user.name)
        .bind(&user.phone)
        .bind(&user.password_hash)
        .bind(user.role.as_str())
        .fetch_one(&self.pool)
        .await;
        match res {
            Ok(row) => Ok(map_user(&row)?),
            Err(e) if is_unique_violation(&e) => Err(RepositoryError::Conflict),
            Err(e) => Err(RepositoryError::Other(e.into())),
        }
    }

    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        let row = sqlx::query(
            r#"SELECT id, email, name, phone, password_hash, role, created_at
               FROM users WHERE email = $1"#,
        )
        .bind(normalize_email(email))
        .fetch_optional(&self.pool)
        .await?;
        row.as_ref().map(map_user).transpose()
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>> {
        let row = sqlx::query(
            r#"SELECT id, email, name, phone, password_hash, role, created_at
               FROM users WHERE id = $1"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        row.as_ref().map(map_user).transpose()
    }
}
