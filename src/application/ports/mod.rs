pub mod application_repository;
pub mod user_repository;

/// Failure of a write that can collide with an existing row.
#[derive(thiserror::Error, Debug)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
