use crate::application::access::AccessError;

pub mod get_application;
pub mod get_by_user;
pub mod list_applications;
pub mod submit;
pub mod update_status;


#[derive(thiserror::Error, Debug)]
pub enum ApplicationError {
    #[error("{0}")]
    InvalidInput(String),
    #[error("application not found")]
    NotFound,
    #[error("not allowed to access this application")]
    Forbidden,
    #[error("an application has already been submitted for this account")]
    AlreadySubmitted,
    #[error("account no longer exists")]
    UnknownUser,
    #[error("application store failure")]
    Repository(#[source] anyhow::Error),
}

impl From<AccessError> for ApplicationError {
    fn from(err: AccessError) -> Self {
        match err {
            AccessError::Forbidden => ApplicationError::Forbidden,
        }
    }
}
