use uuid::Uuid;

use crate::domain::users::user::Role;

/// Authenticated caller, built by the presentation layer from session claims.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub user_id: Uuid,
    pub role: Role,
}

impl Actor {
    pub fn new(user_id: Uuid, role: Role) -> Self {
        Self { user_id, role }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessError {
    #[error("administrator role required")]
    Forbidden,
}

pub fn require_admin(actor: &Actor) -> Result<(), AccessError> {
    if actor.is_admin() {
        Ok(())
    } else {
        Err(AccessError::Forbidden)
    }
}

/// Applications are visible to their owner and to administrators.
pub fn ensure_owner_or_admin(actor: &Actor, owner_id: Uuid) -> Result<(), AccessError> {
    if actor.is_admin() || actor.user_id == owner_id {
        Ok(())
    } else {
        Err(AccessError::Forbidden)
    }
}
