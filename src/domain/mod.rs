pub mod applications;
pub mod users;
