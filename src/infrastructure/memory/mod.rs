//! Process-local repositories selected with `PERSISTENCE_BACKEND=memory`.
//! Data is lost on restart.

pub mod application_repository_memory;
pub mod user_repository_memory;

pub use application_repository_memory::MemoryApplicationRepository;
pub use user_repository_memory::MemoryUserRepository;
