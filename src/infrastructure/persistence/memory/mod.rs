//! In-process repositories backed by `tokio::sync::RwLock`
//!
//! They enforce the same uniqueness rules as the Postgres schema, using the
//! same constraint names, so workflow tests exercise the real error paths.

mod session_repository;
mod user_repository;

pub use session_repository::InMemorySessionRepository;
pub use user_repository::InMemoryUserRepository;
