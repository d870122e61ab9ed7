//! User Cache - user records with a read-through display-name cache
//!
//! Names are cached for ten minutes on create and on lookup misses, and
//! are never invalidated early.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod password;
pub mod records;
pub mod repository;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use repository::UserCacheRepository;
pub use tasks::spawn_cleanup_task;
