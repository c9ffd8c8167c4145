//! # Core Library
//!
//! Configuration, error taxonomy, the user model and its stores.

pub mod config;
pub mod dto;
pub mod error;
pub mod model;

// Re-export commonly used types
pub use config::{core_config, init_config, Config};
pub use error::{AppError, Result};
pub use model::store::{
    create_pool, ensure_schema, DbPool, MemoryUserStore, SqlUserStore, User, UserForCreate,
    UserStore, DEFAULT_ROLE,
};
