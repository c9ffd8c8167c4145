//! # Utilities Library
//!
//! Shared helpers for environment variables and input validation.

pub mod envs;
pub mod validation;

// Re-export commonly used functions
pub use envs::{get_env, get_env_opt, get_env_or, get_env_parse};
pub use validation::{parse_int, validate_email, validate_max_bytes, validate_not_empty};
