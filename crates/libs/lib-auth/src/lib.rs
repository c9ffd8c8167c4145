//! # Authentication Library
//!
//! Password hashing and JWT token management.

pub mod error;
pub mod pwd;
pub mod token;

// Re-export commonly used types
pub use error::{Error, Result};
pub use pwd::{hash_password, verify_password, MAX_PASSWORD_BYTES};
pub use pwd::{DEFAULT_COST as DEFAULT_BCRYPT_COST, MAX_COST as MAX_BCRYPT_COST, MIN_COST as MIN_BCRYPT_COST};
pub use token::{decode_jwt, encode_jwt, Claims};
