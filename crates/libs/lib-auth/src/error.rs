//! # Authentication Errors

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// The hashing primitive rejected the input or its parameters.
    #[error("Failed to hash password: {0}")]
    Hashing(String),

    #[error("Failed to encode JWT: {0}")]
    TokenEncoding(String),

    /// Signature is well-formed but `exp` is in the past.
    #[error("Token has expired")]
    TokenExpired,

    #[error("Token signature is invalid")]
    TokenInvalidSignature,

    /// Not a decodable JWT (bad segments, base64, JSON or algorithm).
    #[error("Token is malformed: {0}")]
    TokenMalformed(String),
}
