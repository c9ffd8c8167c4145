//! # Data Transfer Objects (DTOs)
//!
//! Request forms and response bodies of the REST API.

pub mod user;

pub use user::*;
