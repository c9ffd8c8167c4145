//! # Web Library
//!
//! HTTP handlers, middleware, and server setup for the user service.

pub mod handlers;
pub mod middleware;
pub mod server;

#[cfg(test)]
pub(crate) mod test_utils;

pub use lib_core::{init_config, Config};
pub use server::{create_router, init_tracing, start_server, AppState};
