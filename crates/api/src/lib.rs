//! Campus records API server library.
//!
//! Everything the binary wires together lives here, public so the
//! integration tests can build the same router.

pub mod audit;
pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;
