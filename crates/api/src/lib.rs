//! Slidecast coordinator library.
//!
//! Exposes the building blocks (config, state, error handling, routes, the
//! coordinator itself) so integration tests and the binary entrypoint can
//! both access them.

pub mod config;
pub mod coordinator;
pub mod error;
pub mod routes;
pub mod state;
