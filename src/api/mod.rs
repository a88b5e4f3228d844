//! REST API layer for HTTP request/response handling.
//!
//! - [`dto`] - request/response serialization types
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - rate limiting and request tracing
//! - [`routes`] - route configuration

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
