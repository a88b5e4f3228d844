//! Infrastructure layer: database and cache integrations.

pub mod cache;
pub mod persistence;
