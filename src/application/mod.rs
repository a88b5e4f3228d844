//! Application layer: service orchestration on top of the domain.

pub mod services;
