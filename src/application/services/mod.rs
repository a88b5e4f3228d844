//! Business logic services orchestrating repositories.

pub mod link_service;

pub use link_service::LinkService;
