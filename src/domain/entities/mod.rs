//! Core business entities.

pub mod click;
pub mod url_mapping;

pub use click::NewClick;
pub use url_mapping::{NewUrl, UrlMapping};
