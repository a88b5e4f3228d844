//! Domain layer: entities, repository traits, and click tracking primitives.

pub mod click_event;
pub mod click_worker;
pub mod entities;
pub mod repositories;
