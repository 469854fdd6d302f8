//! Entity store: generation-tagged ids and one table per component kind.

pub mod entity;
pub mod world;

pub use entity::EntityAllocator;
pub use world::{occupied, World};
