//! Systems that operate on the world each frame.
//!
//! Systems are free functions over `&mut World` plus whatever else they
//! need. They own no state; everything lives in components. The engine runs
//! them in the order listed here.

pub mod fade;
pub mod aim;
pub mod rotate;
pub mod emission;
pub mod angular_momentum;
pub mod bounce;
pub mod movement;
pub mod visual_sync;
pub mod bounds_cull;
pub mod lifetime;
pub mod snapshot;
