//! Barrage simulation engine.
//!
//! Headless, deterministic simulation: entity store, cron scheduler,
//! bullet/pattern factories, the per-frame system pipeline and the
//! scenario timeline. `SimulationEngine` ties them together and is the
//! only object a driver needs to hold.

pub mod actions;
pub mod cron;
pub mod ecs;
pub mod engine;
pub mod error;
pub mod factory;
pub mod hud;
pub mod scenario;
pub mod systems;
pub mod world_setup;
