//! Core types and definitions for the Barrage emission simulation.
//!
//! This crate defines the vocabulary shared across the other crates:
//! geometry, timed values, pattern geometry, components, events,
//! frame snapshots and constants. It has no runtime dependencies.

pub mod components;
pub mod constants;
pub mod error;
pub mod events;
pub mod pattern;
pub mod state;
pub mod timing;
pub mod types;

#[cfg(test)]
mod tests;
