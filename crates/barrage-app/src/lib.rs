//! Barrage headless driver.
//!
//! Wires the simulation crates to a command line: configuration layering,
//! the frame loop and snapshot output. Rendering is left to whatever reads
//! the snapshot stream.

pub mod config;
pub mod game_loop;

pub use barrage_core as core;
