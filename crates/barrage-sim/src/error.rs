//! Errors surfaced by the simulation engine.

use thiserror::Error;

use barrage_core::error::PatternError;
use barrage_core::types::EntityId;

use crate::scenario::ScenarioError;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("malformed pattern: {0}")]
    Pattern(#[from] PatternError),
    #[error("frame delta must be finite and non-negative, got {0}")]
    InvalidDelta(f64),
    #[error("pattern {entity} has a non-finite position")]
    NonFinitePosition { entity: EntityId },
    #[error(transparent)]
    Scenario(#[from] ScenarioError),
}
