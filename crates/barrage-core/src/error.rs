//! Errors raised while constructing pattern descriptions.

use thiserror::Error;

/// A pattern description that cannot drive an emitter.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PatternError {
    #[error("heartbeat pattern is empty")]
    EmptyHeartbeat,
    #[error("unknown heartbeat symbol {0:?} (expected '#' or '.')")]
    UnknownBeatSymbol(char),
    #[error("heartbeat period must be positive and finite, got {0}")]
    InvalidPeriod(f32),
    #[error("ring needs at least one slot")]
    ZeroRingCount,
    #[error("bullet source must emit at least one bullet")]
    ZeroBullets,
    #[error("{0} is not finite")]
    NonFinite(&'static str),
    #[error("ring width must not be negative, got {0}")]
    NegativeWidth(f32),
}
