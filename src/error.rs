//! Error types
//!
//! Nothing here is allowed to escape the per-tick boundary; callers either
//! clamp upstream (projection), fall back (generation) or warn and continue
//! (persistence).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GameError {
    /// Projection called with out-of-domain inputs. A programming error:
    /// geometry behind the camera must be filtered before projecting.
    #[error("invalid projection argument: {0}")]
    InvalidArgument(&'static str),

    /// Curvature rerolls exhausted while avoiding a sharp S-turn. The
    /// generator falls back to a straight segment; never fatal.
    #[error("curvature rerolls exhausted after {retries} attempts")]
    GenerationExhausted { retries: u32 },

    /// High-score load/save failed. The game continues with in-memory
    /// scores only.
    #[error("high-score persistence unavailable: {0}")]
    Persistence(#[from] std::io::Error),

    /// A persisted JSON file exists but does not parse.
    #[error("persisted file unreadable: {0}")]
    Encoding(#[from] serde_json::Error),
}
