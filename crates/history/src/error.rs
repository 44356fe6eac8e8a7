use core_types::{Pocket, WheelVariant};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HistoryError {
    #[error("{pocket} is not a pocket on the {variant} wheel")]
    InvalidNumber { pocket: Pocket, variant: WheelVariant },

    #[error("History capacity must be at least 1 (use None for an unbounded history)")]
    ZeroCapacity,
}
