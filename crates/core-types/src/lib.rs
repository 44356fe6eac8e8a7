//! # Spinstat Core Types
//!
//! The shared vocabulary of the roulette analysis workspace: pockets, wheel variants,
//! attribute kinds, the static wheel layout and the validated `Outcome` record.
//!
//! As a Layer 0 crate it contains no analysis logic and depends on nothing else in
//! the workspace. Every other crate speaks in these types.

pub mod enums;
pub mod error;
pub mod layout;
pub mod structs;

// Re-export the core types to provide a clean public API.
pub use enums::{AttributeKind, AttributeValue, Sector, WheelSide, WheelVariant};
pub use error::CoreError;
pub use layout::WheelLayout;
pub use structs::{Outcome, Pocket, Split};
