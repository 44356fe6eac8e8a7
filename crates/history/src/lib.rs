//! # Spinstat History Store
//!
//! The append-only record of validated spins for one session.
//!
//! - `History` is the only mutable state in the analysis pipeline. `append` is its sole
//!   mutator besides the whole-history `reset`.
//! - `HistoryView` is an owned copy taken by `History::snapshot_view`. Analyzers only
//!   ever see a view, so they observe either the pre-append or post-append state in full.

pub mod error;
pub mod store;

pub use error::HistoryError;
pub use store::{History, HistoryView};
