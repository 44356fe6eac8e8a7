//! # Spinstat Analytics Engine
//!
//! This crate derives every numeric summary of a spin history. It is the statistical
//! core of the workspace.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** A pure logic crate. It reads a `HistoryView` and a `WheelLayout`
//!   and never touches the live `History`.
//! - **Stateless Calculation:** The analyzers hold configuration only. The same view
//!   always produces the same `AnalysisSnapshot`, so snapshots may be cached by the
//!   caller and analyzers may run concurrently on shared views.
//!
//! ## Public API
//!
//! - `FrequencyAnalyzer`: per-pocket, per-attribute, side-of-zero and inside-bet counts
//!   plus chi-square bias scores.
//! - `analyze_streaks`: run-length statistics per attribute kind.
//! - `HotColdRanker`: recency-weighted hot and cold rankings.
//! - `ReportBuilder`: composes the above into one immutable `AnalysisSnapshot`.

// Declare the modules that constitute this crate.
pub mod builder;
pub mod error;
pub mod frequency;
pub mod hot_cold;
pub mod report;
pub mod streaks;

// Re-export the key components to create a clean, public-facing API.
pub use builder::{build, ReportBuilder};
pub use error::AnalyticsError;
pub use frequency::{chi_square_survival, FrequencyAnalysis, FrequencyAnalyzer};
pub use hot_cold::HotColdRanker;
pub use report::{
    AnalysisSnapshot, BiasScore, FrequencyEntry, InsideBetTables, RankedPocket, StreakStats,
};
pub use streaks::analyze_streaks;
