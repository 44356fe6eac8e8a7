//! # Spinstat Engine
//!
//! The session facade the interface layer talks to. A `RouletteEngine` owns one
//! `History`, the `WheelLayout` it validates against and a `SnapshotCache`; every other
//! component it calls is pure.
//!
//! There is no process-wide state: callers hold the engine and pass it by reference.

use analytics::{AnalysisSnapshot, ReportBuilder};
use chrono::Utc;
use configuration::error::ConfigError;
use configuration::EngineConfig;
use core_types::{Outcome, Pocket, WheelLayout};
use history::History;
use std::sync::Arc;
use uuid::Uuid;

pub mod cache;
pub mod error;

// Re-export the key components to create a clean, public-facing API.
pub use cache::SnapshotCache;
pub use error::EngineError;

/// One roulette analysis session.
#[derive(Debug)]
pub struct RouletteEngine {
    session_id: Uuid,
    config: EngineConfig,
    layout: Arc<WheelLayout>,
    history: History,
    builder: ReportBuilder,
    cache: SnapshotCache,
}

impl RouletteEngine {
    /// Creates a session for the wheel and limits described by `config`.
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        config.validate()?;
        let builder = ReportBuilder::new(&config)?;
        let layout = Arc::new(WheelLayout::new(config.wheel_variant));
        let history = History::new(Arc::clone(&layout), config.max_history_length)
            .map_err(|e| ConfigError::ValidationError(e.to_string()))?;
        let session_id = Uuid::new_v4();

        tracing::info!(
            %session_id,
            variant = %config.wheel_variant,
            max_history = ?config.max_history_length,
            half_life = config.recency_half_life,
            "Roulette session started"
        );

        Ok(Self {
            session_id,
            config,
            layout,
            history,
            builder,
            cache: SnapshotCache::new(),
        })
    }

    /// Validates and records one spin. On error the history is unchanged.
    pub fn record_outcome(&mut self, pocket: Pocket) -> Result<Outcome, EngineError> {
        match self.history.append_at(pocket, Some(Utc::now())) {
            Ok(outcome) => {
                self.cache.invalidate();
                Ok(outcome)
            }
            Err(e) => {
                tracing::warn!(session_id = %self.session_id, error = %e, "Rejected outcome");
                Err(e.into())
            }
        }
    }

    /// Records every spin or, if any is invalid, none of them.
    pub fn record_outcomes(&mut self, pockets: &[Pocket]) -> Result<Vec<Outcome>, EngineError> {
        match self.history.append_all(pockets, Some(Utc::now())) {
            Ok(outcomes) => {
                if !outcomes.is_empty() {
                    self.cache.invalidate();
                }
                Ok(outcomes)
            }
            Err(e) => {
                tracing::warn!(session_id = %self.session_id, error = %e, "Rejected outcome batch");
                Err(e.into())
            }
        }
    }

    /// Clears the history and starts a new session id.
    pub fn reset_session(&mut self) {
        self.history.reset();
        self.cache.invalidate();
        let previous = std::mem::replace(&mut self.session_id, Uuid::new_v4());
        tracing::info!(%previous, session_id = %self.session_id, "Session reset");
    }

    /// The snapshot of the current history, rebuilt only after a mutation.
    pub fn get_snapshot(&mut self) -> Arc<AnalysisSnapshot> {
        let key = self.history.last_sequence_index();
        let history = &self.history;
        let builder = &self.builder;
        let layout = &self.layout;
        self.cache
            .get_or_insert_with(key, || builder.build(&history.snapshot_view(), layout))
    }

    pub fn get_wheel_layout(&self) -> &WheelLayout {
        &self.layout
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// `(hits, misses)` of the snapshot cache.
    pub fn cache_stats(&self) -> (u64, u64) {
        self.cache.stats()
    }
}
