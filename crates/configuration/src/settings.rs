use crate::error::ConfigError;
use core_types::WheelVariant;
use serde::{Deserialize, Deserializer};

/// The spin history cap used when none is configured.
pub const DEFAULT_MAX_HISTORY_LENGTH: usize = 1000;

/// The root configuration structure for an analysis session.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EngineConfig {
    /// Which wheel the session records spins for.
    #[serde(default)]
    pub wheel_variant: WheelVariant,

    /// FIFO bound on the stored history. `None` keeps every spin.
    /// In TOML this is either a positive integer or the string "unbounded".
    #[serde(
        default = "default_max_history_length",
        deserialize_with = "deserialize_optional_count"
    )]
    pub max_history_length: Option<usize>,

    /// Number of spins after which an occurrence's hot/cold weight halves.
    #[serde(default = "default_recency_half_life")]
    pub recency_half_life: f64,

    /// p-value below which a bias score is flagged as significant.
    #[serde(default = "default_significance_level")]
    pub significance_level: f64,

    /// Sample size under which p-values are withheld.
    #[serde(default = "default_min_sample_size")]
    pub min_sample_size: usize,

    /// Truncates the hot and cold lists. `None` ranks every pocket.
    #[serde(default)]
    pub max_ranked: Option<usize>,

    /// Consecutive hits on one value that flag a streak alert. In TOML either a
    /// positive integer or "off".
    #[serde(
        default = "default_streak_alert_threshold",
        deserialize_with = "deserialize_optional_count"
    )]
    pub streak_alert_threshold: Option<usize>,
}

fn default_max_history_length() -> Option<usize> {
    Some(DEFAULT_MAX_HISTORY_LENGTH)
}

fn default_recency_half_life() -> f64 {
    10.0
}

fn default_significance_level() -> f64 {
    0.05
}

fn default_min_sample_size() -> usize {
    30
}

fn default_streak_alert_threshold() -> Option<usize> {
    Some(3)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawCount {
    Count(u64),
    Text(String),
}

// A count that may be switched off with a keyword.
fn deserialize_optional_count<'de, D>(deserializer: D) -> Result<Option<usize>, D::Error>
where
    D: Deserializer<'de>,
{
    match RawCount::deserialize(deserializer)? {
        RawCount::Count(n) => usize::try_from(n)
            .map(Some)
            .map_err(serde::de::Error::custom),
        RawCount::Text(text) if is_off_keyword(&text) => Ok(None),
        RawCount::Text(text) => text
            .trim()
            .parse::<usize>()
            .map(Some)
            .map_err(|_| {
                serde::de::Error::custom(format!(
                    "expected a positive integer, \"unbounded\" or \"off\", got '{}'",
                    text
                ))
            }),
    }
}

fn is_off_keyword(text: &str) -> bool {
    ["unbounded", "off", "none"]
        .iter()
        .any(|keyword| text.trim().eq_ignore_ascii_case(keyword))
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            wheel_variant: WheelVariant::default(),
            max_history_length: default_max_history_length(),
            recency_half_life: default_recency_half_life(),
            significance_level: default_significance_level(),
            min_sample_size: default_min_sample_size(),
            max_ranked: None,
            streak_alert_threshold: default_streak_alert_threshold(),
        }
    }
}

impl EngineConfig {
    /// Checks that every parameter is usable by the analyzers.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.recency_half_life.is_finite() || self.recency_half_life <= 0.0 {
            return Err(ConfigError::ValidationError(format!(
                "recency_half_life must be a positive number, got {}",
                self.recency_half_life
            )));
        }
        if self.max_history_length == Some(0) {
            return Err(ConfigError::ValidationError(
                "max_history_length must be greater than 0 (use \"unbounded\" to disable the cap)"
                    .to_string(),
            ));
        }
        if !(self.significance_level > 0.0 && self.significance_level < 1.0) {
            return Err(ConfigError::ValidationError(format!(
                "significance_level must be between 0 and 1, got {}",
                self.significance_level
            )));
        }
        if self.min_sample_size == 0 {
            return Err(ConfigError::ValidationError(
                "min_sample_size must be greater than 0".to_string(),
            ));
        }
        if self.max_ranked == Some(0) {
            return Err(ConfigError::ValidationError(
                "max_ranked must be greater than 0 when set".to_string(),
            ));
        }
        if self.streak_alert_threshold == Some(0) {
            return Err(ConfigError::ValidationError(
                "streak_alert_threshold must be greater than 0 (use \"off\" to disable alerts)"
                    .to_string(),
            ));
        }
        Ok(())
    }
}
