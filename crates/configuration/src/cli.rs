use crate::settings::EngineConfig;
use clap::Args;
use core_types::WheelVariant;

/// Command-line overrides layered on top of the loaded `EngineConfig`.
#[derive(Debug, Clone, Default, Args)]
pub struct ConfigOverrides {
    /// Wheel variant ("european" or "american").
    #[arg(long)]
    pub variant: Option<WheelVariant>,

    /// Maximum number of spins kept in the history.
    #[arg(long, conflicts_with = "unbounded")]
    pub max_history: Option<usize>,

    /// Keep every spin.
    #[arg(long)]
    pub unbounded: bool,

    /// Recency half-life, in spins, for the hot/cold ranking.
    #[arg(long)]
    pub half_life: Option<f64>,

    /// Only list this many hot and cold pockets.
    #[arg(long)]
    pub top: Option<usize>,

    /// Flag streaks once a value repeats this many times in a row.
    #[arg(long, conflicts_with = "no_streak_alert")]
    pub streak_alert: Option<usize>,

    /// Disable streak alerts.
    #[arg(long)]
    pub no_streak_alert: bool,
}

impl ConfigOverrides {
    pub fn apply(&self, config: &mut EngineConfig) {
        if let Some(variant) = self.variant {
            config.wheel_variant = variant;
        }
        if self.unbounded {
            config.max_history_length = None;
        } else if let Some(max) = self.max_history {
            config.max_history_length = Some(max);
        }
        if let Some(half_life) = self.half_life {
            config.recency_half_life = half_life;
        }
        if let Some(top) = self.top {
            config.max_ranked = Some(top);
        }
        if self.no_streak_alert {
            config.streak_alert_threshold = None;
        } else if let Some(threshold) = self.streak_alert {
            config.streak_alert_threshold = Some(threshold);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Harness {
        #[command(flatten)]
        overrides: ConfigOverrides,
    }

    #[test]
    fn test_flags_override_loaded_values() {
        let harness = Harness::parse_from([
            "spinstat",
            "--variant",
            "american",
            "--unbounded",
            "--streak-alert",
            "5",
        ]);
        let mut config = EngineConfig::default();
        harness.overrides.apply(&mut config);
        assert_eq!(config.wheel_variant, WheelVariant::American);
        assert_eq!(config.max_history_length, None);
        assert_eq!(config.streak_alert_threshold, Some(5));
    }

    #[test]
    fn test_streak_alert_can_be_disabled() {
        let harness = Harness::parse_from(["spinstat", "--no-streak-alert"]);
        let mut config = EngineConfig::default();
        harness.overrides.apply(&mut config);
        assert_eq!(config.streak_alert_threshold, None);
        assert!(Harness::try_parse_from(["spinstat", "--max-history", "5", "--unbounded"]).is_err());
    }
}
