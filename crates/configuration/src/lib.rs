use crate::error::ConfigError;
use std::path::Path;

// Declare the modules that make up this crate.
#[cfg(feature = "clap")]
pub mod cli;
pub mod error;
pub mod logging;
pub mod settings;

// Re-export the core types to provide a clean public API.
#[cfg(feature = "clap")]
pub use cli::ConfigOverrides;
pub use logging::init_tracing;
pub use settings::{EngineConfig, DEFAULT_MAX_HISTORY_LENGTH};

/// Loads the engine configuration from `config.toml` in the working directory.
///
/// The file is optional; missing keys fall back to their defaults.
pub fn load_config() -> Result<EngineConfig, ConfigError> {
    build_config(Path::new("config.toml"), false, None)
}

/// Loads the engine configuration from an explicit file, which must exist.
pub fn load_config_from(path: impl AsRef<Path>) -> Result<EngineConfig, ConfigError> {
    build_config(path.as_ref(), true, None)
}

/// `env` replaces the process environment when given.
fn build_config(
    path: &Path,
    required: bool,
    env: Option<config::Map<String, String>>,
) -> Result<EngineConfig, ConfigError> {
    let builder = config::Config::builder()
        .add_source(config::File::from(path).required(required))
        // SPINSTAT_RECENCY_HALF_LIFE=20 overrides the file.
        .add_source(
            config::Environment::with_prefix("SPINSTAT")
                .try_parsing(true)
                .source(env),
        )
        .build()?;

    let config = builder.try_deserialize::<EngineConfig>()?;
    config.validate()?;

    tracing::info!(
        variant = %config.wheel_variant,
        max_history = ?config.max_history_length,
        half_life = config.recency_half_life,
        "Configuration loaded from {}",
        path.display()
    );
    Ok(config)
}
