use super::{evolution::EvolutionConfig, traits::ConfigSection};
use crate::error::GenexprError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::{Arc, RwLock};

/// Prefix for environment overrides, e.g. `GENEXPR__EVOLUTION__SEED=7`.
pub const ENV_PREFIX: &str = "GENEXPR";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub evolution: EvolutionConfig,
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), GenexprError> {
        self.evolution.validate()?;
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct ConfigManager {
    config: Arc<RwLock<AppConfig>>,
}

impl ConfigManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load_from_file<P: AsRef<Path>>(&self, path: P) -> Result<(), GenexprError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| GenexprError::Configuration(format!("Failed to read config: {}", e)))?;

        let config: AppConfig = toml::from_str(&contents)
            .map_err(|e| GenexprError::Configuration(format!("Failed to parse config: {}", e)))?;

        self.replace(config)
    }

    /// Load an optional config file, then apply `GENEXPR__SECTION__KEY`
    /// environment overrides on top.
    pub fn load_layered<P: AsRef<Path>>(&self, path: Option<P>) -> Result<(), GenexprError> {
        let mut builder = config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path.as_ref()).required(true));
        }
        let config: AppConfig = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        self.replace(config)
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), GenexprError> {
        let config = self.get();
        let toml_str = toml::to_string_pretty(&config)
            .map_err(|e| GenexprError::Configuration(format!("Failed to serialize: {}", e)))?;

        std::fs::write(path, toml_str)
            .map_err(|e| GenexprError::Configuration(format!("Failed to write config: {}", e)))?;

        Ok(())
    }

    pub fn get(&self) -> AppConfig {
        self.config
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Apply `f` to a copy and commit it only if the result validates.
    pub fn update<F>(&self, f: F) -> Result<(), GenexprError>
    where
        F: FnOnce(&mut AppConfig),
    {
        let mut candidate = self.get();
        f(&mut candidate);
        self.replace(candidate)
    }

    fn replace(&self, config: AppConfig) -> Result<(), GenexprError> {
        config.validate()?;
        log::debug!("Applying {} config: {:?}", EvolutionConfig::section_name(), config.evolution);
        *self
            .config
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = config;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RouletteMode;

    #[test]
    fn test_update_rejects_invalid_and_keeps_previous() {
        let manager = ConfigManager::new();
        let result = manager.update(|c| c.evolution.population_size = 7);
        assert!(result.is_err());
        assert_eq!(manager.get().evolution.population_size, 300);

        manager.update(|c| c.evolution.seed = Some(9)).unwrap();
        assert_eq!(manager.get().evolution.seed, Some(9));
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("genexpr.toml");

        let manager = ConfigManager::new();
        manager
            .update(|c| {
                c.evolution.max_generations = 25;
                c.evolution.roulette_mode = RouletteMode::Normalized;
            })
            .unwrap();
        manager.save_to_file(&path).unwrap();

        let reloaded = ConfigManager::new();
        reloaded.load_from_file(&path).unwrap();
        let evolution = reloaded.get().evolution;
        assert_eq!(evolution.max_generations, 25);
        assert_eq!(evolution.roulette_mode, RouletteMode::Normalized);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("partial.toml");
        std::fs::write(&path, "[evolution]\nmutation_rate = 0.05\n").unwrap();

        let manager = ConfigManager::new();
        manager.load_layered(Some(&path)).unwrap();
        let evolution = manager.get().evolution;
        assert!((evolution.mutation_rate - 0.05).abs() < 1e-12);
        assert_eq!(evolution.population_size, 300);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let manager = ConfigManager::new();
        assert!(manager.load_from_file("/nonexistent/genexpr.toml").is_err());
    }
}
