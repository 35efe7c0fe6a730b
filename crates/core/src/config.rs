//! Engine configuration

use std::env;
use std::str::FromStr;

use crate::error::{EngineError, Result};
use crate::types::{
    DEFAULT_GOAL_SCORE, DEFAULT_HEIGHT, DEFAULT_MAX_CASCADE_CLUSTERS,
    DEFAULT_MAX_GENERATION_ATTEMPTS, DEFAULT_MOVE_BUDGET, DEFAULT_WIDTH,
};

/// How `select_cell` runs a resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResolveMode {
    /// Run every phase before returning
    #[default]
    Immediate,
    /// Return at once; the caller drives phases with `advance`
    Stepped,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub width: usize,
    pub height: usize,
    pub goal_score: u32,
    pub move_budget: u32,
    pub seed: u32,
    pub max_generation_attempts: u32,
    pub max_cascade_clusters: u32,
    pub resolve_mode: ResolveMode,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            goal_score: DEFAULT_GOAL_SCORE,
            move_budget: DEFAULT_MOVE_BUDGET,
            seed: 1,
            max_generation_attempts: DEFAULT_MAX_GENERATION_ATTEMPTS,
            max_cascade_clusters: DEFAULT_MAX_CASCADE_CLUSTERS,
            resolve_mode: ResolveMode::Immediate,
        }
    }
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}

impl EngineConfig {
    /// Create from environment variables; missing or unparsable values fall
    /// back to the defaults
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let stepped = env::var("MATCH3_STEPPED")
            .map(|s| matches!(s.trim(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Self {
            width: env_or("MATCH3_WIDTH", defaults.width),
            height: env_or("MATCH3_HEIGHT", defaults.height),
            goal_score: env_or("MATCH3_GOAL", defaults.goal_score),
            move_budget: env_or("MATCH3_MOVES", defaults.move_budget),
            seed: env_or("MATCH3_SEED", defaults.seed),
            max_generation_attempts: env_or(
                "MATCH3_MAX_ATTEMPTS",
                defaults.max_generation_attempts,
            ),
            max_cascade_clusters: env_or("MATCH3_MAX_CASCADE", defaults.max_cascade_clusters),
            resolve_mode: if stepped {
                ResolveMode::Stepped
            } else {
                ResolveMode::Immediate
            },
        }
    }

    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_size(mut self, width: usize, height: usize) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_resolve_mode(mut self, mode: ResolveMode) -> Self {
        self.resolve_mode = mode;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(EngineError::InvalidConfig(format!(
                "board must be at least 1x1, got {}x{}",
                self.width, self.height
            )));
        }
        if self.move_budget == 0 {
            return Err(EngineError::InvalidConfig(
                "move budget must be positive".to_string(),
            ));
        }
        if self.max_generation_attempts == 0 || self.max_cascade_clusters == 0 {
            return Err(EngineError::InvalidConfig(
                "retry and cascade caps must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = EngineConfig::default();
        assert_eq!(config.width, 8);
        assert_eq!(config.height, 8);
        assert_eq!(config.move_budget, 20);
        assert_eq!(config.resolve_mode, ResolveMode::Immediate);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_values() {
        let zero_width = EngineConfig::default().with_size(0, 8);
        assert!(matches!(zero_width.validate(), Err(EngineError::InvalidConfig(_))));

        let no_moves = EngineConfig {
            move_budget: 0,
            ..EngineConfig::default()
        };
        assert!(no_moves.validate().is_err());

        let no_attempts = EngineConfig {
            max_generation_attempts: 0,
            ..EngineConfig::default()
        };
        assert!(no_attempts.validate().is_err());
    }

    #[test]
    fn test_config_from_env() {
        // Only checks that reading the environment never panics
        let _config = EngineConfig::from_env();
    }

    #[test]
    fn test_env_or_uses_default_when_unset() {
        assert_eq!(env_or("MATCH3_TEST_UNSET_VARIABLE", 7u32), 7);
    }

    #[test]
    fn test_env_or_falls_back_on_garbage() {
        env::set_var("MATCH3_TEST_GARBAGE_VARIABLE", "lots");
        assert_eq!(env_or("MATCH3_TEST_GARBAGE_VARIABLE", 7u32), 7);

        env::set_var("MATCH3_TEST_PADDED_VARIABLE", " 12 ");
        assert_eq!(env_or("MATCH3_TEST_PADDED_VARIABLE", 7u32), 12);
    }
}
