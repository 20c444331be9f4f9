//! Configuration for the recommendation core.
//!
//! Layered loading, lowest priority first: `config/default.toml`, an
//! environment-specific `config/{BASKET_GRAPH_ENV}.toml`, then
//! `BASKET_GRAPH`-prefixed environment variables (`__` as the section
//! separator, e.g. `BASKET_GRAPH_WALK__HOPS=3`). Every field has a
//! default, so a missing file is not an error.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::recommend::Strategy;

/// Main configuration structure.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub walk: WalkConfig,
    #[serde(default)]
    pub recommend: RecommendConfig,
}

impl Config {
    /// Load configuration from files and environment.
    pub fn load() -> CoreResult<Self> {
        let env = std::env::var("BASKET_GRAPH_ENV").unwrap_or_else(|_| "development".to_string());

        let builder = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{}", env)).required(false))
            .add_source(config::Environment::with_prefix("BASKET_GRAPH").separator("__"));

        let config: Config = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate all sections, fail fast on the first violation.
    pub fn validate(&self) -> CoreResult<()> {
        self.search.validate()?;
        self.walk.validate()?;
        self.recommend.validate()?;
        Ok(())
    }
}

/// Item-search settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchConfig {
    /// Maximum search hits surfaced to the display layer.
    #[serde(default = "default_max_results")]
    pub max_results: usize,
}

fn default_max_results() -> usize {
    20
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_results: default_max_results(),
        }
    }
}

impl SearchConfig {
    fn validate(&self) -> CoreResult<()> {
        if self.max_results == 0 {
            return Err(CoreError::InvalidConfig(
                "search.max_results must be > 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Graph-walk settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WalkConfig {
    /// Hops per walk.
    #[serde(default = "default_hops")]
    pub hops: usize,

    /// Candidate cutoff distance. Anything above 1 requires a graph
    /// dense enough that every candidate stays directly adjacent.
    #[serde(default = "default_cutoff")]
    pub cutoff: usize,

    /// Revisit retry budget per hop.
    #[serde(default = "default_max_retries")]
    pub max_retries: usize,
}

fn default_hops() -> usize {
    5
}

fn default_cutoff() -> usize {
    1
}

fn default_max_retries() -> usize {
    20
}

impl Default for WalkConfig {
    fn default() -> Self {
        Self {
            hops: default_hops(),
            cutoff: default_cutoff(),
            max_retries: default_max_retries(),
        }
    }
}

impl WalkConfig {
    fn validate(&self) -> CoreResult<()> {
        if self.hops == 0 {
            return Err(CoreError::InvalidConfig(
                "walk.hops must be > 0".to_string(),
            ));
        }
        if self.cutoff == 0 {
            return Err(CoreError::InvalidConfig(
                "walk.cutoff must be >= 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Recommendation dispatch settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RecommendConfig {
    /// Default strategy when the user has not picked one.
    #[serde(default)]
    pub strategy: Strategy,

    /// Result bound for the similarity and neighbour strategies.
    #[serde(default = "default_topn")]
    pub topn: usize,

    /// Display cap applied after ranking.
    #[serde(default = "default_max_display")]
    pub max_display: usize,
}

fn default_topn() -> usize {
    10
}

fn default_max_display() -> usize {
    20
}

impl Default for RecommendConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::default(),
            topn: default_topn(),
            max_display: default_max_display(),
        }
    }
}

impl RecommendConfig {
    fn validate(&self) -> CoreResult<()> {
        if self.topn == 0 {
            return Err(CoreError::InvalidConfig(
                "recommend.topn must be > 0".to_string(),
            ));
        }
        if self.max_display == 0 {
            return Err(CoreError::InvalidConfig(
                "recommend.max_display must be > 0".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.search.max_results, 20);
        assert_eq!(config.walk.hops, 5);
        assert_eq!(config.walk.cutoff, 1);
        assert_eq!(config.walk.max_retries, 20);
        assert_eq!(config.recommend.topn, 10);
        assert_eq!(config.recommend.max_display, 20);
        assert_eq!(config.recommend.strategy, Strategy::Similar);
    }

    #[test]
    fn test_validate_rejects_zero_hops() {
        let mut config = Config::default();
        config.walk.hops = 0;
        assert!(matches!(
            config.validate(),
            Err(CoreError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_validate_rejects_zero_cutoff() {
        let mut config = Config::default();
        config.walk.cutoff = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_display_cap() {
        let mut config = Config::default();
        config.recommend.max_display = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_strategy_deserializes_lowercase() {
        let config: RecommendConfig =
            serde_json::from_str(r#"{"strategy": "neighbours"}"#).unwrap();
        assert_eq!(config.strategy, Strategy::Neighbours);
    }
}
