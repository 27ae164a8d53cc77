//! Engine configuration types.
//!
//! The host configures the engine once per session by providing:
//! - `Difficulty`: fixed for the session, maps to time limit and multiplier
//! - `ScoringConfig`: present only in scoring variants
//! - `PoolPolicy`: when the item pool is (re)fetched
//! - `EngineConfig`: combines all configuration
//!
//! Configuration is immutable once the engine is constructed.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Session difficulty.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

/// Time limit and score multiplier for a difficulty.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DifficultyProfile {
    /// Countdown length per level, in whole seconds.
    pub time_limit_secs: u32,
    /// Multiplier applied to awarded points.
    pub score_multiplier: u64,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    /// Time limit and multiplier for this difficulty.
    #[must_use]
    pub fn profile(&self) -> DifficultyProfile {
        match self {
            Difficulty::Easy => DifficultyProfile {
                time_limit_secs: 60,
                score_multiplier: 1,
            },
            Difficulty::Medium => DifficultyProfile {
                time_limit_secs: 45,
                score_multiplier: 2,
            },
            Difficulty::Hard => DifficultyProfile {
                time_limit_secs: 30,
                score_multiplier: 3,
            },
        }
    }

    /// Read the `difficulty` key from a query-string style launch parameter.
    ///
    /// `"level=2&difficulty=hard"` yields `Hard`. A missing key yields the
    /// default; an unrecognised value is an error.
    ///
    /// ```
    /// use sequence_engine::core::Difficulty;
    ///
    /// assert_eq!(Difficulty::from_launch_params("?difficulty=Easy").unwrap(), Difficulty::Easy);
    /// assert_eq!(Difficulty::from_launch_params("").unwrap(), Difficulty::Medium);
    /// assert!(Difficulty::from_launch_params("difficulty=nightmare").is_err());
    /// ```
    pub fn from_launch_params(params: &str) -> Result<Self, ConfigError> {
        params
            .trim_start_matches('?')
            .split('&')
            .filter_map(|pair| pair.split_once('='))
            .find(|(key, _)| key.trim() == "difficulty")
            .map_or(Ok(Difficulty::default()), |(_, value)| value.trim().parse())
    }
}

impl FromStr for Difficulty {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" | "med" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(ConfigError::UnknownDifficulty(s.to_string())),
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// When the difficulty multiplier is applied.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreRule {
    /// Every correct attempt earns `base_per_item × multiplier`.
    #[default]
    PerItem,
    /// Correct attempts earn nothing; completing a level earns
    /// `base_per_item × multiplier × sequence length`.
    PerLevel,
}

/// Scoring knobs. Absent in non-scoring variants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Points per satisfied position before the multiplier.
    pub base_per_item: u64,
    /// Whether the multiplier applies per item or per level.
    #[serde(default)]
    pub rule: ScoreRule,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            base_per_item: 10,
            rule: ScoreRule::PerItem,
        }
    }
}

/// When the item pool is fetched from the source.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PoolPolicy {
    /// Fetch once, reuse for every round.
    #[default]
    Cached,
    /// Drop the pool on every game over or reset; the next start re-fetches.
    RefetchEachGame,
}

/// Complete engine configuration.
///
/// ## Example
///
/// ```
/// use sequence_engine::core::{Difficulty, EngineConfig, ScoringConfig};
///
/// let config = EngineConfig::default()
///     .with_difficulty(Difficulty::Hard)
///     .timed()
///     .with_scoring(ScoringConfig::default());
///
/// assert_eq!(config.time_limit_secs(), 30);
/// assert_eq!(config.score_multiplier(), 3);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Items in the level-1 sequence; the floor for every level.
    pub min_items: usize,

    /// Lives at the start of a game.
    pub max_lives: u32,

    /// Session difficulty.
    pub difficulty: Difficulty,

    /// Whether each level runs against a countdown.
    pub timed: bool,

    /// Replaces the difficulty's time limit when set.
    pub time_limit_override: Option<u32>,

    /// Scoring rules. `None` disables scoring entirely.
    pub scoring: Option<ScoringConfig>,

    /// Pool fetch strategy.
    pub pool_policy: PoolPolicy,

    /// RNG seed for sequence generation.
    pub seed: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            min_items: 3,
            max_lives: 3,
            difficulty: Difficulty::Medium,
            timed: false,
            time_limit_override: None,
            scoring: None,
            pool_policy: PoolPolicy::Cached,
            seed: 42,
        }
    }
}

impl EngineConfig {
    /// Parse a JSON configuration document. Missing fields take defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check the configuration is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_items == 0 {
            return Err(ConfigError::InvalidMinItems);
        }
        if self.max_lives == 0 {
            return Err(ConfigError::InvalidMaxLives);
        }
        Ok(())
    }

    #[must_use]
    pub fn with_min_items(mut self, min_items: usize) -> Self {
        self.min_items = min_items;
        self
    }

    #[must_use]
    pub fn with_max_lives(mut self, lives: u32) -> Self {
        self.max_lives = lives;
        self
    }

    #[must_use]
    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    /// Enable the per-level countdown.
    #[must_use]
    pub fn timed(mut self) -> Self {
        self.timed = true;
        self
    }

    /// Enable the countdown with an explicit limit in seconds.
    #[must_use]
    pub fn with_time_limit(mut self, secs: u32) -> Self {
        self.timed = true;
        self.time_limit_override = Some(secs);
        self
    }

    #[must_use]
    pub fn with_scoring(mut self, scoring: ScoringConfig) -> Self {
        self.scoring = Some(scoring);
        self
    }

    #[must_use]
    pub fn with_pool_policy(mut self, policy: PoolPolicy) -> Self {
        self.pool_policy = policy;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Effective countdown length in seconds.
    #[must_use]
    pub fn time_limit_secs(&self) -> u32 {
        self.time_limit_override
            .unwrap_or_else(|| self.difficulty.profile().time_limit_secs)
    }

    /// Effective score multiplier.
    #[must_use]
    pub fn score_multiplier(&self) -> u64 {
        self.difficulty.profile().score_multiplier
    }
}
