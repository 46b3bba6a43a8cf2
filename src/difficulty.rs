//! Difficulty tiers of the automated opponent.
//!
//! A tier fixes the weights of the weighted heuristics and the probability
//! of picking a random short-listed move instead of the best one.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

/// Scoring weights and randomness for one tier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DifficultyConfig {
    /// Nominal look-ahead. The evaluator is single-ply and never reads it.
    pub search_depth: u32,
    pub capture_weight: f64,
    pub territory_weight: f64,
    pub liberty_weight: f64,
    /// Probability of drawing uniformly from the short list.
    pub random_factor: f64,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn config(self) -> DifficultyConfig {
        match self {
            Difficulty::Easy => DifficultyConfig {
                search_depth: 1,
                capture_weight: 1.0,
                territory_weight: 0.3,
                liberty_weight: 0.5,
                random_factor: 0.4,
            },
            Difficulty::Medium => DifficultyConfig {
                search_depth: 2,
                capture_weight: 1.2,
                territory_weight: 0.6,
                liberty_weight: 0.8,
                random_factor: 0.2,
            },
            Difficulty::Hard => DifficultyConfig {
                search_depth: 3,
                capture_weight: 1.5,
                territory_weight: 1.0,
                liberty_weight: 1.0,
                random_factor: 0.1,
            },
        }
    }

    /// Lenient lookup: unknown names fall back to [`Difficulty::Medium`].
    pub fn from_name(name: &str) -> Self {
        name.parse().unwrap_or_default()
    }

    pub fn name(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl Default for DifficultyConfig {
    fn default() -> Self {
        Difficulty::default().config()
    }
}

impl From<Difficulty> for DifficultyConfig {
    fn from(d: Difficulty) -> Self {
        d.config()
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseDifficultyError(String);

impl fmt::Display for ParseDifficultyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown difficulty '{}' (expected easy, medium or hard)", self.0)
    }
}

impl std::error::Error for ParseDifficultyError {}

impl FromStr for Difficulty {
    type Err = ParseDifficultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Difficulty::ALL
            .into_iter()
            .find(|d| d.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseDifficultyError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table() {
        let easy = Difficulty::Easy.config();
        assert_eq!(easy.capture_weight, 1.0);
        assert_eq!(easy.territory_weight, 0.3);
        assert_eq!(easy.liberty_weight, 0.5);
        assert_eq!(easy.random_factor, 0.4);

        let hard = Difficulty::Hard.config();
        assert_eq!(hard.capture_weight, 1.5);
        assert_eq!(hard.random_factor, 0.1);
        assert_eq!(hard.search_depth, 3);
    }

    #[test]
    fn test_parse() {
        assert_eq!("hard".parse::<Difficulty>(), Ok(Difficulty::Hard));
        assert_eq!("Easy".parse::<Difficulty>(), Ok(Difficulty::Easy));
        assert!("impossible".parse::<Difficulty>().is_err());
    }

    #[test]
    fn test_unknown_defaults_to_medium() {
        assert_eq!(Difficulty::from_name("impossible"), Difficulty::Medium);
        assert_eq!(Difficulty::from_name(""), Difficulty::Medium);
        assert_eq!(DifficultyConfig::default(), Difficulty::Medium.config());
    }
}
