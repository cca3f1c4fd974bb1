//! Search configuration and difficulty presets

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::eval::Heuristic;
use crate::rules::ForbiddenRules;

/// Deepest supported search
pub const MAX_DEPTH: u8 = 4;
/// Widest supported candidate radius
pub const MAX_RADIUS: u8 = 3;

/// Parameters for one move selection.
///
/// Every field has a default, so a request may give any subset of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchOptions {
    /// Plies searched; 1 picks straight from the ranked candidates
    pub depth: u8,
    /// Candidates kept per ply (top-K)
    pub candidate_limit: usize,
    /// Probability of a uniform pick among the top `random_pool` at depth 1
    pub randomness: f64,
    pub random_pool: usize,
    /// Chebyshev distance from existing stones for candidate cells
    pub radius: u8,
    /// Weight of the opponent-side score added to each candidate
    pub defense_weight: f64,
    /// Uniform noise in `[0, jitter)` added to candidate scores at depth 1
    pub jitter: f64,
    pub heuristic: Heuristic,
    pub rules: ForbiddenRules,
    /// Fixed seed for reproducible random picks
    pub seed: Option<u64>,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            depth: 1,
            candidate_limit: 8,
            randomness: 0.0,
            random_pool: 3,
            radius: 2,
            defense_weight: 0.0,
            jitter: 0.0,
            heuristic: Heuristic::Positional,
            rules: ForbiddenRules::NONE,
            seed: None,
        }
    }
}

impl SearchOptions {
    /// Check every field is inside its supported range.
    pub fn validate(&self) -> Result<(), EngineError> {
        let invalid = |msg: String| Err(EngineError::InvalidOptions(msg));

        if !(1..=MAX_DEPTH).contains(&self.depth) {
            return invalid(format!("depth must be 1..={MAX_DEPTH}, got {}", self.depth));
        }
        if self.candidate_limit == 0 {
            return invalid("candidateLimit must be at least 1".to_string());
        }
        if !(0.0..=1.0).contains(&self.randomness) {
            return invalid(format!("randomness must be in [0, 1], got {}", self.randomness));
        }
        if self.random_pool == 0 {
            return invalid("randomPool must be at least 1".to_string());
        }
        if !(1..=MAX_RADIUS).contains(&self.radius) {
            return invalid(format!("radius must be 1..={MAX_RADIUS}, got {}", self.radius));
        }
        if !(self.defense_weight >= 0.0 && self.defense_weight.is_finite()) {
            return invalid(format!("defenseWeight must be >= 0, got {}", self.defense_weight));
        }
        if !(self.jitter >= 0.0 && self.jitter.is_finite()) {
            return invalid(format!("jitter must be >= 0, got {}", self.jitter));
        }
        Ok(())
    }

    /// Same options with forbidden rules replaced.
    #[must_use]
    pub fn with_rules(mut self, rules: ForbiddenRules) -> Self {
        self.rules = rules;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// Difficulty presets; each is only a set of [`SearchOptions`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }

    pub fn search_depth(&self) -> u8 {
        match self {
            Self::Easy => 1,
            Self::Medium => 2,
            Self::Hard => 3,
        }
    }

    pub fn options(&self) -> SearchOptions {
        let base = SearchOptions {
            depth: self.search_depth(),
            ..SearchOptions::default()
        };
        match self {
            Self::Easy => SearchOptions {
                candidate_limit: 6,
                randomness: 0.3,
                ..base
            },
            Self::Medium => SearchOptions {
                candidate_limit: 8,
                defense_weight: 0.5,
                ..base
            },
            Self::Hard => SearchOptions {
                candidate_limit: 10,
                defense_weight: 0.8,
                heuristic: Heuristic::Pattern,
                ..base
            },
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Difficulty {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|d| d.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| EngineError::UnknownDifficulty(s.to_string()))
    }
}

/// Option presets for the scripted computer opponents.
pub mod presets {
    use super::SearchOptions;
    use crate::eval::Heuristic;

    /// Greedy pick with the network scorer over the widest candidate area,
    /// no top-K cut
    pub fn network_greedy() -> SearchOptions {
        SearchOptions {
            heuristic: Heuristic::Network,
            radius: super::MAX_RADIUS,
            candidate_limit: usize::MAX,
            ..SearchOptions::default()
        }
    }

    /// Greedy pick over cells within two of existing stones
    pub fn local_greedy() -> SearchOptions {
        SearchOptions {
            radius: 2,
            ..SearchOptions::default()
        }
    }

    /// Local greedy pick with noise on every candidate score
    pub fn noisy_greedy() -> SearchOptions {
        SearchOptions {
            jitter: 100.0,
            ..local_greedy()
        }
    }
}
