use crate::core::keywords::contains_ci;
use crate::models::{AlignmentLevel, AlignmentResult, ProfileInfo, UserPreferences};

/// Weights for the two alignment signals
#[derive(Debug, Clone, Copy)]
pub struct ScoringWeights {
    pub keyword: f64,
    pub interest: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            keyword: 0.4,
            interest: 0.6,
        }
    }
}

/// Boundaries between the Low/Medium/High alignment levels
#[derive(Debug, Clone, Copy)]
pub struct LevelThresholds {
    pub low: f64,
    pub medium: f64,
}

impl Default for LevelThresholds {
    fn default() -> Self {
        Self {
            low: 0.2,
            medium: 0.5,
        }
    }
}

/// Tunables for the alignment scorer
#[derive(Debug, Clone, Copy)]
pub struct ScoringConfig {
    pub weights: ScoringWeights,
    pub thresholds: LevelThresholds,
    /// Interest tokens at or below this length are dropped before keyword
    /// matching ("and", "the", "of" style noise).
    pub min_token_len: usize,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            weights: ScoringWeights::default(),
            thresholds: LevelThresholds::default(),
            min_token_len: 3,
        }
    }
}

/// Heuristic compatibility scorer
///
/// Scoring formula:
/// score = keyword_score * 0.4      # interest tokens found in profile text
///       + interest_score * 0.6     # interests matching profile attributes
///
/// Both components are fractions in [0,1]; the combined score is clamped
/// to [0,1]. Pure and deterministic for identical inputs.
#[derive(Debug, Clone)]
pub struct AlignmentScorer {
    config: ScoringConfig,
}

impl AlignmentScorer {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn with_defaults() -> Self {
        Self {
            config: ScoringConfig::default(),
        }
    }

    /// Score a profile against the user's interests
    pub fn score(&self, profile: &ProfileInfo, prefs: &UserPreferences) -> AlignmentResult {
        let keyword_score = self.keyword_score(&profile.combined_text, &prefs.interests);
        let matching_interests = matching_interests(&prefs.interests, &profile.attributes);

        let interest_score = if prefs.interests.is_empty() {
            0.0
        } else {
            matching_interests.len() as f64 / prefs.interests.len() as f64
        };

        let raw = keyword_score * self.config.weights.keyword
            + interest_score * self.config.weights.interest;
        let score = raw.clamp(0.0, 1.0);

        let level = self.level_for(score);
        let is_aligned = score >= prefs.resolved_alignment_threshold();

        AlignmentResult {
            score,
            level,
            is_aligned,
            match_count: matching_interests.len(),
            matching_interests,
            rejection_reason: None,
        }
    }

    /// Fraction of interest tokens present in the profile's combined text
    fn keyword_score(&self, combined_text: &str, interests: &[String]) -> f64 {
        let text = combined_text.to_lowercase();

        let tokens: Vec<String> = interests
            .iter()
            .flat_map(|i| i.split_whitespace())
            .map(|t| t.to_lowercase())
            .filter(|t| t.len() > self.config.min_token_len)
            .collect();

        if tokens.is_empty() {
            return 0.0;
        }

        let hits = tokens.iter().filter(|t| text.contains(t.as_str())).count();
        hits as f64 / tokens.len() as f64
    }

    #[inline]
    fn level_for(&self, score: f64) -> AlignmentLevel {
        if score < self.config.thresholds.low {
            AlignmentLevel::Low
        } else if score < self.config.thresholds.medium {
            AlignmentLevel::Medium
        } else {
            AlignmentLevel::High
        }
    }
}

impl Default for AlignmentScorer {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Interests that substring-match any profile attribute, either direction
///
/// Deliberately looser than exact equality: "rock climbing" should match
/// the attribute "climbing" and vice versa, tolerating phrasing variance
/// between preference text and scraped tags.
fn matching_interests(interests: &[String], attributes: &[String]) -> Vec<String> {
    interests
        .iter()
        .filter(|interest| {
            attributes
                .iter()
                .any(|attr| contains_ci(attr, interest) || contains_ci(interest, attr))
        })
        .cloned()
        .collect()
}
