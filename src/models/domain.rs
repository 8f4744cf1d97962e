use serde::{Deserialize, Serialize};

/// Normalized profile record produced by the extraction collaborator
///
/// Every field is optional on the wire: the scraper frequently sees
/// profiles with no bio, no age badge, or zero attribute tags, and the
/// engine must decide anyway.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileInfo {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub age: Option<u8>,
    #[serde(default)]
    pub bio: String,
    #[serde(rename = "hasBio", default)]
    pub has_bio: bool,
    #[serde(default)]
    pub attributes: Vec<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(rename = "isVerified", default)]
    pub is_verified: bool,
    /// Bio + attributes + location + extra sections, the analysis corpus.
    #[serde(rename = "combinedText", default)]
    pub combined_text: String,
}

impl ProfileInfo {
    /// True if any scraped text at all survives for analysis.
    pub fn has_usable_text(&self) -> bool {
        !self.bio.trim().is_empty()
            || !self.attributes.is_empty()
            || !self.combined_text.trim().is_empty()
    }

    /// Location normalized to `None` when the scraper produced an empty string.
    pub fn known_location(&self) -> Option<&str> {
        self.location.as_deref().map(str::trim).filter(|l| !l.is_empty())
    }
}

/// Age range filter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgePreference {
    #[serde(default)]
    pub enabled: bool,
    #[serde(rename = "minAge", default = "default_min_age")]
    pub min_age: u8,
    #[serde(rename = "maxAge", default = "default_max_age")]
    pub max_age: u8,
}

impl Default for AgePreference {
    fn default() -> Self {
        Self {
            enabled: false,
            min_age: default_min_age(),
            max_age: default_max_age(),
        }
    }
}

fn default_min_age() -> u8 { 18 }
fn default_max_age() -> u8 { 99 }

/// Location allow-list filter
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LocationPreference {
    #[serde(default)]
    pub enabled: bool,
    #[serde(rename = "allowedLocations", default)]
    pub allowed_locations: Vec<String>,
}

/// LLM judgment settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmPreferences {
    #[serde(default)]
    pub enabled: bool,
    #[serde(rename = "minComparisonScore", default = "default_min_comparison_score")]
    pub min_comparison_score: f64,
    #[serde(default)]
    pub endpoint: Option<String>,
}

impl Default for LlmPreferences {
    fn default() -> Self {
        Self {
            enabled: false,
            min_comparison_score: default_min_comparison_score(),
            endpoint: None,
        }
    }
}

fn default_min_comparison_score() -> f64 { 0.6 }

/// User swiping preferences, loaded once per automation session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserPreferences {
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(rename = "avoidKeywords", default)]
    pub avoid_keywords: Vec<String>,
    #[serde(rename = "requireBio", default = "default_true")]
    pub require_bio: bool,
    #[serde(rename = "requireVerified", default)]
    pub require_verified: bool,
    #[serde(rename = "alignmentThreshold", default)]
    pub alignment_threshold: Option<f64>,
    #[serde(rename = "swipeRightPercentage", default = "default_swipe_right_percentage")]
    pub swipe_right_percentage: u8,
    #[serde(rename = "agePreference", default)]
    pub age_preference: AgePreference,
    #[serde(rename = "locationPreference", default)]
    pub location_preference: LocationPreference,
    #[serde(rename = "llmSettings", default)]
    pub llm: LlmPreferences,
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            interests: Vec::new(),
            avoid_keywords: Vec::new(),
            require_bio: default_true(),
            require_verified: false,
            alignment_threshold: None,
            swipe_right_percentage: default_swipe_right_percentage(),
            age_preference: AgePreference::default(),
            location_preference: LocationPreference::default(),
            llm: LlmPreferences::default(),
        }
    }
}

fn default_true() -> bool { true }
fn default_swipe_right_percentage() -> u8 { 18 }

/// Default alignment threshold when preferences leave it unset
pub const DEFAULT_ALIGNMENT_THRESHOLD: f64 = 0.3;

impl UserPreferences {
    /// Alignment threshold with the documented default applied.
    pub fn resolved_alignment_threshold(&self) -> f64 {
        self.alignment_threshold.unwrap_or(DEFAULT_ALIGNMENT_THRESHOLD)
    }

    /// Structural sanity check. A malformed preferences object must not
    /// abort the pipeline; the engine maps a failure here to a `left`
    /// decision with a "processing error" reason.
    pub fn sanity_check(&self) -> Result<(), String> {
        if let Some(t) = self.alignment_threshold {
            if !t.is_finite() || !(0.0..=1.0).contains(&t) {
                return Err(format!("alignment threshold {} outside [0,1]", t));
            }
        }
        if self.swipe_right_percentage == 0 || self.swipe_right_percentage > 100 {
            return Err(format!(
                "swipe right percentage {} outside 1..=100",
                self.swipe_right_percentage
            ));
        }
        if self.age_preference.enabled && self.age_preference.min_age > self.age_preference.max_age {
            return Err(format!(
                "age range {}..{} is inverted",
                self.age_preference.min_age, self.age_preference.max_age
            ));
        }
        if !self.llm.min_comparison_score.is_finite() {
            return Err("LLM minimum comparison score is not finite".to_string());
        }
        Ok(())
    }
}

/// Alignment level derived from configurable thresholds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlignmentLevel {
    Low,
    Medium,
    High,
}

/// Hard-filter rejection category, surfaced for observability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectionReason {
    AgeMismatch,
    LocationMismatch,
}

/// Output of the heuristic alignment scorer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlignmentResult {
    pub score: f64,
    pub level: AlignmentLevel,
    #[serde(rename = "isAligned")]
    pub is_aligned: bool,
    #[serde(rename = "matchingInterests")]
    pub matching_interests: Vec<String>,
    #[serde(rename = "matchCount")]
    pub match_count: usize,
    #[serde(rename = "rejectionReason", default)]
    pub rejection_reason: Option<RejectionReason>,
}

impl AlignmentResult {
    /// Zero-score result carrying a hard-filter rejection.
    pub fn rejected(reason: RejectionReason) -> Self {
        Self {
            score: 0.0,
            level: AlignmentLevel::Low,
            is_aligned: false,
            matching_interests: Vec::new(),
            match_count: 0,
            rejection_reason: Some(reason),
        }
    }
}

/// Independent compatibility judgment from the LLM collaborator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmJudgment {
    pub score: f64,
    pub rationale: String,
    #[serde(rename = "isCompatible")]
    pub is_compatible: bool,
    #[serde(default)]
    pub error: Option<String>,
}

impl LlmJudgment {
    /// Neutral judgment used when the LLM is unreachable or its response
    /// cannot be used. Never treated as a compatible signal.
    pub fn neutral(error: impl Into<String>) -> Self {
        Self {
            score: 0.5,
            rationale: String::new(),
            is_compatible: false,
            error: Some(error.into()),
        }
    }

    /// True when this judgment carries a real signal the arbiter may use.
    pub fn is_usable(&self) -> bool {
        self.error.is_none()
    }
}

/// Final swipe direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwipeDirection {
    Left,
    Right,
}

/// The engine's sole output, one per profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Decision {
    pub direction: SwipeDirection,
    pub reason: String,
    pub score: f64,
    #[serde(rename = "decidedAt")]
    pub decided_at: chrono::DateTime<chrono::Utc>,
}

impl Decision {
    pub fn new(direction: SwipeDirection, reason: impl Into<String>, score: f64) -> Self {
        Self {
            direction,
            reason: reason.into(),
            score,
            decided_at: chrono::Utc::now(),
        }
    }

    /// Early-exit left swipe with a zero score.
    pub fn left(reason: impl Into<String>) -> Self {
        Self::new(SwipeDirection::Left, reason, 0.0)
    }
}

/// Running counters for the automation session
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct EngineStats {
    pub total: u64,
    pub right: u64,
    #[serde(rename = "fallbackRight")]
    pub fallback_right: u64,
    #[serde(rename = "alignmentRight")]
    pub alignment_right: u64,
}

impl EngineStats {
    /// right / total, 0 when no decisions have been made.
    pub fn right_ratio(&self) -> f64 {
        ratio(self.right, self.total)
    }

    /// fallback_right / right, 0 when no right swipes yet.
    pub fn fallback_ratio(&self) -> f64 {
        ratio(self.fallback_right, self.right)
    }

    /// alignment_right / right, 0 when no right swipes yet.
    pub fn alignment_ratio(&self) -> f64 {
        ratio(self.alignment_right, self.right)
    }
}

#[inline]
fn ratio(num: u64, den: u64) -> f64 {
    if den == 0 {
        0.0
    } else {
        num as f64 / den as f64
    }
}
