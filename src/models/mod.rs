// Model exports
mod domain;

pub use domain::{
    AgePreference, AlignmentLevel, AlignmentResult, Decision, EngineStats, LlmJudgment,
    LlmPreferences, LocationPreference, ProfileInfo, RejectionReason, SwipeDirection,
    UserPreferences, DEFAULT_ALIGNMENT_THRESHOLD,
};
