//! Swipe Engine - profile decision engine for automated dating-app swiping
//!
//! This library implements the decision pipeline behind an automated
//! swiping session: hard preference filters, avoid-keyword screening, a
//! weighted alignment score, an optional LLM compatibility judgment, and
//! a calibrated random fallback that nudges the overall right-swipe rate
//! toward a configured target.

pub mod config;
pub mod core;
pub mod models;
pub mod services;

// Re-export commonly used types
pub use core::{AlignmentScorer, DecisionEngine, FallbackSampler, ScoringConfig};
pub use models::{
    AlignmentResult, Decision, EngineStats, LlmJudgment, ProfileInfo, SwipeDirection,
    UserPreferences,
};
pub use services::{EndpointCache, LlmJudge};
