// Core algorithm exports
pub mod arbiter;
pub mod engine;
pub mod gate;
pub mod keywords;
pub mod sampler;
pub mod scoring;
pub mod stats;

pub use arbiter::{arbitrate, Arbitration, DISAGREEMENT_THRESHOLD};
pub use engine::DecisionEngine;
pub use gate::{evaluate_gate, GateResult};
pub use keywords::{check_avoid, contains_ci, AvoidCheck};
pub use sampler::{FallbackSampler, SampleOutcome};
pub use scoring::{AlignmentScorer, LevelThresholds, ScoringConfig, ScoringWeights};
pub use stats::StatsTracker;
