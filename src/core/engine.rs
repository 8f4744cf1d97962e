use crate::core::arbiter::arbitrate;
use crate::core::gate::evaluate_gate;
use crate::core::keywords::check_avoid;
use crate::core::sampler::FallbackSampler;
use crate::core::scoring::{AlignmentScorer, ScoringConfig};
use crate::core::stats::StatsTracker;
use crate::models::{Decision, EngineStats, LlmJudgment, ProfileInfo, SwipeDirection, UserPreferences};
use crate::services::llm::LlmJudge;

/// Profile decision orchestrator
///
/// # Pipeline stages
/// 1. Preference sanity check
/// 2. Hard filters (verification, bio, age, location)
/// 3. Avoid-keyword scan
/// 4. Heuristic alignment scoring
/// 5. Optional LLM judgment
/// 6. Arbitration and fallback sampling
///
/// Emits exactly one `Decision` per profile; every failure mode degrades
/// to a defined verdict rather than an error. Decisions are sequential;
/// only the stats counters and the LLM endpoint cache outlive a pass.
pub struct DecisionEngine {
    scorer: AlignmentScorer,
    sampler: FallbackSampler,
    stats: StatsTracker,
    llm: Option<LlmJudge>,
}

impl DecisionEngine {
    pub fn new(scoring: ScoringConfig, llm: Option<LlmJudge>) -> Self {
        Self {
            scorer: AlignmentScorer::new(scoring),
            sampler: FallbackSampler::new(),
            stats: StatsTracker::new(),
            llm,
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(ScoringConfig::default(), None)
    }

    /// Deterministic fallback sampling for tests and replayable sessions.
    pub fn with_seeded_sampler(mut self, seed: u64) -> Self {
        self.sampler = FallbackSampler::with_seed(seed);
        self
    }

    /// Attach an LLM judge; it is only consulted when preferences enable it.
    pub fn with_llm(mut self, judge: LlmJudge) -> Self {
        self.llm = Some(judge);
        self
    }

    /// Decide a single profile
    ///
    /// Never fails: malformed preferences produce a `left` decision with a
    /// "processing error" reason so the automation loop can move on.
    pub async fn decide(&mut self, profile: &ProfileInfo, prefs: &UserPreferences) -> Decision {
        if let Err(e) = prefs.sanity_check() {
            tracing::error!(error = %e, "malformed preferences, rejecting profile");
            return Decision::left("processing error");
        }

        self.stats.start_decision();
        let decision = self.run_pipeline(profile, prefs).await;

        tracing::info!(
            profile = %profile.name,
            direction = ?decision.direction,
            score = decision.score,
            reason = %decision.reason,
            "decision"
        );

        decision
    }

    async fn run_pipeline(&mut self, profile: &ProfileInfo, prefs: &UserPreferences) -> Decision {
        // Stage 1: hard filters
        let gate = evaluate_gate(profile, prefs);
        if !gate.pass {
            if let Some(alignment) = gate.alignment() {
                tracing::info!(
                    profile = %profile.name,
                    rejection = ?alignment.rejection_reason,
                    "profile rejected by hard filter"
                );
            }
            let reason = gate.reason.unwrap_or_else(|| "filtered".to_string());
            self.stats.record(SwipeDirection::Left, false);
            return Decision::left(reason);
        }

        // Stage 2: avoid-keywords take priority over scoring
        let avoid = check_avoid(&profile.combined_text, &prefs.avoid_keywords);
        if avoid.should_avoid {
            self.stats.record(SwipeDirection::Left, false);
            return Decision::left(format!("avoid keywords found: {}", avoid.found.join(", ")));
        }

        // Stage 3: heuristic alignment
        let alignment = self.scorer.score(profile, prefs);

        // Stage 4: optional LLM judgment, degrades instead of failing
        let judgment: Option<LlmJudgment> = match (&mut self.llm, prefs.llm.enabled) {
            (Some(judge), true) => Some(judge.judge(profile, prefs).await),
            _ => None,
        };

        // Stage 5: merge verdicts
        let arbitration = arbitrate(&alignment, judgment.as_ref());

        // Stage 6: calibrated fallback
        let outcome = self
            .sampler
            .sample(arbitration.aligned, prefs.swipe_right_percentage);
        self.stats.record(outcome.direction, outcome.via_fallback);

        let reason = if outcome.via_fallback {
            format!("fallback right swipe ({})", arbitration.reason)
        } else {
            arbitration.reason
        };

        Decision::new(outcome.direction, reason, alignment.score)
    }

    pub fn stats(&self) -> EngineStats {
        self.stats.snapshot()
    }

    /// Reset counters at automation-session start.
    pub fn reset_stats(&mut self) {
        self.stats.reset();
    }
}
