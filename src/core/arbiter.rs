use crate::models::{AlignmentResult, LlmJudgment};

/// Heuristic and LLM scores disagreeing by more than this demote an
/// aligned heuristic verdict when the LLM says incompatible. The positive
/// direction has no such threshold: a compatible LLM judgment always wins.
/// Asymmetric on purpose, matching observed production behavior.
pub const DISAGREEMENT_THRESHOLD: f64 = 0.2;

/// Merged verdict with a human-readable deciding factor
#[derive(Debug, Clone)]
pub struct Arbitration {
    pub aligned: bool,
    pub reason: String,
}

/// Merge the heuristic verdict with an optional LLM judgment
///
/// An errored judgment counts as absent; the heuristic is then
/// authoritative. The reason string always names the deciding factor for
/// the logging surface.
pub fn arbitrate(alignment: &AlignmentResult, llm: Option<&LlmJudgment>) -> Arbitration {
    let usable = llm.filter(|j| j.is_usable());

    let Some(judgment) = usable else {
        let reason = if llm.is_some() {
            format!("heuristic alignment (LLM unavailable), score {:.2}", alignment.score)
        } else {
            format!("heuristic alignment, score {:.2}", alignment.score)
        };
        return Arbitration {
            aligned: alignment.is_aligned,
            reason,
        };
    };

    if judgment.is_compatible && !alignment.is_aligned {
        return Arbitration {
            aligned: true,
            reason: format!(
                "LLM override: compatible ({:.2}) despite heuristic {:.2}",
                judgment.score, alignment.score
            ),
        };
    }

    if !judgment.is_compatible && alignment.is_aligned {
        let diff = (alignment.score - judgment.score).abs();
        if diff > DISAGREEMENT_THRESHOLD {
            return Arbitration {
                aligned: false,
                reason: format!(
                    "LLM override: incompatible ({:.2}) vs heuristic {:.2}, disagreement {:.2}",
                    judgment.score, alignment.score, diff
                ),
            };
        }
        // Marginal LLM dissent does not flip a positive heuristic verdict.
        return Arbitration {
            aligned: true,
            reason: format!(
                "heuristic alignment kept, marginal LLM dissent ({:.2} vs {:.2})",
                judgment.score, alignment.score
            ),
        };
    }

    Arbitration {
        aligned: alignment.is_aligned,
        reason: format!(
            "LLM-heuristic agreement, scores {:.2}/{:.2}",
            alignment.score, judgment.score
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AlignmentLevel;

    fn alignment(score: f64, is_aligned: bool) -> AlignmentResult {
        AlignmentResult {
            score,
            level: AlignmentLevel::Medium,
            is_aligned,
            matching_interests: vec![],
            match_count: 0,
            rejection_reason: None,
        }
    }

    fn judgment(score: f64, is_compatible: bool) -> LlmJudgment {
        LlmJudgment {
            score,
            rationale: "test".to_string(),
            is_compatible,
            error: None,
        }
    }

    #[test]
    fn test_heuristic_authoritative_without_llm() {
        let result = arbitrate(&alignment(0.7, true), None);
        assert!(result.aligned);
        assert!(result.reason.contains("heuristic alignment"));

        let result = arbitrate(&alignment(0.1, false), None);
        assert!(!result.aligned);
    }

    #[test]
    fn test_errored_judgment_counts_as_absent() {
        let errored = LlmJudgment::neutral("connection refused");
        let result = arbitrate(&alignment(0.7, true), Some(&errored));
        assert!(result.aligned);
        assert!(result.reason.contains("LLM unavailable"));
    }

    #[test]
    fn test_compatible_llm_rescues_unconditionally() {
        // Heuristic score of zero still gets overridden.
        let result = arbitrate(&alignment(0.0, false), Some(&judgment(0.9, true)));
        assert!(result.aligned);
        assert!(result.reason.contains("LLM override"));
    }

    #[test]
    fn test_incompatible_llm_demotes_on_large_disagreement() {
        // |0.8 - 0.3| = 0.5 > 0.2
        let result = arbitrate(&alignment(0.8, true), Some(&judgment(0.3, false)));
        assert!(!result.aligned);
        assert!(result.reason.contains("LLM override"));
    }

    #[test]
    fn test_marginal_llm_dissent_ignored() {
        // |0.5 - 0.4| = 0.1 <= 0.2, heuristic verdict kept
        let result = arbitrate(&alignment(0.5, true), Some(&judgment(0.4, false)));
        assert!(result.aligned);
        assert!(result.reason.contains("marginal"));
    }

    #[test]
    fn test_dissent_at_exact_threshold_ignored() {
        // diff exactly 0.2 is not "greater than", verdict kept
        let result = arbitrate(&alignment(0.6, true), Some(&judgment(0.4, false)));
        assert!(result.aligned);
    }

    #[test]
    fn test_agreement_positive() {
        let result = arbitrate(&alignment(0.7, true), Some(&judgment(0.8, true)));
        assert!(result.aligned);
        assert!(result.reason.contains("agreement"));
    }

    #[test]
    fn test_agreement_negative() {
        let result = arbitrate(&alignment(0.1, false), Some(&judgment(0.2, false)));
        assert!(!result.aligned);
        assert!(result.reason.contains("agreement"));
    }
}
