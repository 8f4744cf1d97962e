// Unit tests for the swipe engine

use swipe_engine::core::{check_avoid, evaluate_gate, AlignmentScorer, FallbackSampler};
use swipe_engine::models::{
    AgePreference, ProfileInfo, RejectionReason, SwipeDirection, UserPreferences,
};
use swipe_engine::DecisionEngine;

fn create_profile(bio: &str, attributes: &[&str]) -> ProfileInfo {
    let attributes: Vec<String> = attributes.iter().map(|a| a.to_string()).collect();
    let combined_text = format!("{} {}", bio, attributes.join(" "));
    ProfileInfo {
        name: "Test".to_string(),
        age: Some(28),
        bio: bio.to_string(),
        has_bio: !bio.is_empty(),
        attributes,
        location: None,
        is_verified: true,
        combined_text,
    }
}

fn create_preferences(interests: &[&str]) -> UserPreferences {
    UserPreferences {
        interests: interests.iter().map(|i| i.to_string()).collect(),
        ..Default::default()
    }
}

#[test]
fn test_verification_law() {
    // Unverified + requireVerified always fails the gate, regardless of
    // everything else.
    let mut prefs = create_preferences(&["hiking"]);
    prefs.require_verified = true;

    let mut profile = create_profile("perfect bio full of hiking", &["hiking"]);
    profile.is_verified = false;

    let result = evaluate_gate(&profile, &prefs);
    assert!(!result.pass);
    assert_eq!(result.reason.as_deref(), Some("not verified"));
}

#[test]
fn test_alignment_score_always_in_unit_range() {
    let scorer = AlignmentScorer::with_defaults();

    let cases = vec![
        (create_profile("", &[]), create_preferences(&[])),
        (create_profile("hiking", &["hiking"]), create_preferences(&["hiking"])),
        (
            create_profile("a b c d e", &["x", "y", "z"]),
            create_preferences(&["hiking", "travel", "cooking", "music", "art"]),
        ),
    ];

    for (profile, prefs) in cases {
        let result = scorer.score(&profile, &prefs);
        assert!(
            (0.0..=1.0).contains(&result.score),
            "score {} out of range",
            result.score
        );
    }
}

#[test]
fn test_empty_interest_set_scores_zero() {
    let scorer = AlignmentScorer::with_defaults();
    let result = scorer.score(
        &create_profile("lots of text here", &["tags"]),
        &create_preferences(&[]),
    );
    assert_eq!(result.score, 0.0);
    assert!(!result.is_aligned);
}

#[test]
fn test_scorer_idempotent() {
    let scorer = AlignmentScorer::with_defaults();
    let profile = create_profile("I love hiking and coffee", &["hiking", "coffee"]);
    let prefs = create_preferences(&["hiking", "travel"]);

    let first = scorer.score(&profile, &prefs);
    for _ in 0..10 {
        let next = scorer.score(&profile, &prefs);
        assert_eq!(first.score, next.score);
        assert_eq!(first.is_aligned, next.is_aligned);
        assert_eq!(first.matching_interests, next.matching_interests);
    }
}

#[test]
fn test_avoid_keywords_found_case_insensitive() {
    let check = check_avoid("I Smoke Occasionally", &["smoking".to_string(), "smoke".to_string()]);
    assert!(check.should_avoid);
    assert!(check.found.contains(&"smoke".to_string()));
}

#[test]
fn test_fallback_ratio_over_ten_thousand_draws() {
    let mut sampler = FallbackSampler::with_seed(2024);
    let n = 10_000;
    let rights = (0..n)
        .filter(|_| sampler.sample(false, 18).direction == SwipeDirection::Right)
        .count();

    let ratio = rights as f64 / n as f64;
    assert!(
        (ratio - 0.18).abs() < 0.02,
        "fallback ratio {} outside 0.18 +/- 0.02",
        ratio
    );
}

#[tokio::test]
async fn test_scenario_hiking_coffee_goes_right() {
    let mut engine = DecisionEngine::with_defaults();
    let profile = create_profile("I love hiking and coffee", &["hiking", "coffee"]);
    let prefs = create_preferences(&["hiking", "travel"]);

    let decision = engine.decide(&profile, &prefs).await;
    assert_eq!(decision.direction, SwipeDirection::Right);
    assert!(decision.reason.contains("heuristic alignment"));
}

#[tokio::test]
async fn test_scenario_smoking_immediate_left() {
    let mut engine = DecisionEngine::with_defaults();
    // Alignment would be perfect, but the avoid keyword wins.
    let profile = create_profile("I smoke occasionally, love hiking", &["hiking"]);
    let mut prefs = create_preferences(&["hiking"]);
    prefs.avoid_keywords = vec!["smoking".to_string(), "smoke".to_string()];

    let decision = engine.decide(&profile, &prefs).await;
    assert_eq!(decision.direction, SwipeDirection::Left);
    assert!(decision.reason.to_lowercase().contains("smoke"));
}

#[tokio::test]
async fn test_scenario_age_mismatch() {
    let mut prefs = create_preferences(&["hiking"]);
    prefs.age_preference = AgePreference {
        enabled: true,
        min_age: 25,
        max_age: 35,
    };

    let mut profile = create_profile("hiking fan", &["hiking"]);
    profile.age = Some(40);

    // Gate-level: explicit rejection category, also surfaced as a
    // zero-score alignment result for observability
    let gate = evaluate_gate(&profile, &prefs);
    assert!(!gate.pass);
    assert_eq!(gate.rejection, Some(RejectionReason::AgeMismatch));
    let alignment = gate.alignment().unwrap();
    assert_eq!(alignment.rejection_reason, Some(RejectionReason::AgeMismatch));
    assert_eq!(alignment.score, 0.0);

    // Engine-level: left decision with an age reason
    let mut engine = DecisionEngine::with_defaults();
    let decision = engine.decide(&profile, &prefs).await;
    assert_eq!(decision.direction, SwipeDirection::Left);
    assert!(decision.reason.contains("age mismatch"));
}

#[tokio::test]
async fn test_identical_inputs_same_decision_with_fixed_seed() {
    let profile = create_profile("I love hiking and coffee", &["hiking", "coffee"]);
    let prefs = create_preferences(&["hiking", "travel"]);

    let mut a = DecisionEngine::with_defaults().with_seeded_sampler(5);
    let mut b = DecisionEngine::with_defaults().with_seeded_sampler(5);

    for _ in 0..20 {
        let da = a.decide(&profile, &prefs).await;
        let db = b.decide(&profile, &prefs).await;
        assert_eq!(da.direction, db.direction);
        assert_eq!(da.reason, db.reason);
        assert_eq!(da.score, db.score);
    }
}

#[tokio::test]
async fn test_stats_invariant_over_mixed_session() {
    let mut engine = DecisionEngine::with_defaults().with_seeded_sampler(11);
    let aligned = create_profile("I love hiking and coffee", &["hiking", "coffee"]);
    let unaligned = create_profile("I collect stamps", &["stamps"]);
    let prefs = create_preferences(&["hiking", "travel"]);

    for i in 0..200 {
        let profile = if i % 2 == 0 { &aligned } else { &unaligned };
        engine.decide(profile, &prefs).await;
    }

    let stats = engine.stats();
    assert_eq!(stats.total, 200);
    assert_eq!(stats.right, stats.alignment_right + stats.fallback_right);
    // Every aligned pass goes right through alignment
    assert_eq!(stats.alignment_right, 100);
}
