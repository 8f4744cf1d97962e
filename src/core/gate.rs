use crate::core::keywords::contains_ci;
use crate::models::{AlignmentResult, ProfileInfo, RejectionReason, UserPreferences};

/// Minimum combined-text length that counts as a usable substitute for a
/// missing bio (attribute tags and section snippets tend to run short).
const MIN_FALLBACK_TEXT_LEN: usize = 20;

/// Outcome of the hard-filter stage
#[derive(Debug, Clone)]
pub struct GateResult {
    pub pass: bool,
    pub reason: Option<String>,
    pub rejection: Option<RejectionReason>,
}

impl GateResult {
    fn pass() -> Self {
        Self {
            pass: true,
            reason: None,
            rejection: None,
        }
    }

    fn fail(reason: impl Into<String>) -> Self {
        Self {
            pass: false,
            reason: Some(reason.into()),
            rejection: None,
        }
    }

    fn reject(reason: impl Into<String>, rejection: RejectionReason) -> Self {
        Self {
            pass: false,
            reason: Some(reason.into()),
            rejection: Some(rejection),
        }
    }

    /// Alignment view of a hard-filter rejection: a zero-score
    /// `AlignmentResult` carrying the rejection category, for
    /// observability consumers that want the category rather than the
    /// reason text. `None` for passes and for failures with no category
    /// (verification, missing bio).
    pub fn alignment(&self) -> Option<AlignmentResult> {
        self.rejection.map(AlignmentResult::rejected)
    }
}

/// Apply the hard preference filters, first failing check wins
///
/// Check order: verification, usable information, bio requirement, age
/// range, location allow-list. Unknown age and unknown location never
/// block; they pass with a warning so strict filters don't starve the
/// pipeline on sparsely scraped profiles.
pub fn evaluate_gate(profile: &ProfileInfo, prefs: &UserPreferences) -> GateResult {
    if prefs.require_verified && !profile.is_verified {
        return GateResult::fail("not verified");
    }

    if !profile.has_usable_text() {
        return GateResult::fail("no usable information");
    }

    if prefs.require_bio && !profile.has_bio && !has_substantial_fallback_text(profile) {
        return GateResult::fail("no bio");
    }

    if prefs.age_preference.enabled {
        match profile.age {
            Some(age) => {
                let min = prefs.age_preference.min_age;
                let max = prefs.age_preference.max_age;
                if age < min || age > max {
                    return GateResult::reject(
                        format!("age mismatch: {} outside {}-{}", age, min, max),
                        RejectionReason::AgeMismatch,
                    );
                }
            }
            None => {
                tracing::warn!(profile = %profile.name, "age unknown, age filter skipped");
            }
        }
    }

    if prefs.location_preference.enabled {
        match profile.known_location() {
            Some(location) => {
                let allowed = &prefs.location_preference.allowed_locations;
                if allowed.is_empty() {
                    // Enabled filter with nothing to match against is a
                    // configuration gap; treat it as allow-all.
                    tracing::warn!("location filter enabled with empty allow-list, passing all locations");
                } else {
                    let matched = allowed.iter().any(|a| {
                        contains_ci(location, a) || contains_ci(a, location)
                    });
                    if !matched {
                        return GateResult::reject(
                            format!("location mismatch: {}", location),
                            RejectionReason::LocationMismatch,
                        );
                    }
                }
            }
            None => {
                tracing::warn!(profile = %profile.name, "location unknown, location filter skipped");
            }
        }
    }

    GateResult::pass()
}

/// Attributes, a known location, or a reasonable chunk of section text can
/// stand in for a missing bio.
fn has_substantial_fallback_text(profile: &ProfileInfo) -> bool {
    !profile.attributes.is_empty()
        || profile.known_location().is_some()
        || profile.combined_text.trim().len() >= MIN_FALLBACK_TEXT_LEN
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AgePreference, LocationPreference};

    fn profile_with_bio() -> ProfileInfo {
        ProfileInfo {
            name: "Test".to_string(),
            age: Some(27),
            bio: "I love hiking and coffee".to_string(),
            has_bio: true,
            attributes: vec!["hiking".to_string()],
            location: Some("Berlin".to_string()),
            is_verified: true,
            combined_text: "I love hiking and coffee hiking Berlin".to_string(),
        }
    }

    #[test]
    fn test_gate_passes_complete_profile() {
        let result = evaluate_gate(&profile_with_bio(), &UserPreferences::default());
        assert!(result.pass);
        assert!(result.rejection.is_none());
    }

    #[test]
    fn test_unverified_rejected_when_required() {
        let mut profile = profile_with_bio();
        profile.is_verified = false;
        let mut prefs = UserPreferences::default();
        prefs.require_verified = true;

        let result = evaluate_gate(&profile, &prefs);
        assert!(!result.pass);
        assert_eq!(result.reason.as_deref(), Some("not verified"));
    }

    #[test]
    fn test_empty_profile_rejected() {
        let profile = ProfileInfo::default();
        let result = evaluate_gate(&profile, &UserPreferences::default());
        assert!(!result.pass);
        assert_eq!(result.reason.as_deref(), Some("no usable information"));
    }

    #[test]
    fn test_missing_bio_rejected_without_fallback_text() {
        let profile = ProfileInfo {
            name: "Test".to_string(),
            has_bio: false,
            combined_text: "short".to_string(),
            ..Default::default()
        };
        let result = evaluate_gate(&profile, &UserPreferences::default());
        assert!(!result.pass);
        assert_eq!(result.reason.as_deref(), Some("no bio"));
    }

    #[test]
    fn test_missing_bio_allowed_with_attributes() {
        let profile = ProfileInfo {
            name: "Test".to_string(),
            has_bio: false,
            attributes: vec!["hiking".to_string(), "coffee".to_string()],
            combined_text: "hiking coffee".to_string(),
            ..Default::default()
        };
        let result = evaluate_gate(&profile, &UserPreferences::default());
        assert!(result.pass);
    }

    #[test]
    fn test_age_outside_range_rejected() {
        let mut profile = profile_with_bio();
        profile.age = Some(40);
        let mut prefs = UserPreferences::default();
        prefs.age_preference = AgePreference {
            enabled: true,
            min_age: 25,
            max_age: 35,
        };

        let result = evaluate_gate(&profile, &prefs);
        assert!(!result.pass);
        assert_eq!(result.rejection, Some(RejectionReason::AgeMismatch));
    }

    #[test]
    fn test_unknown_age_passes() {
        let mut profile = profile_with_bio();
        profile.age = None;
        let mut prefs = UserPreferences::default();
        prefs.age_preference = AgePreference {
            enabled: true,
            min_age: 25,
            max_age: 35,
        };

        assert!(evaluate_gate(&profile, &prefs).pass);
    }

    #[test]
    fn test_location_not_in_allow_list_rejected() {
        let profile = profile_with_bio();
        let mut prefs = UserPreferences::default();
        prefs.location_preference = LocationPreference {
            enabled: true,
            allowed_locations: vec!["Munich".to_string(), "Hamburg".to_string()],
        };

        let result = evaluate_gate(&profile, &prefs);
        assert!(!result.pass);
        assert_eq!(result.rejection, Some(RejectionReason::LocationMismatch));
    }

    #[test]
    fn test_location_substring_match_both_directions() {
        // Profile says "Berlin, Germany"; allow-list says "berlin"
        let mut profile = profile_with_bio();
        profile.location = Some("Berlin, Germany".to_string());
        let mut prefs = UserPreferences::default();
        prefs.location_preference = LocationPreference {
            enabled: true,
            allowed_locations: vec!["berlin".to_string()],
        };
        assert!(evaluate_gate(&profile, &prefs).pass);

        // Profile says "Berlin"; allow-list says "Berlin, Germany"
        profile.location = Some("Berlin".to_string());
        prefs.location_preference.allowed_locations = vec!["Berlin, Germany".to_string()];
        assert!(evaluate_gate(&profile, &prefs).pass);
    }

    #[test]
    fn test_enabled_filter_with_empty_allow_list_passes() {
        let profile = profile_with_bio();
        let mut prefs = UserPreferences::default();
        prefs.location_preference = LocationPreference {
            enabled: true,
            allowed_locations: vec![],
        };

        assert!(evaluate_gate(&profile, &prefs).pass);
    }

    #[test]
    fn test_rejection_carries_alignment_view() {
        let mut profile = profile_with_bio();
        profile.age = Some(50);
        let mut prefs = UserPreferences::default();
        prefs.age_preference = AgePreference {
            enabled: true,
            min_age: 25,
            max_age: 35,
        };

        let result = evaluate_gate(&profile, &prefs);
        let alignment = result.alignment().unwrap();
        assert_eq!(alignment.rejection_reason, Some(RejectionReason::AgeMismatch));
        assert_eq!(alignment.score, 0.0);
        assert!(!alignment.is_aligned);

        // Non-categorized failures have no alignment view
        let mut prefs = UserPreferences::default();
        prefs.require_verified = true;
        let mut profile = profile_with_bio();
        profile.is_verified = false;
        assert!(evaluate_gate(&profile, &prefs).alignment().is_none());
    }

    #[test]
    fn test_unknown_location_passes() {
        let mut profile = profile_with_bio();
        profile.location = None;
        let mut prefs = UserPreferences::default();
        prefs.location_preference = LocationPreference {
            enabled: true,
            allowed_locations: vec!["Munich".to_string()],
        };

        assert!(evaluate_gate(&profile, &prefs).pass);
    }

    #[test]
    fn test_verification_checked_before_bio() {
        // Both checks would fail; verification is reported first.
        let profile = ProfileInfo::default();
        let mut prefs = UserPreferences::default();
        prefs.require_verified = true;

        let result = evaluate_gate(&profile, &prefs);
        assert_eq!(result.reason.as_deref(), Some("not verified"));
    }
}
