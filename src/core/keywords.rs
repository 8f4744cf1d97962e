/// Result of scanning profile text for avoid-terms
#[derive(Debug, Clone, Default)]
pub struct AvoidCheck {
    pub found: Vec<String>,
    pub should_avoid: bool,
}

/// Case-insensitive substring containment
#[inline]
pub fn contains_ci(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return false;
    }
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Scan text for any of the configured avoid-keywords
///
/// A single hit is enough to flag the profile; the pipeline rejects it
/// before any scoring happens. Matched terms are reported in their
/// original (preference) casing so the reason string reads naturally.
pub fn check_avoid(text: &str, avoid_keywords: &[String]) -> AvoidCheck {
    let lowered = text.to_lowercase();

    let found: Vec<String> = avoid_keywords
        .iter()
        .filter(|kw| {
            let kw = kw.trim();
            !kw.is_empty() && lowered.contains(&kw.to_lowercase())
        })
        .cloned()
        .collect();

    AvoidCheck {
        should_avoid: !found.is_empty(),
        found,
    }
}
