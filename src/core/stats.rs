use crate::models::{EngineStats, SwipeDirection};

/// Session-lifetime swipe counters
///
/// Owned by the engine and mutated once per decision; decisions are
/// sequential, so plain `&mut` access is sufficient. Concurrent callers
/// would need to wrap this in a mutex or switch to atomic counters.
#[derive(Debug, Default)]
pub struct StatsTracker {
    stats: EngineStats,
    started_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl StatsTracker {
    pub fn new() -> Self {
        Self {
            stats: EngineStats::default(),
            started_at: Some(chrono::Utc::now()),
        }
    }

    /// Count a profile entering the pipeline. Called exactly once per
    /// decision, before any gate can short-circuit.
    pub fn start_decision(&mut self) {
        self.stats.total += 1;
    }

    /// Record the final direction. `via_fallback` splits right swipes into
    /// the two calibration categories; `right == alignment_right +
    /// fallback_right` holds because this is the only mutation path.
    pub fn record(&mut self, direction: SwipeDirection, via_fallback: bool) {
        if direction == SwipeDirection::Right {
            self.stats.right += 1;
            if via_fallback {
                self.stats.fallback_right += 1;
            } else {
                self.stats.alignment_right += 1;
            }
        }
    }

    pub fn snapshot(&self) -> EngineStats {
        self.stats
    }

    pub fn started_at(&self) -> Option<chrono::DateTime<chrono::Utc>> {
        self.started_at
    }

    /// Reset counters at automation-session start.
    pub fn reset(&mut self) {
        self.stats = EngineStats::default();
        self.started_at = Some(chrono::Utc::now());
    }
}
