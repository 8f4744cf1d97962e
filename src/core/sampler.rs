use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::models::SwipeDirection;

/// Outcome of the final sampling stage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleOutcome {
    pub direction: SwipeDirection,
    /// True when the right swipe came from the random fallback rather than
    /// the alignment signal; tracked separately for ratio calibration.
    pub via_fallback: bool,
}

/// Calibrated random fallback
///
/// Strict filtering under-swipes relative to the desired overall
/// right-swipe ratio, so non-aligned profiles still get a right swipe at
/// the configured percentage.
#[derive(Debug)]
pub struct FallbackSampler {
    rng: StdRng,
}

impl FallbackSampler {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic sampler for tests and replayable sessions.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Resolve the final direction for a profile
    ///
    /// Aligned profiles always go right and never count as fallback.
    pub fn sample(&mut self, aligned: bool, swipe_right_percentage: u8) -> SampleOutcome {
        if aligned {
            return SampleOutcome {
                direction: SwipeDirection::Right,
                via_fallback: false,
            };
        }

        let threshold = f64::from(swipe_right_percentage) / 100.0;
        let draw: f64 = self.rng.gen();

        if draw <= threshold {
            SampleOutcome {
                direction: SwipeDirection::Right,
                via_fallback: true,
            }
        } else {
            SampleOutcome {
                direction: SwipeDirection::Left,
                via_fallback: false,
            }
        }
    }
}

impl Default for FallbackSampler {
    fn default() -> Self {
        Self::new()
    }
}
