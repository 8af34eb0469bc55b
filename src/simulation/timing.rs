//! Transition durations of the simulated display layer
//!
//! Motion takes time proportional to the distance travelled. Door transitions take a
//! fixed time plus an optional forward-only random jitter, so door durations can vary
//! between runs the way they vary between real display layers. A seed makes the
//! jitter reproducible.

use crate::types::HouseConfig;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Duration model for cabin motion and door transitions
#[derive(Debug, Clone)]
pub struct TransitionTiming {
    ms_per_unit: f64,
    door_transition_ms: u64,
    door_jitter_ms: u64,
    rng: StdRng,
}

impl TransitionTiming {
    /// Create a timing model with an explicit random generator
    pub fn new(ms_per_unit: f64, door_transition_ms: u64, door_jitter_ms: u64, rng: StdRng) -> Self {
        Self { ms_per_unit, door_transition_ms, door_jitter_ms, rng }
    }

    /// Create the timing model described by a house configuration
    pub fn from_config(config: &HouseConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::new(config.ms_per_unit, config.door_transition_ms, config.door_jitter_ms, rng)
    }

    /// Time the cabin needs to travel `distance` display units
    ///
    /// `None` if the duration does not fit in a `u64` millisecond count.
    pub fn motion_ms(&self, distance: f64) -> Option<u64> {
        let ms = (distance.abs() * self.ms_per_unit).round();
        (ms.is_finite() && ms < u64::MAX as f64).then(|| ms as u64)
    }

    /// Time the doors need for one open or close transition
    ///
    /// `None` if the jitter pushes the duration past `u64::MAX`.
    pub fn door_ms(&mut self) -> Option<u64> {
        if self.door_jitter_ms == 0 {
            return Some(self.door_transition_ms);
        }
        self.door_transition_ms.checked_add(self.rng.gen_range(0..=self.door_jitter_ms))
    }
}
