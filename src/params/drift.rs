//! Bubble drift tunables.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Upper bound (exclusive) for random seeds and initial noise phases.
pub const RANDOM_SEED_RANGE: u32 = 64_000;

/// Draw a random integral seed in `[0, RANDOM_SEED_RANGE)`.
pub fn random_seed<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    rng.gen_range(0..RANDOM_SEED_RANGE) as f64
}

/// Per-frame motion parameters
///
/// All rates are per frame, not per second: animation speed follows the
/// achieved frame rate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriftParams {
    /// Leftward drift of every bubble (pixels per frame)
    pub scroll_speed: f64,

    /// Noise phase advance (noise-space units per frame)
    pub noise_speed: f64,

    /// Jitter amplitude applied to both axes (pixels)
    pub noise_amount: f64,

    /// Base x a wrapped bubble restarts from (pixels)
    pub canvas_width: f64,

    /// Bubbles wrap once base x is strictly below this (pixels)
    pub wrap_threshold: f64,
}

impl Default for DriftParams {
    fn default() -> Self {
        Self {
            scroll_speed: 0.3,
            noise_speed: 0.004,
            noise_amount: 5.0,
            canvas_width: 2800.0,
            wrap_threshold: -200.0,
        }
    }
}

impl DriftParams {
    /// Validate parameters (finite values, non-empty wrap range)
    pub fn validate(&self) -> Result<(), String> {
        let fields = [
            ("scroll_speed", self.scroll_speed),
            ("noise_speed", self.noise_speed),
            ("noise_amount", self.noise_amount),
            ("canvas_width", self.canvas_width),
            ("wrap_threshold", self.wrap_threshold),
        ];
        if let Some((name, value)) = fields.iter().find(|(_, v)| !v.is_finite()) {
            return Err(format!("{} must be finite, got {}", name, value));
        }
        if self.noise_speed < 0.0 {
            return Err(format!(
                "noise_speed must be >= 0, got {}",
                self.noise_speed
            ));
        }
        if self.canvas_width <= self.wrap_threshold {
            return Err(format!(
                "canvas_width ({}) must exceed wrap_threshold ({})",
                self.canvas_width, self.wrap_threshold
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_defaults_are_valid() {
        assert!(DriftParams::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_inverted_wrap_range() {
        let params = DriftParams {
            canvas_width: -300.0,
            ..Default::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_rejects_non_finite() {
        let params = DriftParams {
            noise_amount: f64::NAN,
            ..Default::default()
        };
        let err = params.validate().unwrap_err();
        assert!(err.contains("noise_amount"));
    }

    #[test]
    fn test_random_seed_range() {
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..1000 {
            let seed = random_seed(&mut rng);
            assert!((0.0..RANDOM_SEED_RANGE as f64).contains(&seed));
            assert_eq!(seed, seed.floor());
        }
    }
}
