//! Single drifting bubble with noise-driven jitter and wraparound.

use glam::DVec2;

use crate::noise::NoiseEngine;
use crate::params::{DriftParams, EntitySpec};
use crate::sink::EntityTransform;

/// One animated bubble
#[derive(Debug, Clone)]
pub struct Bubble {
    index: usize,
    /// Unperturbed position; only x drifts
    base: DVec2,
    scale: f64,
    /// Noise phase accumulators for the x and y jitter
    phase: DVec2,
    /// Base position plus this frame's jitter
    perturbed: DVec2,
}

impl Bubble {
    /// Create bubble `index` from its layout entry and starting noise phases
    pub fn new(index: usize, spec: &EntitySpec, phase: DVec2) -> Self {
        let base = DVec2::new(spec.x, spec.y);
        Self {
            index,
            base,
            scale: spec.scale,
            phase,
            perturbed: base,
        }
    }

    /// Position in creation order
    pub fn index(&self) -> usize {
        self.index
    }

    /// Unperturbed position
    pub fn base(&self) -> DVec2 {
        self.base
    }

    /// Uniform scale factor
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Current noise phases (x, y)
    pub fn phase(&self) -> DVec2 {
        self.phase
    }

    /// Base position plus noise jitter, as of the last step
    pub fn perturbed(&self) -> DVec2 {
        self.perturbed
    }

    /// Transform to write to this bubble's visual target
    pub fn transform(&self) -> EntityTransform {
        EntityTransform {
            translate: self.perturbed,
            scale: self.scale,
        }
    }

    /// Advance one frame
    ///
    /// Jitter is sampled from `simplex2(phase, 0)` per axis. The perturbed
    /// position is taken before wrapping, so the frame that wraps still
    /// shows the bubble at the left edge. Returns `true` if the bubble
    /// wrapped.
    pub fn advance(&mut self, engine: &NoiseEngine, params: &DriftParams) -> bool {
        self.phase += DVec2::splat(params.noise_speed);
        let jitter = DVec2::new(
            engine.simplex2(self.phase.x, 0.0),
            engine.simplex2(self.phase.y, 0.0),
        );

        self.base.x -= params.scroll_speed;
        self.perturbed = self.base + jitter * params.noise_amount;

        if self.base.x < params.wrap_threshold {
            self.base.x = params.canvas_width;
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bubble_at(x: f64) -> Bubble {
        Bubble::new(0, &EntitySpec::new(x, 50.0), DVec2::new(10.0, 20.0))
    }

    #[test]
    fn test_wraps_below_threshold() {
        let engine = NoiseEngine::new(0.0);
        let params = DriftParams::default();
        let mut bubble = bubble_at(-199.9);

        // -199.9 - 0.3 = -200.2 < -200
        assert!(bubble.advance(&engine, &params));
        assert_eq!(bubble.base().x, params.canvas_width);
        assert_eq!(bubble.base().y, 50.0);
    }

    #[test]
    fn test_threshold_is_strict() {
        let engine = NoiseEngine::new(0.0);
        let params = DriftParams {
            scroll_speed: 0.0,
            ..Default::default()
        };

        let mut at_threshold = bubble_at(-200.0);
        assert!(!at_threshold.advance(&engine, &params));
        assert_eq!(at_threshold.base().x, -200.0);

        let mut just_past = bubble_at(-200.000_001);
        assert!(just_past.advance(&engine, &params));
        assert_eq!(just_past.base().x, 2800.0);

        let mut just_inside = bubble_at(-199.99);
        assert!(!just_inside.advance(&engine, &params));
    }

    #[test]
    fn test_wrap_frame_uses_pre_wrap_position() {
        let engine = NoiseEngine::new(0.0);
        let params = DriftParams {
            noise_amount: 0.0,
            ..Default::default()
        };
        let mut bubble = bubble_at(-199.9);
        bubble.advance(&engine, &params);
        assert!(bubble.perturbed().x < -200.0);
        assert_eq!(bubble.perturbed().y, 50.0);
    }

    #[test]
    fn test_jitter_follows_noise() {
        let engine = NoiseEngine::new(42.0);
        let params = DriftParams::default();
        let mut bubble = bubble_at(500.0);
        bubble.advance(&engine, &params);

        let phase = bubble.phase();
        assert_eq!(phase, DVec2::new(10.0, 20.0) + DVec2::splat(params.noise_speed));
        let expected = DVec2::new(
            bubble.base().x + engine.simplex2(phase.x, 0.0) * params.noise_amount,
            50.0 + engine.simplex2(phase.y, 0.0) * params.noise_amount,
        );
        assert_eq!(bubble.perturbed(), expected);
        assert!((bubble.perturbed() - bubble.base()).abs().max_element() <= params.noise_amount);
    }

    #[test]
    fn test_transform_carries_scale() {
        let spec = EntitySpec::scaled(1.0, 2.0, 0.8);
        let bubble = Bubble::new(3, &spec, DVec2::ZERO);
        let transform = bubble.transform();
        assert_eq!(bubble.index(), 3);
        assert_eq!(transform.scale, 0.8);
        assert_eq!(transform.translate, DVec2::new(1.0, 2.0));
    }
}
