//! Bubble field: the ordered set of bubbles and the noise engine driving them.

use glam::DVec2;
use log::{debug, trace, warn};
use rand::Rng;

use super::entity::Bubble;
use crate::error::DriftError;
use crate::noise::NoiseEngine;
use crate::params::{random_seed, DriftParams, EntitySpec, SceneConfig};
use crate::sink::{EntityTransform, TransformSink};

/// Fixed set of drifting bubbles updated once per frame
#[derive(Debug, Clone)]
pub struct BubbleField {
    /// Creation order is z-order and index order
    bubbles: Vec<Bubble>,
    engine: NoiseEngine,
    params: DriftParams,
    /// Frames stepped so far
    frame: u64,
}

impl BubbleField {
    /// Create a field with random starting phases
    pub fn new(specs: &[EntitySpec], params: DriftParams, engine: NoiseEngine) -> Self {
        Self::with_rng(specs, params, engine, &mut rand::thread_rng())
    }

    /// Create a field drawing starting phases from `rng`
    ///
    /// Each bubble gets an x phase then a y phase, both integers in
    /// `[0, 64000)`. Phases need not be distinct across bubbles.
    pub fn with_rng<R: Rng + ?Sized>(
        specs: &[EntitySpec],
        params: DriftParams,
        engine: NoiseEngine,
        rng: &mut R,
    ) -> Self {
        let bubbles = specs
            .iter()
            .enumerate()
            .map(|(index, spec)| {
                let phase_x = random_seed(rng);
                let phase_y = random_seed(rng);
                Bubble::new(index, spec, DVec2::new(phase_x, phase_y))
            })
            .collect();

        Self {
            bubbles,
            engine,
            params,
            frame: 0,
        }
    }

    /// Create a field from a scene, drawing a random seed if none is set
    pub fn from_scene(scene: &SceneConfig) -> Self {
        let seed = scene
            .seed
            .unwrap_or_else(|| random_seed(&mut rand::thread_rng()));
        debug!(
            "Creating bubble field: {} bubbles, seed {}",
            scene.bubbles.len(),
            seed
        );
        Self::new(&scene.bubbles, scene.params, NoiseEngine::new(seed))
    }

    /// Bubbles in creation order
    pub fn bubbles(&self) -> &[Bubble] {
        &self.bubbles
    }

    /// Number of bubbles
    pub fn len(&self) -> usize {
        self.bubbles.len()
    }

    /// Whether the field has no bubbles
    pub fn is_empty(&self) -> bool {
        self.bubbles.is_empty()
    }

    /// Noise engine sampled for jitter
    pub fn engine(&self) -> &NoiseEngine {
        &self.engine
    }

    /// Drift tunables
    pub fn params(&self) -> &DriftParams {
        &self.params
    }

    /// Number of frames stepped so far
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Current transforms in creation order
    pub fn transforms(&self) -> impl Iterator<Item = EntityTransform> + '_ {
        self.bubbles.iter().map(Bubble::transform)
    }

    /// Advance every bubble by one frame, in creation order
    pub fn step(&mut self) {
        for bubble in &mut self.bubbles {
            if bubble.advance(&self.engine, &self.params) {
                trace!("Bubble {} wrapped at frame {}", bubble.index(), self.frame);
            }
        }
        self.frame += 1;
    }

    /// Write every bubble's transform to `sink`
    ///
    /// Stops at the first target that rejects its transform.
    pub fn present<S: TransformSink + ?Sized>(&self, sink: &mut S) -> Result<(), DriftError> {
        for bubble in &self.bubbles {
            if let Err(e) = sink.apply(bubble.index(), &bubble.transform()) {
                warn!("Frame {}: {}", self.frame, e);
                return Err(e.into());
            }
        }
        Ok(())
    }

    /// One animation frame: step, then present
    pub fn update<S: TransformSink + ?Sized>(&mut self, sink: &mut S) -> Result<(), DriftError> {
        self.step();
        self.present(sink)
    }
}
