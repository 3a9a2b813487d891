//! Per-frame transform output.
//!
//! Each bubble owns one visual target, addressed by its index. The driver
//! writes one translate+scale transform per bubble per frame through a
//! [`TransformSink`]; a target that has gone away is reported as an error
//! instead of being swallowed.

use bytemuck::{Pod, Zeroable};
use glam::{DAffine2, DVec2};

use crate::error::SinkError;

/// 2D transform of one bubble for one frame
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EntityTransform {
    /// Perturbed position (pixels)
    pub translate: DVec2,
    /// Uniform scale
    pub scale: f64,
}

impl EntityTransform {
    /// Affine matrix equivalent: translate after scale
    pub fn to_affine(&self) -> DAffine2 {
        DAffine2::from_scale_angle_translation(DVec2::splat(self.scale), 0.0, self.translate)
    }

    /// CSS transform string, e.g. `translate(12.5px, 40px) scale(0.6)`
    pub fn css(&self) -> String {
        format!(
            "translate({}px, {}px) scale({})",
            self.translate.x, self.translate.y, self.scale
        )
    }
}

/// GPU-style instance record (translate + scale, padded to 16 bytes)
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct InstanceRaw {
    pub translate: [f32; 2],
    pub scale: f32,
    pub _padding: f32,
}

impl From<&EntityTransform> for InstanceRaw {
    fn from(t: &EntityTransform) -> Self {
        Self {
            translate: [t.translate.x as f32, t.translate.y as f32],
            scale: t.scale as f32,
            _padding: 0.0,
        }
    }
}

/// Destination for per-frame bubble transforms
pub trait TransformSink {
    /// Apply `transform` to the visual target of bubble `index`
    fn apply(&mut self, index: usize, transform: &EntityTransform) -> Result<(), SinkError>;
}

impl<S: TransformSink + ?Sized> TransformSink for &mut S {
    fn apply(&mut self, index: usize, transform: &EntityTransform) -> Result<(), SinkError> {
        (**self).apply(index, transform)
    }
}

/// Inline style slots, one per bubble element
#[derive(Debug, Clone, Default)]
pub struct StyleSink {
    slots: Vec<Option<String>>,
}

impl StyleSink {
    /// Create `count` attached slots with empty styles
    pub fn new(count: usize) -> Self {
        Self {
            slots: vec![Some(String::new()); count],
        }
    }

    /// Current style of bubble `index`, if attached
    pub fn style(&self, index: usize) -> Option<&str> {
        self.slots.get(index)?.as_deref()
    }

    /// Remove the target of bubble `index`; later writes to it fail
    pub fn detach(&mut self, index: usize) {
        if let Some(slot) = self.slots.get_mut(index) {
            *slot = None;
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl TransformSink for StyleSink {
    fn apply(&mut self, index: usize, transform: &EntityTransform) -> Result<(), SinkError> {
        match self.slots.get_mut(index) {
            Some(Some(style)) => {
                *style = transform.css();
                Ok(())
            }
            Some(None) => Err(SinkError::Detached(index)),
            None => Err(SinkError::UnknownEntity(index)),
        }
    }
}

/// Flat instance buffer, grown to fit the highest index written
#[derive(Debug, Clone, Default)]
pub struct InstanceBuffer {
    instances: Vec<InstanceRaw>,
}

impl InstanceBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn instances(&self) -> &[InstanceRaw] {
        &self.instances
    }

    /// Raw bytes for upload or dumping
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.instances)
    }
}

impl TransformSink for InstanceBuffer {
    fn apply(&mut self, index: usize, transform: &EntityTransform) -> Result<(), SinkError> {
        if index >= self.instances.len() {
            self.instances.resize(index + 1, InstanceRaw::zeroed());
        }
        self.instances[index] = InstanceRaw::from(transform);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> EntityTransform {
        EntityTransform {
            translate: DVec2::new(12.5, 40.0),
            scale: 0.6,
        }
    }

    #[test]
    fn test_css_format() {
        assert_eq!(sample().css(), "translate(12.5px, 40px) scale(0.6)");
    }

    #[test]
    fn test_affine_scales_then_translates() {
        let affine = sample().to_affine();
        let p = affine.transform_point2(DVec2::new(10.0, 10.0));
        assert!((p - DVec2::new(18.5, 46.0)).length() < 1e-12);
    }

    #[test]
    fn test_style_sink_detach() {
        let mut sink = StyleSink::new(2);
        sink.apply(0, &sample()).unwrap();
        assert_eq!(sink.style(0), Some("translate(12.5px, 40px) scale(0.6)"));

        sink.detach(1);
        assert_eq!(sink.apply(1, &sample()), Err(SinkError::Detached(1)));
        assert_eq!(sink.apply(5, &sample()), Err(SinkError::UnknownEntity(5)));
        assert_eq!(sink.style(1), None);
    }

    #[test]
    fn test_instance_buffer_bytes() {
        let mut buffer = InstanceBuffer::new();
        buffer.apply(1, &sample()).unwrap();
        assert_eq!(buffer.instances().len(), 2);
        assert_eq!(buffer.instances()[0], InstanceRaw::zeroed());
        assert_eq!(buffer.instances()[1].translate, [12.5, 40.0]);
        assert_eq!(buffer.as_bytes().len(), 2 * std::mem::size_of::<InstanceRaw>());
        assert_eq!(std::mem::size_of::<InstanceRaw>(), 16);
    }
}
