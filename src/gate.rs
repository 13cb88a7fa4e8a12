use glam::Vec3;

/// Retargeting only runs while the reference camera sits within `threshold` of the avatar's head.
/// Stateless: the gate is evaluated from scratch every tick, so it can flicker when the distance
/// hovers around the threshold.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ProximityGate {
    pub threshold: f32,
}

impl ProximityGate {
    pub fn new(threshold: f32) -> Self {
        Self { threshold }
    }

    #[inline]
    pub fn is_open(&self, camera: Vec3, head: Vec3) -> bool {
        camera.distance(head) <= self.threshold
    }
}
