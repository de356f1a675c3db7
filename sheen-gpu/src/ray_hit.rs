use glam::{vec2, vec4, Vec2, Vec4};

/// Outcome of marching a single reflection ray, as stored in the ray-hit
/// buffer.
///
/// Since `uv` is a coordinate and not a color, this structure must never be
/// filtered - interpolating two hits yields a point that might have nothing in
/// common with either of them.
#[derive(Clone, Copy, Default, PartialEq, Debug)]
pub struct RayHit {
    /// Where the ray hit, in uv-coordinates
    pub uv: Vec2,

    /// How much this hit can be trusted; zero means "no hit" (in which case
    /// the rest of the fields are meaningless)
    pub confidence: f32,

    /// How far (in world units) the ray travelled before it hit
    pub distance: f32,
}

impl RayHit {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn is_some(&self) -> bool {
        self.confidence > 0.0
    }

    pub fn is_none(&self) -> bool {
        !self.is_some()
    }

    pub fn serialize(&self) -> Vec4 {
        vec4(self.uv.x, self.uv.y, self.confidence, self.distance)
    }

    pub fn deserialize(d0: Vec4) -> Self {
        Self {
            uv: vec2(d0.x, d0.y),
            confidence: d0.z,
            distance: d0.w,
        }
    }
}
