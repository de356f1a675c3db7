use glam::{Vec2, Vec4, Vec4Swizzles};

use crate::{Camera, CompositionPassParams, F32Ext};

/// Blends reflections onto the scene.
pub struct Compositor<'a> {
    pub camera: &'a Camera,
    pub params: &'a CompositionPassParams,
}

impl Compositor<'_> {
    /// Returns the final color of a pixel.
    ///
    /// `reflection` samples the (premultiplied) resolve buffer at given
    /// level of detail; it doesn't get called for pixels that stay
    /// untouched.
    pub fn run(
        &self,
        uv: Vec2,
        scene: Vec4,
        depth: f32,
        surface: Vec4,
        reflection: impl Fn(f32) -> Vec4,
    ) -> Vec4 {
        if depth >= 1.0 || surface.w <= 0.0 || self.params.mip_count == 0 {
            return scene;
        }

        let reflection = reflection(self.lod(surface.w));
        let distance = self.camera.screen_to_view(uv, depth).length();
        let fade = self.distance_fade(distance);

        let color = scene.xyz() * (1.0 - reflection.w * fade)
            + reflection.xyz() * fade;

        color.extend(scene.w)
    }

    /// Rougher surfaces read blurrier levels of the pyramid.
    pub fn lod(&self, smoothness: f32) -> f32 {
        let max = (self.params.mip_count.max(1) - 1) as f32;

        ((1.0 - smoothness.saturate()) * self.params.bandwidth).clamp(0.0, max)
    }

    /// Fades out reflections on surfaces that are far away from the camera;
    /// `distance` is given in world units.
    pub fn distance_fade(&self, distance: f32) -> f32 {
        if self.params.distance_fade <= 0.0 {
            return 1.0;
        }

        let distance = if self.params.max_distance > 0.0 {
            distance / self.params.max_distance
        } else {
            0.0
        };

        ((1.0 - distance) / self.params.distance_fade).saturate()
    }
}
