use glam::{Vec2, Vec3, Vec4, Vec4Swizzles};

use crate::{
    Camera, F32Ext, RayHit, ResolvingPassParams, Vec2Ext, Vec3Ext,
    MINIMUM_ATTENUATION,
};

/// Converts ray hits into (premultiplied) reflection colors.
pub struct Resolver<'a> {
    pub camera: &'a Camera,
    pub params: &'a ResolvingPassParams,
}

impl Resolver<'_> {
    /// Returns reflection for the surface visible at given uv-coordinate as
    /// `(rgb * weight, weight)`, where weight combines the hit's confidence
    /// with its fades; misses return zero.
    pub fn run(
        &self,
        uv: Vec2,
        hit: RayHit,
        depth: f32,
        surface: Vec4,
        color: impl Fn(Vec2) -> Vec4,
    ) -> Vec4 {
        if hit.is_none() || depth >= 1.0 {
            return Vec4::ZERO;
        }

        let normal = self.camera.world_to_view_dir(surface.xyz());
        let pos = self.camera.screen_to_view(uv, depth);
        let to_camera = (-pos).normalize_or_zero();
        let reflected = (-to_camera).reflect(normal);

        let weight = hit.confidence.saturate()
            * edge_fade(hit.uv, self.params.attenuation)
            * view_angle_fade(reflected, to_camera);

        if weight <= 0.0 {
            return Vec4::ZERO;
        }

        (color(hit.uv).xyz() * weight).extend(weight)
    }
}

/// Fades out hits that land near the screen's border, where the reflected
/// image would otherwise end abruptly.
pub fn edge_fade(uv: Vec2, attenuation: f32) -> f32 {
    (uv.border_distance() / attenuation.max(MINIMUM_ATTENUATION))
        .saturate()
        .sqrt()
}

/// Fades out reflections pointing back at the camera, since whatever they
/// hit is (mostly) hidden behind the surface itself.
pub fn view_angle_fade(reflected: Vec3, to_camera: Vec3) -> f32 {
    1.0 - reflected.dot(to_camera).saturate()
}
