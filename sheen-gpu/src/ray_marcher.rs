use glam::{Vec2, Vec3, Vec3Swizzles, Vec4, Vec4Swizzles};

use crate::{Camera, RayHit, RayMarchingPassParams, Vec2Ext, Vec3Ext};

/// Marches reflection rays through view-space, looking for intersections with
/// the depth buffer.
///
/// Rays are tested against two surfaces: the front-facing depth (a ray that
/// goes behind it might've hit something) and the back-facing depth (a ray
/// that goes behind *that* has passed through a thin object instead of
/// hitting it).
pub struct RayMarcher<'a> {
    pub camera: &'a Camera,
    pub params: &'a RayMarchingPassParams,
}

impl RayMarcher<'_> {
    /// How far a ray's origin gets pushed away from its surface, relative to
    /// the surface's distance from the camera; avoids self-intersections
    /// caused by the depth buffer's limited resolution.
    pub const ORIGIN_OFFSET: f32 = 0.002;

    /// Marches the reflection ray of a surface visible at given
    /// uv-coordinate.
    ///
    /// `surface` contains the surface's world-space normal (xyz) and
    /// smoothness (w); `jitter` should be in range `<0.0, 1.0)`.
    pub fn run(
        &self,
        uv: Vec2,
        depth: f32,
        surface: Vec4,
        jitter: f32,
        front_depth: impl Fn(Vec2) -> f32,
        back_depth: impl Fn(Vec2) -> f32,
    ) -> RayHit {
        if !uv.is_inside_unit() || depth >= 1.0 || surface.w <= 0.0 {
            return RayHit::none();
        }

        let normal = self.camera.world_to_view_dir(surface.xyz());

        if normal == Vec3::ZERO {
            return RayHit::none();
        }

        let origin = self.camera.screen_to_view(uv, depth);
        let direction = origin.normalize_or_zero().reflect(normal);

        // Rays going into the surface can't be reflected by it
        if direction.dot(normal) <= 0.0 {
            return RayHit::none();
        }

        let origin = origin + normal * (Self::ORIGIN_OFFSET * origin.length());

        self.trace(origin, direction, jitter, front_depth, back_depth)
    }

    /// Marches a ray starting at given view-space point.
    pub fn trace(
        &self,
        origin: Vec3,
        direction: Vec3,
        jitter: f32,
        front_depth: impl Fn(Vec2) -> f32,
        back_depth: impl Fn(Vec2) -> f32,
    ) -> RayHit {
        let step = self.params.step();

        if step <= 0.0 || direction == Vec3::ZERO {
            return RayHit::none();
        }

        let jitter = jitter.clamp(0.0, 0.999);
        let mut prev_t = 0.0;
        let mut prev_in_front = true;

        for i in 1..=self.params.max_iterations.max(1) {
            let t = step * (i as f32 - jitter);

            let Some(sample) = self.sample(origin + direction * t, &front_depth)
            else {
                // The ray has left the screen (or the depth range) - there's
                // nothing it could hit anymore
                return RayHit::none();
            };

            // Brackets start only at steps laying in front of a surface
            if prev_in_front && self.is_inside(&sample, &back_depth) {
                return self.refine(
                    origin,
                    direction,
                    prev_t,
                    t,
                    &front_depth,
                    &back_depth,
                );
            }

            // Steps behind an object's back side have passed through (or
            // beside) it; the ray keeps marching
            prev_in_front = !sample.is_behind();
            prev_t = t;
        }

        RayHit::none()
    }

    /// Bisects the `[lo, hi]` range, where `lo` lays in front of the surface
    /// and `hi` inside it, to find a more precise hit point.
    fn refine(
        &self,
        origin: Vec3,
        direction: Vec3,
        mut lo: f32,
        mut hi: f32,
        front_depth: &impl Fn(Vec2) -> f32,
        back_depth: &impl Fn(Vec2) -> f32,
    ) -> RayHit {
        for _ in 0..self.params.binary_search_iterations {
            let mid = 0.5 * (lo + hi);

            match self.sample(origin + direction * mid, front_depth) {
                Some(sample) if !self.is_inside(&sample, back_depth) => {
                    lo = mid;
                }
                _ => hi = mid,
            }
        }

        let t = 0.5 * (lo + hi);

        let Some(sample) = self.sample(origin + direction * t, front_depth)
        else {
            return RayHit::none();
        };

        RayHit {
            uv: sample.uv.clamp(Vec2::ZERO, Vec2::ONE),
            confidence: 1.0,
            distance: t,
        }
    }

    /// Returns whether given sample lays between the front and back side of
    /// some object.
    fn is_inside(
        &self,
        sample: &Sample,
        back_depth: &impl Fn(Vec2) -> f32,
    ) -> bool {
        let back = self.camera.linear_depth(back_depth(sample.uv));

        sample.is_behind() && sample.ray_depth <= back
    }

    fn sample(
        &self,
        pos: Vec3,
        front_depth: &impl Fn(Vec2) -> f32,
    ) -> Option<Sample> {
        let screen = self.camera.view_to_screen(pos)?;
        let uv = screen.xy();

        if !uv.is_inside_unit() || screen.z < 0.0 || screen.z > 1.0 {
            return None;
        }

        Some(Sample {
            uv,
            ray_depth: -pos.z,
            scene_depth: self.camera.linear_depth(front_depth(uv)),
        })
    }
}

struct Sample {
    uv: Vec2,
    ray_depth: f32,
    scene_depth: f32,
}

impl Sample {
    fn is_behind(&self) -> bool {
        self.ray_depth >= self.scene_depth
    }
}
