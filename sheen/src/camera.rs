use glam::{vec4, Mat4, UVec2};

use crate::{gpu, BufferSizes, Config};

/// Everything the pipeline needs to know about a camera: its viewport,
/// matrices and the reflection settings.
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    /// Viewport size, in pixels
    pub size: UVec2,

    /// World-space to view-space transformation
    pub view: Mat4,

    /// View-space to clip-space transformation, mapping depth into
    /// `<0.0, 1.0>` (e.g. [`Mat4::perspective_rh()`])
    pub projection: Mat4,

    pub config: Config,
}

impl Camera {
    pub fn new(size: UVec2, view: Mat4, projection: Mat4) -> Self {
        Self {
            size,
            view,
            projection,
            config: Default::default(),
        }
    }

    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    pub(crate) fn serialize(&self) -> gpu::Camera {
        let size = self.size.max(UVec2::ONE).as_vec2();

        gpu::Camera {
            view: self.view,
            inv_view: self.view.inverse(),
            projection: self.projection,
            inv_projection: self.projection.inverse(),
            screen_space_projection: gpu::Camera::screen_space_matrix(size)
                * self.projection,
            screen: vec4(size.x, size.y, size.x / size.y, 0.0),
        }
    }

    pub fn buffer_sizes(&self) -> BufferSizes {
        BufferSizes::new(self.size, &self.config.sanitize())
    }

    /// Returns whether switching from this camera to the other one requires
    /// reallocating the buffers (which throws away the history).
    pub(crate) fn is_invalidated_by(&self, other: &Self) -> bool {
        self.buffer_sizes() != other.buffer_sizes()
            || self.config.enable_reprojection
                != other.config.enable_reprojection
    }

    pub(crate) fn describe(&self) -> String {
        let sizes = self.buffer_sizes();

        format!(
            "size={}x{}, ray-marching={}, resolve={}, back-faces={}",
            self.size.x,
            self.size.y,
            sizes.ray_marching,
            sizes.resolve,
            sizes.back_face_depth,
        )
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use glam::{uvec2, vec2, vec3, Vec3};

    use super::*;

    fn camera(size: UVec2) -> Camera {
        let view = Mat4::look_at_rh(
            vec3(0.0, 1.0, 0.0),
            vec3(0.0, 1.0, -1.0),
            Vec3::Y,
        );

        let aspect_ratio = (size.x as f32) / (size.y as f32);
        let projection = Mat4::perspective_rh(1.0, aspect_ratio, 0.1, 100.0);

        Camera::new(size, view, projection)
    }

    #[test]
    fn serialize() {
        let target = camera(uvec2(320, 200)).serialize();

        assert_eq!(vec2(320.0, 200.0), target.screen_size());
        assert_relative_eq!(1.6, target.screen.z);

        // A point straight ahead lands in the middle of the screen
        let pos = target.view.transform_point3(vec3(0.0, 1.0, -5.0));
        let screen = target.view_to_screen(pos).unwrap();

        assert_relative_eq!(0.5, screen.x, epsilon = 1e-5);
        assert_relative_eq!(0.5, screen.y, epsilon = 1e-5);

        // ... and the floor lands in its bottom half
        let pos = target.view.transform_point3(vec3(0.0, 0.0, -5.0));
        let screen = target.view_to_screen(pos).unwrap();

        assert!(screen.y > 0.5);
    }

    #[test]
    fn is_invalidated_by() {
        let a = camera(uvec2(100, 60));
        let b = camera(uvec2(120, 90));
        let c = camera(uvec2(200, 100));

        // Both round up to a 128x128 base
        assert!(!a.is_invalidated_by(&b));

        // ... but this one needs 256x256
        assert!(a.is_invalidated_by(&c));

        let d = a
            .clone()
            .with_config(Config::default().with_resolve_downsample_amount(0));

        assert!(a.is_invalidated_by(&d));

        let e = a
            .clone()
            .with_config(Config::default().with_reprojection(false));

        assert!(a.is_invalidated_by(&e));

        // Tunables that don't affect buffers don't invalidate them
        let f = a.clone().with_config(Config::default().with_bandwidth(3.0));

        assert!(!a.is_invalidated_by(&f));
    }

    #[test]
    fn describe() {
        assert_eq!(
            "size=100x60, ray-marching=64, resolve=64, back-faces=64",
            camera(uvec2(100, 60)).describe()
        );
    }
}
