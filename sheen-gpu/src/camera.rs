use bytemuck::{Pod, Zeroable};
use glam::{vec2, vec3, Mat4, Vec2, Vec3, Vec3Swizzles, Vec4, Vec4Swizzles};

/// Per-frame camera data, shared by all passes.
///
/// Uv-coordinates span the entire viewport, with `(0.0, 0.0)` at its top-left
/// corner; depth is stored in normalized device coordinates, with `0.0` at
/// the near plane and `1.0` at the far plane.
#[repr(C)]
#[derive(Clone, Copy, Default, Pod, Zeroable, Debug)]
pub struct Camera {
    /// World-space to view-space transformation
    pub view: Mat4,
    pub inv_view: Mat4,

    /// View-space to clip-space transformation
    pub projection: Mat4,
    pub inv_projection: Mat4,

    /// View-space to screen-space transformation - the result, after the
    /// perspective divide, is expressed in pixels
    pub screen_space_projection: Mat4,

    /// x - viewport width, in pixels
    /// y - viewport height, in pixels
    /// z - aspect ratio
    /// w - unused
    pub screen: Vec4,
}

impl Camera {
    /// Builds a matrix that maps normalized device coordinates into pixels of
    /// a screen with given size, flipping the y axis.
    pub fn screen_space_matrix(size: Vec2) -> Mat4 {
        let half = size * 0.5;

        Mat4::from_cols(
            Vec4::new(half.x, 0.0, 0.0, 0.0),
            Vec4::new(0.0, -half.y, 0.0, 0.0),
            Vec4::new(0.0, 0.0, 1.0, 0.0),
            Vec4::new(half.x, half.y, 0.0, 1.0),
        )
    }

    pub fn screen_size(&self) -> Vec2 {
        self.screen.xy()
    }

    /// Given a uv-coordinate and its depth, returns it in normalized device
    /// coordinates.
    pub fn uv_to_ndc(uv: Vec2, depth: f32) -> Vec3 {
        vec3(uv.x * 2.0 - 1.0, 1.0 - uv.y * 2.0, depth)
    }

    /// Given a point in view-coordinates, returns its uv-coordinate (xy) and
    /// depth (z); returns `None` for points laying behind the camera.
    pub fn view_to_screen(&self, pos: Vec3) -> Option<Vec3> {
        let clip = self.screen_space_projection * pos.extend(1.0);

        if clip.w <= 0.0 {
            return None;
        }

        let pixels = clip.xyz() / clip.w;

        Some((pixels.xy() / self.screen_size()).extend(pixels.z))
    }

    /// Given a uv-coordinate and its depth, returns the point in
    /// view-coordinates.
    pub fn screen_to_view(&self, uv: Vec2, depth: f32) -> Vec3 {
        self.inv_projection.project_point3(Self::uv_to_ndc(uv, depth))
    }

    /// Converts depth stored in normalized device coordinates into linear
    /// distance along the camera's forward axis.
    pub fn linear_depth(&self, depth: f32) -> f32 {
        -self.screen_to_view(vec2(0.5, 0.5), depth).z
    }

    /// Given a world-space direction, returns it in view-coordinates.
    pub fn world_to_view_dir(&self, dir: Vec3) -> Vec3 {
        self.view.transform_vector3(dir).normalize_or_zero()
    }
}
