//! Analytically rendered scene used across tests: a camera standing at
//! `(0, 1, 0)` and looking towards -Z, at a mirror-like floor (`y = 0`) that
//! ends with a matte wall (`z = -10`, up to `y = 4`), with sky above it.

use glam::{vec3, vec4, Mat4, UVec2, Vec2, Vec3, Vec4};

use crate::{gpu, Camera, Config, FrameInputs, Texture};

pub const FLOOR_COLOR: Vec4 = Vec4::new(0.5, 0.5, 0.5, 1.0);
pub const WALL_COLOR: Vec4 = Vec4::new(1.0, 0.0, 0.0, 1.0);
pub const SKY_COLOR: Vec4 = Vec4::new(0.2, 0.3, 0.8, 1.0);

const WALL_Z: f32 = -10.0;
const WALL_HEIGHT: f32 = 4.0;

#[derive(Debug)]
pub struct TestScene {
    pub size: UVec2,
    pub view: Mat4,
    pub projection: Mat4,
    pub color: Texture,
    pub depth: Texture,
    pub normals: Texture,
    pub motion: Texture,
}

impl TestScene {
    pub fn new(size: UVec2) -> Self {
        Self::with_wall_color(size, WALL_COLOR)
    }

    pub fn with_wall_color(size: UVec2, wall_color: Vec4) -> Self {
        Self::build(size, wall_color, 1.0)
    }

    /// Creates the scene with a floor that's less of a mirror.
    pub fn with_floor_smoothness(size: UVec2, smoothness: f32) -> Self {
        Self::build(size, WALL_COLOR, smoothness)
    }

    /// Fills the motion vectors with `motion`, as if the whole frame moved
    /// by it since the last one.
    pub fn with_motion(mut self, motion: Vec2) -> Self {
        for y in 0..self.size.y {
            for x in 0..self.size.x {
                let pos = UVec2::new(x, y);

                self.motion.write(pos, motion.extend(0.0).extend(0.0));
            }
        }

        self
    }

    fn build(size: UVec2, wall_color: Vec4, floor_smoothness: f32) -> Self {
        let view = Mat4::look_at_rh(
            vec3(0.0, 1.0, 0.0),
            vec3(0.0, 1.0, -1.0),
            Vec3::Y,
        );

        let aspect_ratio = (size.x as f32) / (size.y as f32);
        let projection = Mat4::perspective_rh(1.0, aspect_ratio, 0.1, 100.0);
        let camera = Camera::new(size, view, projection).serialize();

        let mut color = Self::texture("color", size);
        let mut depth = Self::texture("depth", size);
        let mut normals = Self::texture("normals", size);
        let motion = Self::texture("motion", size);

        for y in 0..size.y {
            for x in 0..size.x {
                let pos = UVec2::new(x, y);
                let uv = gpu::Tex::texel_uv(size, pos);
                let texel =
                    Self::trace(&camera, uv, wall_color, floor_smoothness);

                color.write(pos, texel.color);
                depth.write(pos, Vec4::splat(texel.depth));
                normals.write(pos, texel.normal);
            }
        }

        Self {
            size,
            view,
            projection,
            color,
            depth,
            normals,
            motion,
        }
    }

    pub fn camera(&self, config: Config) -> Camera {
        Camera::new(self.size, self.view, self.projection).with_config(config)
    }

    pub fn inputs(&self) -> FrameInputs<'_> {
        FrameInputs {
            color: &self.color,
            depth: &self.depth,
            normals: &self.normals,
            motion: Some(&self.motion),
        }
    }

    /// Returns whether given pixel shows the floor.
    pub fn is_floor(&self, pos: UVec2) -> bool {
        self.normals.read(pos).w > 0.0
    }

    fn texture(label: &str, size: UVec2) -> Texture {
        Texture::builder(label).with_size(size).build().unwrap()
    }

    fn trace(
        camera: &gpu::Camera,
        uv: Vec2,
        wall_color: Vec4,
        floor_smoothness: f32,
    ) -> Texel {
        let origin = camera.inv_view.transform_point3(Vec3::ZERO);

        let dir = camera
            .inv_view
            .transform_vector3(camera.screen_to_view(uv, 1.0))
            .normalize();

        let floor = (dir.y < 0.0).then(|| -origin.y / dir.y).map(|t| {
            (t, FLOOR_COLOR, vec4(0.0, 1.0, 0.0, floor_smoothness))
        });

        let wall = (dir.z < 0.0)
            .then(|| (WALL_Z - origin.z) / dir.z)
            .filter(|t| (origin + dir * *t).y <= WALL_HEIGHT)
            .map(|t| (t, wall_color, vec4(0.0, 0.0, 1.0, 0.0)));

        let hit = match (floor, wall) {
            (Some(floor), Some(wall)) => {
                Some(if floor.0 < wall.0 { floor } else { wall })
            }
            (floor, wall) => floor.or(wall),
        };

        let Some((t, color, normal)) = hit else {
            return Texel {
                color: SKY_COLOR,
                depth: 1.0,
                normal: Vec4::ZERO,
            };
        };

        let pos = camera.view.transform_point3(origin + dir * t);
        let depth = camera.view_to_screen(pos).map_or(1.0, |screen| screen.z);

        Texel {
            color,
            depth,
            normal,
        }
    }
}

struct Texel {
    color: Vec4,
    depth: f32,
    normal: Vec4,
}
