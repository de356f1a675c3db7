//! Screen-space reflections.
//!
//! Given a frame rendered by the host (color, depth, normals and, optionally,
//! motion vectors), Sheen marches rays through the depth buffer, resolves the
//! reflected colors, blends them with the previous frames, blurs them into a
//! roughness pyramid and composites the result on top of the scene's color.
//!
//! Each camera keeps its own buffers and history; see [`Engine`].

mod buffers;
mod camera;
mod camera_controller;
mod camera_controllers;
mod config;
mod error;
mod frame;
mod noise;
mod utils;

#[cfg(test)]
mod test_scene;

use std::path::Path;

use log::{info, warn};
pub(crate) use sheen_gpu as gpu;

pub use self::buffers::*;
pub use self::camera::*;
pub use self::camera_controller::*;
pub use self::camera_controllers::*;
pub use self::config::*;
pub use self::error::*;
pub use self::frame::*;
pub use self::noise::*;

#[derive(Debug)]
pub struct Engine {
    noise: Option<Noise>,
    cameras: CameraControllers,
}

impl Engine {
    /// Creates an engine with noise generated from [`Noise::DEFAULT_SEED`].
    pub fn new() -> Result<Self> {
        info!("Initializing");

        Ok(Self::with_noise(Noise::generate(Noise::DEFAULT_SEED)?))
    }

    pub fn with_noise(noise: Noise) -> Self {
        Self {
            noise: Some(noise),
            cameras: Default::default(),
        }
    }

    /// Creates an engine with noise loaded from given image.
    ///
    /// If the image can't be loaded, the engine still gets created, but its
    /// cameras pass frames through without reflections.
    pub fn with_noise_file(path: impl AsRef<Path>) -> Self {
        let noise = Noise::load(path)
            .map_err(|err| {
                warn!("Reflections will be disabled: {}", err);
            })
            .ok();

        Self {
            noise,
            cameras: Default::default(),
        }
    }

    pub fn noise(&self) -> Option<&Noise> {
        self.noise.as_ref()
    }

    pub fn create_camera(&mut self, camera: Camera) -> CameraHandle {
        self.cameras.add(CameraController::new(camera))
    }

    pub fn update_camera(&mut self, handle: CameraHandle, camera: Camera) {
        self.cameras.get_mut(handle).update(camera);
    }

    /// Renders a frame for given camera; see [`CameraController::render()`].
    pub fn render_camera(
        &mut self,
        handle: CameraHandle,
        inputs: &FrameInputs,
        back_faces: &mut dyn BackFaceDepthPass,
    ) -> Result<Texture> {
        self.cameras
            .get_mut(handle)
            .render(self.noise.as_ref(), inputs, back_faces)
    }

    pub fn camera(&self, handle: CameraHandle) -> &CameraController {
        self.cameras.get(handle)
    }

    pub fn camera_mut(
        &mut self,
        handle: CameraHandle,
    ) -> &mut CameraController {
        self.cameras.get_mut(handle)
    }

    pub fn cameras_mut(
        &mut self,
    ) -> impl Iterator<Item = &mut CameraController> + '_ {
        self.cameras.iter_mut()
    }

    pub fn delete_camera(&mut self, handle: CameraHandle) {
        self.cameras.remove(handle);
    }
}

#[cfg(test)]
mod tests {
    use glam::uvec2;

    use super::*;
    use crate::test_scene::{TestScene, FLOOR_COLOR};

    #[test]
    fn reflections() {
        let scene = TestScene::new(uvec2(1920, 1080));
        let mut engine = Engine::new().unwrap();
        let camera = engine.create_camera(scene.camera(Config::default()));

        let output = engine
            .render_camera(camera, &scene.inputs(), &mut NoBackFaces)
            .unwrap();

        assert_eq!(scene.size, output.size());

        let mut reflections = 0;

        for y in 0..scene.size.y {
            for x in 0..scene.size.x {
                let pos = uvec2(x, y);
                let expected = scene.color.read(pos);
                let actual = output.read(pos);

                // Only the floor reflects anything; the wall and the sky must
                // pass through untouched
                if !scene.is_floor(pos) {
                    assert_eq!(expected, actual, "pos={pos}");
                    continue;
                }

                // ... and the only thing the floor can reflect is the red
                // wall (or itself)
                if actual.x > FLOOR_COLOR.x + 0.05 {
                    assert!(actual.y <= FLOOR_COLOR.y + 1e-4, "pos={pos}");
                    reflections += 1;
                }
            }
        }

        assert!(reflections > 0);
    }

    #[test]
    fn cameras() {
        let scene = TestScene::new(uvec2(100, 60));
        let mut engine = Engine::new().unwrap();

        let a = engine.create_camera(scene.camera(Config::default()));
        let b = engine.create_camera(
            scene.camera(Config::default().with_reprojection(false)),
        );

        assert_ne!(a, b);

        engine
            .render_camera(a, &scene.inputs(), &mut NoBackFaces)
            .unwrap();

        assert_eq!(CameraState::SteadyState, engine.camera(a).state());
        assert_eq!(CameraState::Uninitialized, engine.camera(b).state());

        engine.update_camera(
            b,
            scene.camera(Config::default().with_maximum_iteration_count(8)),
        );

        assert_eq!(8, engine.camera(b).camera().config.maximum_iteration_count);

        engine.camera_mut(a).disable();

        assert_eq!(CameraState::Disabled, engine.camera(a).state());
        assert_eq!(2, engine.cameras_mut().count());

        engine.delete_camera(a);

        assert_eq!(1, engine.cameras_mut().count());
    }

    #[test]
    #[should_panic(expected = "Camera does not exist")]
    fn deleted_camera() {
        let scene = TestScene::new(uvec2(4, 4));
        let mut engine = Engine::new().unwrap();
        let camera = engine.create_camera(scene.camera(Config::default()));

        engine.delete_camera(camera);
        engine.camera(camera);
    }

    #[test]
    fn missing_noise() {
        let scene = TestScene::new(uvec2(100, 60));
        let mut engine = Engine::with_noise_file("/definitely/not/here.png");
        let camera = engine.create_camera(scene.camera(Config::default()));

        assert!(engine.noise().is_none());

        let output = engine
            .render_camera(camera, &scene.inputs(), &mut NoBackFaces)
            .unwrap();

        assert_eq!(scene.color.data(0), output.data(0));
        assert_eq!(CameraState::Disabled, engine.camera(camera).state());
    }
}
