mod buffers;
mod pass;
mod passes;

use log::{debug, info, trace, warn};

pub use self::buffers::*;
pub use self::pass::*;
pub use self::passes::*;
use crate::{
    BackFaceDepthPass, Camera, Error, FrameContext, FrameInputs, Noise, Result,
    Texture,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CameraState {
    /// Buffers haven't been allocated yet; they will be on the next frame
    Uninitialized,

    /// Buffers are allocated, but the history is empty
    Allocated,

    /// At least one frame got rendered since the buffers were allocated
    SteadyState,

    /// Reflections are turned off and frames pass through untouched
    Disabled,
}

#[derive(Debug)]
pub struct CameraController {
    camera: Camera,
    state: CameraState,
    buffers: Option<CameraBuffers>,
    passes: CameraPasses,
    frame: u32,
    allocations: usize,
}

impl CameraController {
    pub(crate) fn new(camera: Camera) -> Self {
        info!("Creating camera: {}", camera.describe());

        let passes = CameraPasses::new(&camera);

        debug!("Camera created");

        Self {
            camera,
            state: CameraState::Uninitialized,
            buffers: None,
            passes,
            frame: 0,
            allocations: 0,
        }
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn state(&self) -> CameraState {
        self.state
    }

    pub fn buffers(&self) -> Option<&CameraBuffers> {
        self.buffers.as_ref()
    }

    /// Returns how many frames this camera has rendered.
    pub fn frame(&self) -> u32 {
        self.frame
    }

    /// Returns how many times this camera's buffers have been (re)allocated.
    pub fn allocations(&self) -> usize {
        self.allocations
    }

    pub fn update(&mut self, camera: Camera) {
        if self.camera.is_invalidated_by(&camera) {
            // Buffers get reallocated on the next frame, once we know the
            // frame's inputs are alright
            debug!("Camera's buffers are stale: {}", camera.describe());
        } else if self.camera.size != camera.size {
            // Same buffers, but history's texels now map onto different
            // pixels
            self.invalidate_history();
        }

        self.camera = camera;
    }

    fn invalidate_history(&mut self) {
        if let Some(buffers) = &mut self.buffers {
            debug!(
                "Invalidating history for camera: {}",
                self.camera.describe()
            );

            buffers.history_valid = false;
            self.state = CameraState::Allocated;
        }
    }

    pub fn enable(&mut self) {
        if self.state == CameraState::Disabled {
            info!("Enabling camera: {}", self.camera.describe());

            self.state = CameraState::Uninitialized;
        }
    }

    /// Turns reflections off, releasing all of the camera's buffers.
    pub fn disable(&mut self) {
        if self.state != CameraState::Disabled {
            info!("Disabling camera: {}", self.camera.describe());

            self.release_buffers();
            self.state = CameraState::Disabled;
        }
    }

    fn release_buffers(&mut self) {
        if self.buffers.take().is_some() {
            debug!("Releasing buffers for camera: {}", self.camera.describe());
        }
    }

    /// Renders reflections on top of `inputs.color`, returning the composited
    /// frame.
    ///
    /// When something the pipeline requires is missing, the camera gets
    /// disabled and the scene is returned as-is.
    pub fn render(
        &mut self,
        noise: Option<&Noise>,
        inputs: &FrameInputs,
        back_faces: &mut dyn BackFaceDepthPass,
    ) -> Result<Texture> {
        if self.state == CameraState::Disabled {
            return inputs.color.duplicate("output");
        }

        match self.try_render(noise, inputs, back_faces) {
            Err(Error::ResourceUnavailable(reason)) => {
                warn!(
                    "Camera cannot render reflections ({}): {}",
                    self.camera.describe(),
                    reason
                );

                self.disable();

                inputs.color.duplicate("output")
            }

            result => result,
        }
    }

    fn try_render(
        &mut self,
        noise: Option<&Noise>,
        inputs: &FrameInputs,
        back_faces: &mut dyn BackFaceDepthPass,
    ) -> Result<Texture> {
        let noise = noise.ok_or_else(|| {
            Error::resource_unavailable("noise texture is not available")
        })?;

        let config = self.camera.config.sanitize();

        inputs.validate(self.camera.size, config.enable_reprojection)?;

        let sizes = self.camera.buffer_sizes();

        let buffers = match &mut self.buffers {
            Some(buffers)
                if buffers.sizes == sizes
                    && buffers.history.is_some()
                        == config.enable_reprojection =>
            {
                buffers
            }

            buffers => {
                if buffers.take().is_some() {
                    debug!(
                        "Rebuilding buffers for camera: {}",
                        self.camera.describe()
                    );
                }

                self.state = CameraState::Uninitialized;

                let new_buffers = CameraBuffers::new(&self.camera)?;

                self.allocations += 1;
                self.state = CameraState::Allocated;

                buffers.insert(new_buffers)
            }
        };

        trace!(
            "Rendering frame {} for camera: {}",
            self.frame + 1,
            self.camera.describe()
        );

        let ctxt = FrameContext {
            camera: self.camera.serialize(),
            config,
            inputs,
            noise,
        };

        let back_face_depth = self.passes.back_face_depth.run(
            &ctxt,
            sizes.back_face_depth,
            back_faces,
        )?;

        self.passes.ray_marching.run(
            &ctxt,
            &back_face_depth,
            &mut buffers.ray_hits,
        );

        drop(back_face_depth);

        let fresh = self.passes.resolving.run(&ctxt, buffers)?;

        self.passes.reprojection.run(&ctxt, &fresh, buffers);

        drop(fresh);

        if config.enable_blur_pyramid {
            self.passes.mip_pyramid.run(&mut buffers.resolve)?;
        }

        let output = self.passes.composition.run(&ctxt, buffers)?;

        self.frame += 1;
        self.state = CameraState::SteadyState;

        Ok(output)
    }
}

impl Drop for CameraController {
    fn drop(&mut self) {
        info!("Deleting camera: {}", self.camera.describe());
    }
}
