use glam::UVec2;

use crate::{gpu, Config, Error, Noise, Result, Texture};

/// Scene buffers produced by the host renderer for a single frame.
///
/// All textures must match the camera's viewport size.
#[derive(Clone, Copy, Debug)]
pub struct FrameInputs<'a> {
    /// Lit scene, as it should appear without reflections
    pub color: &'a Texture,

    /// Depth, in normalized device coordinates (`x` component)
    pub depth: &'a Texture,

    /// World-space normal (`xyz`) and smoothness (`w`); surfaces with zero
    /// smoothness don't reflect anything
    pub normals: &'a Texture,

    /// Screen-space motion (current uv minus previous uv, `xy` components);
    /// required only when reprojection is enabled
    pub motion: Option<&'a Texture>,
}

impl FrameInputs<'_> {
    pub(crate) fn validate(
        &self,
        size: UVec2,
        needs_motion: bool,
    ) -> Result<()> {
        if size.min_element() == 0 {
            return Err(Error::resource_unavailable("viewport is empty"));
        }

        let mut inputs = vec![
            ("color", Some(self.color)),
            ("depth", Some(self.depth)),
            ("normals", Some(self.normals)),
        ];

        if needs_motion {
            inputs.push(("motion", self.motion));
        }

        for (name, input) in inputs {
            let Some(input) = input else {
                return Err(Error::resource_unavailable(format!(
                    "`{name}` is missing"
                )));
            };

            if input.size() != size {
                return Err(Error::resource_unavailable(format!(
                    "`{name}` is {}x{}, but the viewport is {}x{}",
                    input.size().x,
                    input.size().y,
                    size.x,
                    size.y
                )));
            }
        }

        Ok(())
    }
}

/// State of a single frame, threaded through all passes.
#[derive(Clone, Copy, Debug)]
pub struct FrameContext<'a> {
    pub camera: gpu::Camera,
    pub config: Config,
    pub inputs: &'a FrameInputs<'a>,
    pub noise: &'a Noise,
}

/// What the host is asked to render into the back-face depth buffer.
#[derive(Clone, Copy, Debug)]
pub struct BackFaceDepthRequest {
    pub camera: gpu::Camera,

    /// Size of the target texture, which can be smaller than the viewport
    pub size: UVec2,
}

/// Renders depth of the scene's back-facing geometry.
///
/// The target arrives cleared to the far plane (`1.0`); texels left untouched
/// mean "no back face" and make every surface infinitely thick.
pub trait BackFaceDepthPass {
    fn render(&mut self, request: &BackFaceDepthRequest, target: &mut Texture);
}

impl<F> BackFaceDepthPass for F
where
    F: FnMut(&BackFaceDepthRequest, &mut Texture),
{
    fn render(
        &mut self,
        request: &BackFaceDepthRequest,
        target: &mut Texture,
    ) {
        (self)(request, target)
    }
}

/// Back-face depth pass for hosts that can't provide one.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoBackFaces;

impl BackFaceDepthPass for NoBackFaces {
    fn render(&mut self, _: &BackFaceDepthRequest, _: &mut Texture) {}
}
