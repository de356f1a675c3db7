use glam::{uvec2, Vec4};
use log::trace;

use crate::{
    utils, BackFaceDepthPass, BackFaceDepthRequest, Camera, FrameContext,
    Result, Texture,
};

/// Allocates the back-face depth buffer and asks the host to fill it.
#[derive(Debug)]
pub struct BackFaceDepthPreparingPass;

impl BackFaceDepthPreparingPass {
    pub fn new(_: &Camera) -> Self {
        Self
    }

    /// Returns the buffer, which lives only as long as the current frame.
    pub fn run(
        &self,
        ctxt: &FrameContext,
        size: u32,
        back_faces: &mut dyn BackFaceDepthPass,
    ) -> Result<Texture> {
        let mut target = Texture::builder("back_face_depth")
            .with_size(uvec2(size, size))
            .with_clear_value(Vec4::ONE)
            .build()?;

        let request = BackFaceDepthRequest {
            camera: ctxt.camera,
            size: target.size(),
        };

        trace!("Running pass: back_face_depth; size={}x{}", size, size);

        utils::measure("back_face_depth", || {
            back_faces.render(&request, &mut target);
        });

        Ok(target)
    }
}
