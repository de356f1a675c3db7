use glam::Vec4Swizzles;

use crate::{
    gpu, Camera, CameraBuffers, CameraComputePass, FrameContext, Texture,
};

#[derive(Debug)]
pub struct ReprojectionPass {
    pass: CameraComputePass<gpu::ReprojectionPassParams>,
}

impl ReprojectionPass {
    pub fn new(_: &Camera) -> Self {
        let pass = CameraComputePass::builder("reprojection").build();

        Self { pass }
    }

    /// Blends `fresh` with the history into level 0 of the resolve buffer and
    /// then updates the history; without reprojection, `fresh` gets copied
    /// as-is.
    pub fn run(
        &self,
        ctxt: &FrameContext,
        fresh: &Texture,
        buffers: &mut CameraBuffers,
    ) {
        let CameraBuffers {
            resolve,
            history,
            history_valid,
            ..
        } = buffers;

        let (Some(history), Some(motion), true) = (
            history.as_mut(),
            ctxt.inputs.motion,
            ctxt.config.enable_reprojection,
        ) else {
            resolve.copy_mip_from(0, fresh, 0);
            return;
        };

        let params = gpu::ReprojectionPassParams {
            history_weight: gpu::REPROJECTION_HISTORY_WEIGHT,
            has_history: *history_valid as u32,
        };

        let size = resolve.size();
        let fresh = fresh.view(0);
        let motion = motion.view(0);

        {
            let prev = history.view(0);

            self.pass
                .run(size, &params, resolve.data_mut(0), |pos, params| {
                    let uv = gpu::Tex::texel_uv(size, pos);

                    let reprojection = gpu::Reprojection::from_motion(
                        uv,
                        motion.sample_bilinear(uv).xy(),
                    );

                    gpu::Reprojector { params }.run(
                        fresh.read(pos),
                        reprojection,
                        |uv| prev.sample_bilinear(uv),
                    )
                });
        }

        history.copy_mip_from(0, resolve, 0);
        *history_valid = true;
    }
}
