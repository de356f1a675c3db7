use crate::{
    gpu, Camera, CameraBuffers, CameraComputePass, FrameContext, Result,
    Texture,
};

#[derive(Debug)]
pub struct CompositionPass {
    pass: CameraComputePass<gpu::CompositionPassParams>,
}

impl CompositionPass {
    pub fn new(_: &Camera) -> Self {
        let pass = CameraComputePass::builder("composition").build();

        Self { pass }
    }

    /// Returns the final image, at the viewport's resolution.
    pub fn run(
        &self,
        ctxt: &FrameContext,
        buffers: &CameraBuffers,
    ) -> Result<Texture> {
        let mip_count = if ctxt.config.enable_blur_pyramid {
            buffers.resolve.mip_count() as u32
        } else {
            1
        };

        let params = gpu::CompositionPassParams {
            bandwidth: ctxt.config.bandwidth,
            distance_fade: ctxt.config.distance_fade,
            max_distance: ctxt.config.maximum_march_distance,
            mip_count,
        };

        let size = ctxt.inputs.color.size();
        let mut output = Texture::builder("output").with_size(size).build()?;

        let color = ctxt.inputs.color.view(0);
        let depth = ctxt.inputs.depth.view(0);
        let normals = ctxt.inputs.normals.view(0);
        let resolve = &buffers.resolve;

        self.pass
            .run(size, &params, output.data_mut(0), |pos, params| {
                let uv = gpu::Tex::texel_uv(size, pos);

                let compositor = gpu::Compositor {
                    camera: &ctxt.camera,
                    params,
                };

                compositor.run(
                    uv,
                    color.read(pos),
                    depth.read(pos).x,
                    normals.read(pos),
                    |lod| resolve.sample_lod(uv, lod),
                )
            });

        Ok(output)
    }
}
