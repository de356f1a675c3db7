use crate::{
    gpu, Camera, CameraBuffers, CameraComputePass, FrameContext, Result,
    Texture,
};

#[derive(Debug)]
pub struct ResolvingPass {
    pass: CameraComputePass<gpu::ResolvingPassParams>,
}

impl ResolvingPass {
    pub fn new(_: &Camera) -> Self {
        let pass = CameraComputePass::builder("resolving").build();

        Self { pass }
    }

    /// Returns freshly resolved reflections, at the resolve buffer's
    /// resolution; the texture lives only as long as the current frame.
    pub fn run(
        &self,
        ctxt: &FrameContext,
        buffers: &CameraBuffers,
    ) -> Result<Texture> {
        let params = gpu::ResolvingPassParams {
            attenuation: ctxt.config.attenuation,
        };

        let size = buffers.resolve.size();

        let mut target = Texture::builder("resolve_fresh")
            .with_size(size)
            .build()?;

        let ray_hits = buffers.ray_hits.view(0);
        let color = ctxt.inputs.color.view(0);
        let depth = ctxt.inputs.depth.view(0);
        let normals = ctxt.inputs.normals.view(0);

        self.pass
            .run(size, &params, target.data_mut(0), |pos, params| {
                let uv = gpu::Tex::texel_uv(size, pos);
                let hit =
                    gpu::RayHit::deserialize(ray_hits.sample_nearest(uv));

                let resolver = gpu::Resolver {
                    camera: &ctxt.camera,
                    params,
                };

                resolver.run(
                    uv,
                    hit,
                    depth.sample_nearest(uv).x,
                    normals.sample_nearest(uv),
                    |uv| color.sample_bilinear(uv),
                )
            });

        Ok(target)
    }
}
