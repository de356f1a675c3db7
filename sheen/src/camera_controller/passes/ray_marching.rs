use crate::{gpu, Camera, CameraComputePass, FrameContext, Texture};

#[derive(Debug)]
pub struct RayMarchingPass {
    pass: CameraComputePass<gpu::RayMarchingPassParams>,
}

impl RayMarchingPass {
    pub fn new(_: &Camera) -> Self {
        let pass = CameraComputePass::builder("ray_marching").build();

        Self { pass }
    }

    pub fn run(
        &self,
        ctxt: &FrameContext,
        back_face_depth: &Texture,
        ray_hits: &mut Texture,
    ) {
        let params = gpu::RayMarchingPassParams {
            max_iterations: ctxt.config.maximum_iteration_count,
            binary_search_iterations: ctxt.config.binary_search_iteration_count,
            max_distance: ctxt.config.maximum_march_distance,
        };

        let depth = ctxt.inputs.depth.view(0);
        let normals = ctxt.inputs.normals.view(0);
        let back_face_depth = back_face_depth.view(0);
        let size = ray_hits.size();

        self.pass
            .run(size, &params, ray_hits.data_mut(0), |pos, params| {
                let uv = gpu::Tex::texel_uv(size, pos);

                let marcher = gpu::RayMarcher {
                    camera: &ctxt.camera,
                    params,
                };

                marcher
                    .run(
                        uv,
                        depth.sample_nearest(uv).x,
                        normals.sample_nearest(uv),
                        ctxt.noise.jitter(pos),
                        |uv| depth.sample_nearest(uv).x,
                        |uv| back_face_depth.sample_nearest(uv).x,
                    )
                    .serialize()
            });
    }
}
