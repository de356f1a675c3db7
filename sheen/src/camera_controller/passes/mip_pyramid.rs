use log::trace;

use crate::{gpu, Camera, CameraComputePass, Result, Texture};

/// Fills levels `1..` of the resolve buffer with progressively blurrier,
/// half-resolution copies of the previous level.
#[derive(Debug)]
pub struct MipPyramidPass {
    horizontal: CameraComputePass<gpu::BlurPassParams>,
    vertical: CameraComputePass<gpu::BlurPassParams>,
}

impl MipPyramidPass {
    pub fn new(_: &Camera) -> Self {
        let horizontal =
            CameraComputePass::builder("mip_pyramid_horizontal").build();

        let vertical =
            CameraComputePass::builder("mip_pyramid_vertical").build();

        Self {
            horizontal,
            vertical,
        }
    }

    pub fn run(&self, resolve: &mut Texture) -> Result<()> {
        for mip in 1..resolve.mip_count() {
            let src_size = resolve.mip_size(mip - 1);

            if src_size.x <= 1 && src_size.y <= 1 {
                trace!("Mip pyramid reached 1x1 at level {}", mip - 1);
                break;
            }

            let size = resolve.mip_size(mip);

            // Both scratch textures get dropped at the end of each level
            let mut horizontal = Texture::builder("mip_pyramid_horizontal")
                .with_size(size)
                .build()?;

            let mut vertical = Texture::builder("mip_pyramid_vertical")
                .with_size(size)
                .build()?;

            let src = resolve.view(mip - 1);

            self.horizontal.run(
                size,
                &gpu::BlurPassParams::horizontal(size.x),
                horizontal.data_mut(0),
                |pos, params| {
                    let uv = gpu::Tex::texel_uv(size, pos);

                    gpu::blur(uv, params, |uv| src.sample_bilinear(uv))
                },
            );

            let src = horizontal.view(0);

            self.vertical.run(
                size,
                &gpu::BlurPassParams::vertical(size.y),
                vertical.data_mut(0),
                |pos, params| {
                    let uv = gpu::Tex::texel_uv(size, pos);

                    gpu::blur(uv, params, |uv| src.sample_bilinear(uv))
                },
            );

            resolve.copy_mip_from(mip, &vertical, 0);
        }

        Ok(())
    }
}
