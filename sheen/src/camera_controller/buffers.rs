use glam::{uvec2, UVec2};
use log::debug;

use crate::{Camera, Config, Result, Texture};

/// Dimensions of the camera's buffers; all of them are square.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BufferSizes {
    /// Viewport's longer side, rounded up to the next power of two
    pub base: u32,
    pub ray_marching: u32,
    pub resolve: u32,
    pub back_face_depth: u32,

    /// How many blurred levels the resolve buffer gets
    pub lod_count: u32,
}

impl BufferSizes {
    pub fn new(viewport: UVec2, config: &Config) -> Self {
        let base = viewport.max_element().max(1).next_power_of_two();
        let downsample =
            |amount: u32| base.checked_shr(amount).unwrap_or(0).max(1);
        let resolve = downsample(config.resolve_downsample_amount);

        Self {
            base,
            ray_marching: downsample(config.ray_marching_downsample_amount),
            resolve,
            back_face_depth: downsample(
                config.back_face_depth_texture_downsample_amount,
            ),
            lod_count: lod_count(resolve),
        }
    }

    /// Resolve buffer always has at least one level (the unblurred one).
    pub fn resolve_mip_count(&self) -> usize {
        self.lod_count.max(1) as usize
    }
}

/// Returns how many levels the blur pyramid of a buffer with given side
/// gets; the smallest ones would be too blurry to be useful, so buffers of
/// 64x64 and below get none.
pub fn lod_count(size: u32) -> u32 {
    let log2 = size.max(1).ilog2() as i32;

    (log2 - 6).clamp(0, log2 + 1) as u32
}

#[derive(Debug)]
pub struct CameraBuffers {
    pub sizes: BufferSizes,

    /// Output of the ray marcher; point-sampled only
    pub ray_hits: Texture,

    /// Reprojected reflections (level 0) and their blurred copies
    pub resolve: Texture,

    /// Previous frame's level 0 of `resolve`; present only when reprojection
    /// is enabled
    pub history: Option<Texture>,

    /// Whether `history` contains an actual frame; false right after the
    /// buffers get allocated
    pub history_valid: bool,
}

impl CameraBuffers {
    pub fn new(camera: &Camera) -> Result<Self> {
        debug!("Initializing camera buffers");

        let config = camera.config.sanitize();
        let sizes = camera.buffer_sizes();

        let ray_hits = Texture::builder("ray_hits")
            .with_size(uvec2(sizes.ray_marching, sizes.ray_marching))
            .build()?;

        let resolve = Texture::builder("resolve")
            .with_size(uvec2(sizes.resolve, sizes.resolve))
            .with_mip_count(sizes.resolve_mip_count())
            .build()?;

        let history = if config.enable_reprojection {
            Some(
                Texture::builder("history")
                    .with_size(uvec2(sizes.resolve, sizes.resolve))
                    .build()?,
            )
        } else {
            None
        };

        Ok(Self {
            sizes,
            ray_hits,
            resolve,
            history,
            history_valid: false,
        })
    }
}
