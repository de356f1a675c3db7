use glam::{Vec2, Vec4};

use crate::BlurPassParams;

/// Weights of the 5-tap binomial kernel used to build the mip pyramid.
pub const BLUR_WEIGHTS: [f32; 5] =
    [1.0 / 16.0, 4.0 / 16.0, 6.0 / 16.0, 4.0 / 16.0, 1.0 / 16.0];

/// Blurs given texture along the pass' axis, returning the value for the
/// destination texel centered at `uv`.
pub fn blur(
    uv: Vec2,
    params: &BlurPassParams,
    sample: impl Fn(Vec2) -> Vec4,
) -> Vec4 {
    let step = params.step();
    let mut out = Vec4::ZERO;

    for (i, weight) in BLUR_WEIGHTS.iter().enumerate() {
        let offset = (i as f32) - 2.0;

        out += sample(uv + step * offset) * *weight;
    }

    out
}
