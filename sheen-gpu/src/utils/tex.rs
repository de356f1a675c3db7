use glam::{uvec2, UVec2, Vec2, Vec4};

use crate::BilinearFilter;

/// Read-only view into a single level of an RGBA32F texture.
///
/// All reads are clamped to the texture's edge, so sampling can never go out
/// of bounds - even for uv-coordinates that lay outside of `<0.0, 1.0>`.
#[derive(Clone, Copy)]
pub struct Tex<'a> {
    data: &'a [Vec4],
    size: UVec2,
}

impl<'a> Tex<'a> {
    pub fn new(data: &'a [Vec4], size: UVec2) -> Self {
        assert!(size.x > 0 && size.y > 0);
        assert_eq!(data.len(), (size.x * size.y) as usize);

        Self { data, size }
    }

    pub fn size(&self) -> UVec2 {
        self.size
    }

    /// Returns the uv-coordinate of given texel's center.
    pub fn texel_uv(size: UVec2, pos: UVec2) -> Vec2 {
        (pos.as_vec2() + 0.5) / size.as_vec2()
    }

    pub fn read(&self, pos: UVec2) -> Vec4 {
        let pos = pos.min(self.size - 1);

        self.data[(pos.y * self.size.x + pos.x) as usize]
    }

    /// Reads the texel containing given uv-coordinate, without filtering.
    pub fn sample_nearest(&self, uv: Vec2) -> Vec4 {
        let pos = (uv * self.size.as_vec2()).floor();
        let pos = pos.clamp(Vec2::ZERO, (self.size - 1).as_vec2());

        self.read(pos.as_uvec2())
    }

    /// Reads given uv-coordinate, interpolating between the four nearest
    /// texels.
    pub fn sample_bilinear(&self, uv: Vec2) -> Vec4 {
        let pos = uv * self.size.as_vec2() - 0.5;
        let max = (self.size - 1).as_ivec2();

        BilinearFilter::from_coords(pos, |pos| {
            let pos = pos.clamp(glam::IVec2::ZERO, max);

            self.read(uvec2(pos.x as u32, pos.y as u32))
        })
        .eval(pos - pos.floor())
    }
}
